pub mod failed_row;
pub mod request;
