pub mod context;
pub mod mapping;
