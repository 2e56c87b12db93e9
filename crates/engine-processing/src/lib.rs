pub mod error;
pub mod extractor;
pub mod pagination;
pub mod summary;
pub mod transform;
