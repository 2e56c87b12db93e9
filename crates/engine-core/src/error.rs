use connectors::{error::ApiError, file::csv::error::FileError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Report API error: {0}")]
    Api(#[from] ApiError),

    #[error("Unexpected source error: {0}")]
    Unexpected(String),
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("File error: {0}")]
    File(#[from] FileError),
}
