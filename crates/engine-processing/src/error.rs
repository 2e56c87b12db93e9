use engine_core::error::{SinkError, SourceError};
use model::execution::request::EstablishmentId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to fetch report page: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to write output: {0}")]
    Sink(#[from] SinkError),

    /// Raised instead of ending the establishment when transient page
    /// failures are configured to abort the run.
    #[error(
        "Report page for establishment {establishment} at offset {offset} failed with status {status}: {reason}"
    )]
    TransientPage {
        establishment: EstablishmentId,
        offset: usize,
        status: u16,
        reason: String,
    },

    #[error("Output columns {found:?} do not match the mapping columns {expected:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

#[derive(Error, Debug, PartialEq)]
pub enum TransformError {
    #[error("Expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },
}
