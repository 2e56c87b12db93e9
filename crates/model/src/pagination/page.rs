use crate::records::row::RawRow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a single report request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// A decoded, non-empty page of rows.
    Page { rows: Vec<RawRow> },

    /// The endpoint has nothing more for this establishment.
    EndOfData,

    /// The response could not be used. Not retried.
    TransientError { status: u16, reason: String },
}

impl PageOutcome {
    pub fn row_count(&self) -> usize {
        match self {
            PageOutcome::Page { rows } => rows.len(),
            _ => 0,
        }
    }

    pub fn is_transient_error(&self) -> bool {
        matches!(self, PageOutcome::TransientError { .. })
    }
}

/// Why pagination stopped for an establishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The last page held fewer rows than the page size.
    ShortPage,
    EndOfData,
    TransientError,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::ShortPage => write!(f, "short_page"),
            EndReason::EndOfData => write!(f, "end_of_data"),
            EndReason::TransientError => write!(f, "transient_error"),
        }
    }
}
