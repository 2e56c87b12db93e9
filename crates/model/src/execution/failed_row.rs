use crate::{execution::request::EstablishmentId, records::row::RawRow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A report row that was dropped instead of written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedRow {
    pub establishment: EstablishmentId,
    pub original_data: RawRow,
    pub error: String,
    /// Offset of the page the row arrived on.
    pub offset: Option<usize>,
    /// Position of the row within its page.
    pub row_index: Option<usize>,
    pub failed_at: DateTime<Utc>,
}

impl FailedRow {
    pub fn new(
        establishment: EstablishmentId,
        original_data: RawRow,
        error: impl Into<String>,
    ) -> Self {
        Self {
            establishment,
            original_data,
            error: error.into(),
            offset: None,
            row_index: None,
            failed_at: Utc::now(),
        }
    }

    pub fn with_position(mut self, offset: usize, row_index: usize) -> Self {
        self.offset = Some(offset);
        self.row_index = Some(row_index);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_row_with_position() {
        let failed = FailedRow::new(
            EstablishmentId(3),
            RawRow::new(json!("not a row")),
            "expected an object",
        )
        .with_position(40, 7);

        assert_eq!(failed.offset, Some(40));
        assert_eq!(failed.row_index, Some(7));
    }

    #[test]
    fn test_failed_row_serializes_original_data() {
        let failed = FailedRow::new(
            EstablishmentId(3),
            RawRow::new(json!([1, 2])),
            "boom",
        );
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["original_data"], json!([1, 2]));
        assert_eq!(json["establishment"], json!(3));
        assert_eq!(
            json.as_object().unwrap().keys().collect::<Vec<_>>(),
            ["establishment", "original_data", "error", "offset", "row_index", "failed_at"]
        );
    }
}
