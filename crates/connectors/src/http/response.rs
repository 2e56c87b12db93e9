use model::{pagination::page::PageOutcome, records::row::RawRow};
use reqwest::StatusCode;
use serde_json::Value;

/// Key holding the report rows in the response body.
pub const REPORT_KEY: &str = "sales_summary";

/// Classifies a report response.
///
/// The body is decoded whatever the status code: an error status that still
/// carries a `sales_summary` array is used as a normal page.
pub fn decode_page(status: StatusCode, body: &str) -> PageOutcome {
    let document: Value = match serde_json::from_str(body) {
        Ok(doc) => doc,
        Err(e) => {
            return PageOutcome::TransientError {
                status: status.as_u16(),
                reason: format!("response body is not JSON: {e}"),
            };
        }
    };

    match document.get(REPORT_KEY) {
        Some(Value::Array(items)) if items.is_empty() => PageOutcome::EndOfData,
        Some(Value::Array(items)) => PageOutcome::Page {
            rows: items.iter().cloned().map(RawRow::new).collect(),
        },
        Some(other) => PageOutcome::TransientError {
            status: status.as_u16(),
            reason: format!("'{REPORT_KEY}' is not a list (got {})", json_kind(other)),
        },
        None if status.is_success() => PageOutcome::EndOfData,
        None => PageOutcome::TransientError {
            status: status.as_u16(),
            reason: format!("'{REPORT_KEY}' missing from error response"),
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_with_rows() {
        let body = json!({"sales_summary": [{"amount": 1}, {"amount": 2}]}).to_string();
        match decode_page(StatusCode::OK, &body) {
            PageOutcome::Page { rows } => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[1], RawRow::new(json!({"amount": 2})));
            }
            other => panic!("expected a page, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_list_is_end_of_data() {
        let body = r#"{"sales_summary": []}"#;
        assert_eq!(decode_page(StatusCode::OK, body), PageOutcome::EndOfData);
    }

    #[test]
    fn test_missing_key_on_success_is_end_of_data() {
        let body = r#"{"message": "no data"}"#;
        assert_eq!(decode_page(StatusCode::OK, body), PageOutcome::EndOfData);
    }

    #[test]
    fn test_missing_key_on_error_status_is_transient() {
        let body = r#"{"error": "forbidden"}"#;
        let outcome = decode_page(StatusCode::FORBIDDEN, body);
        assert!(matches!(
            outcome,
            PageOutcome::TransientError { status: 403, .. }
        ));
    }

    #[test]
    fn test_error_status_with_rows_is_still_a_page() {
        let body = json!({"sales_summary": [{"amount": 1}]}).to_string();
        let outcome = decode_page(StatusCode::INTERNAL_SERVER_ERROR, &body);
        assert_eq!(outcome.row_count(), 1);
    }

    #[test]
    fn test_non_json_body_is_transient() {
        let outcome = decode_page(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>");
        match outcome {
            PageOutcome::TransientError { status, reason } => {
                assert_eq!(status, 502);
                assert!(reason.contains("not JSON"));
            }
            other => panic!("expected transient error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_transient() {
        let body = r#"{"sales_summary": {"amount": 1}}"#;
        let outcome = decode_page(StatusCode::OK, body);
        assert!(outcome.is_transient_error());
    }

    #[test]
    fn test_non_object_items_are_kept_for_the_mapper() {
        let body = r#"{"sales_summary": [{"amount": 1}, "garbage"]}"#;
        assert_eq!(decode_page(StatusCode::OK, body).row_count(), 2);
    }
}
