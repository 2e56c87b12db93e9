#[cfg(test)]
mod tests {
    use crate::{
        TEST_API_KEY, TEST_API_SECRET, test_config,
        utils::{
            ScriptedSource, page_from, page_of, read_csv, report_body, spawn_report_server,
        },
    };
    use connectors::{file::csv::writer::CsvFileWriter, http::client::SalesApiClient};
    use engine_config::paths::OUTPUT_FILE_NAME;
    use engine_processing::{error::ExtractError, extractor::Extractor};
    use model::{
        execution::request::{ApiCredentials, EstablishmentId},
        pagination::page::{EndReason, PageOutcome},
        transform::mapping::FieldMapping,
    };
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::tempdir;
    use tracing_test::traced_test;

    const BASE_URL: &str = "http://sales.invalid";

    fn amount_mapping() -> FieldMapping {
        FieldMapping::new([("amount", "total_amount")]).unwrap()
    }

    fn open_writer(dir: &std::path::Path, columns: &[String]) -> CsvFileWriter {
        CsvFileWriter::create(dir, OUTPUT_FILE_NAME, columns.to_vec()).unwrap()
    }

    // Scenario: one establishment, one short page of three rows.
    // Expected Outcome:
    // - Header is the mapped column followed by the context columns.
    // - Every row carries the mapped value and the establishment id.
    #[traced_test]
    #[tokio::test]
    async fn tc01_single_short_page() {
        let dir = tempdir().unwrap();
        let source = Arc::new(ScriptedSource::new().with_pages(
            5,
            vec![page_from(vec![
                json!({"amount": 10}),
                json!({"amount": 10}),
                json!({"amount": 10}),
            ])],
        ));
        let extractor = Extractor::new(source.clone(), amount_mapping(), &test_config(BASE_URL, &[5]));
        let writer = open_writer(dir.path(), extractor.columns());

        let summary = extractor.run_scoped(writer).await.unwrap();

        let (header, rows) = read_csv(&dir.path().join(OUTPUT_FILE_NAME));
        assert_eq!(
            header,
            vec!["total_amount", "establishment_id", "range_from", "range_to"]
        );
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(
                row,
                &vec!["10", "5", "2024-01-01T00:00:00", "2024-01-31T00:00:00"]
            );
        }
        assert_eq!(source.offsets_for(5), vec![0]);
        assert_eq!(summary.total_rows_written, 3);
        assert_eq!(
            summary.establishment(EstablishmentId(5)).map(|e| e.end_reason),
            Some(EndReason::ShortPage)
        );
    }

    // Scenario: pages of 20, 20 and 5 rows for one establishment.
    // Expected Outcome: requests at offsets 0, 20, 40 and 45 rows written.
    #[traced_test]
    #[tokio::test]
    async fn tc02_walks_full_pages() {
        let dir = tempdir().unwrap();
        let source = Arc::new(
            ScriptedSource::new().with_pages(7, vec![page_of(20, 1), page_of(20, 2), page_of(5, 3)]),
        );
        let extractor = Extractor::new(source.clone(), amount_mapping(), &test_config(BASE_URL, &[7]));
        let writer = open_writer(dir.path(), extractor.columns());

        let summary = extractor.run_scoped(writer).await.unwrap();

        assert_eq!(source.offsets_for(7), vec![0, 20, 40]);
        let (_, rows) = read_csv(&dir.path().join(OUTPUT_FILE_NAME));
        assert_eq!(rows.len(), 45);
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[44][0], "3");
        assert_eq!(summary.total_requests, 3);
    }

    // Scenario: establishments 1 and 2; the first has no data, the second two rows.
    // Expected Outcome: the header appears once, followed by two rows of establishment 2.
    #[traced_test]
    #[tokio::test]
    async fn tc03_empty_establishment_then_data() {
        let dir = tempdir().unwrap();
        let source = Arc::new(
            ScriptedSource::new()
                .with_pages(1, vec![PageOutcome::EndOfData])
                .with_pages(2, vec![page_of(2, 8)]),
        );
        let extractor =
            Extractor::new(source.clone(), amount_mapping(), &test_config(BASE_URL, &[1, 2]));
        let writer = open_writer(dir.path(), extractor.columns());

        let summary = extractor.run_scoped(writer).await.unwrap();

        let content = std::fs::read_to_string(dir.path().join(OUTPUT_FILE_NAME)).unwrap();
        assert_eq!(content.matches("total_amount").count(), 1);

        let (_, rows) = read_csv(&dir.path().join(OUTPUT_FILE_NAME));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r[1] == "2"));
        assert_eq!(source.requests(), vec![(1, 0), (2, 0)]);
        assert_eq!(summary.establishments[0].rows_written, 0);
        assert_eq!(summary.establishments[0].end_reason, EndReason::EndOfData);
    }

    // Scenario: a failed page in the middle of an establishment.
    // Expected Outcome:
    // - Pagination stops for that establishment without asking again.
    // - The next establishment is still extracted.
    // - The failure is logged and counted.
    #[traced_test]
    #[tokio::test]
    async fn tc04_transient_error_ends_establishment() {
        let dir = tempdir().unwrap();
        let source = Arc::new(
            ScriptedSource::new()
                .with_pages(
                    1,
                    vec![
                        page_of(20, 1),
                        PageOutcome::TransientError {
                            status: 503,
                            reason: "response body is not JSON".into(),
                        },
                        page_of(3, 1),
                    ],
                )
                .with_pages(2, vec![page_of(4, 2)]),
        );
        let extractor =
            Extractor::new(source.clone(), amount_mapping(), &test_config(BASE_URL, &[1, 2]));
        let writer = open_writer(dir.path(), extractor.columns());

        let summary = extractor.run_scoped(writer).await.unwrap();

        assert_eq!(source.offsets_for(1), vec![0, 20]);
        assert_eq!(source.offsets_for(2), vec![0]);
        assert_eq!(summary.transient_errors, 1);
        assert_eq!(summary.total_rows_written, 24);
        assert!(logs_contain("failed with status 503"));
    }

    // Test Settings: fail_on_transient_error = true.
    // Scenario: the first page of the first establishment fails.
    // Expected Outcome: the run aborts, and the header is still flushed to disk.
    #[traced_test]
    #[tokio::test]
    async fn tc05_transient_error_can_abort() {
        let dir = tempdir().unwrap();
        let source = Arc::new(ScriptedSource::new().with_pages(
            3,
            vec![PageOutcome::TransientError {
                status: 500,
                reason: "'sales_summary' missing from error response".into(),
            }],
        ));
        let mut config = test_config(BASE_URL, &[3, 4]);
        config.fail_on_transient_error = true;
        let extractor = Extractor::new(source.clone(), amount_mapping(), &config);
        let writer = open_writer(dir.path(), extractor.columns());

        let result = extractor.run_scoped(writer).await;

        assert!(matches!(
            result,
            Err(ExtractError::TransientPage {
                establishment: EstablishmentId(3),
                offset: 0,
                status: 500,
                ..
            })
        ));
        assert_eq!(source.requests(), vec![(3, 0)]);
        let (header, rows) = read_csv(&dir.path().join(OUTPUT_FILE_NAME));
        assert_eq!(header.len(), 4);
        assert!(rows.is_empty());
    }

    // Scenario: a page holding rows that are not JSON objects.
    // Expected Outcome: bad rows are skipped and logged, later rows and pages still written.
    #[traced_test]
    #[tokio::test]
    async fn tc06_malformed_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let mut first = page_of(19, 1);
        if let PageOutcome::Page { rows } = &mut first {
            rows.insert(3, json!("not an object").into());
        }
        let source = Arc::new(
            ScriptedSource::new()
                .with_pages(6, vec![first, page_from(vec![json!(null), json!({"amount": 9})])]),
        );
        let extractor = Extractor::new(source.clone(), amount_mapping(), &test_config(BASE_URL, &[6]));
        let writer = open_writer(dir.path(), extractor.columns());

        let summary = extractor.run_scoped(writer).await.unwrap();

        assert_eq!(source.offsets_for(6), vec![0, 20]);
        assert_eq!(summary.total_rows_written, 20);
        assert_eq!(summary.total_rows_skipped, 2);
        assert_eq!(summary.skipped_rows[0].offset, Some(0));
        assert_eq!(summary.skipped_rows[0].row_index, Some(3));
        assert_eq!(summary.skipped_rows[1].offset, Some(20));
        assert!(logs_contain("Skipping row for establishment 6"));

        let (_, rows) = read_csv(&dir.path().join(OUTPUT_FILE_NAME));
        assert_eq!(rows.last().map(|r| r[0].as_str()), Some("9"));
    }

    // Scenario: the source fails outright while extracting the second establishment.
    // Expected Outcome: the error propagates, and rows already written are flushed.
    #[traced_test]
    #[tokio::test]
    async fn tc07_rows_flushed_when_source_fails() {
        let dir = tempdir().unwrap();
        let source = Arc::new(
            ScriptedSource::new()
                .with_pages(1, vec![page_of(2, 4)])
                .failing_for(2),
        );
        let extractor =
            Extractor::new(source.clone(), amount_mapping(), &test_config(BASE_URL, &[1, 2]));
        let writer = open_writer(dir.path(), extractor.columns());

        let result = extractor.run_scoped(writer).await;

        assert!(matches!(result, Err(ExtractError::Source(_))));
        let (_, rows) = read_csv(&dir.path().join(OUTPUT_FILE_NAME));
        assert_eq!(rows.len(), 2);
    }

    // Scenario: only mapped fields reach the output.
    // Expected Outcome: unmapped keys never appear; missing mapped keys are empty.
    #[traced_test]
    #[tokio::test]
    async fn tc08_only_mapped_columns_written() {
        let dir = tempdir().unwrap();
        let mapping = FieldMapping::new([("amount", "total_amount"), ("tip", "tip_amount")]).unwrap();
        let source = Arc::new(ScriptedSource::new().with_pages(
            5,
            vec![page_from(vec![json!({"amount": 1, "secret": "x", "tip": 2}), json!({"amount": 3})])],
        ));
        let extractor = Extractor::new(source, mapping, &test_config(BASE_URL, &[5]));
        let writer = open_writer(dir.path(), extractor.columns());

        extractor.run_scoped(writer).await.unwrap();

        let content = std::fs::read_to_string(dir.path().join(OUTPUT_FILE_NAME)).unwrap();
        assert!(!content.contains("secret"));
        let (header, rows) = read_csv(&dir.path().join(OUTPUT_FILE_NAME));
        assert_eq!(header[..2], ["total_amount", "tip_amount"]);
        assert_eq!(rows[0][..2], ["1", "2"]);
        assert_eq!(rows[1][..2], ["3", ""]);
    }

    // Scenario: the real HTTP client against a local server serving 20 rows then 1 row.
    // Expected Outcome: two GETs with the expected query, 21 rows on disk.
    #[traced_test]
    #[tokio::test]
    async fn tc09_http_client_end_to_end() {
        let dir = tempdir().unwrap();
        let (base_url, server) = spawn_report_server(vec![
            ("HTTP/1.1 200 OK", report_body(20, 5)),
            ("HTTP/1.1 200 OK", report_body(1, 6)),
        ]);
        let config = test_config(&base_url, &[11]);
        let client = SalesApiClient::new(
            &config.base_url,
            &ApiCredentials::new(TEST_API_KEY, TEST_API_SECRET),
        )
        .unwrap();
        let extractor = Extractor::new(client, amount_mapping(), &config);
        let writer = open_writer(dir.path(), extractor.columns());

        let summary = extractor.run_scoped(writer).await.unwrap();

        let request_lines = server.join().unwrap();
        assert_eq!(request_lines.len(), 2);
        assert!(request_lines[0].starts_with("GET /reports/sales_summary/json/?limit=20&"));
        assert!(request_lines[0].contains("offset=0"));
        assert!(request_lines[0].contains("establishment=11"));
        assert!(request_lines[0].contains("show_unpaid=1"));
        assert!(!request_lines[0].contains("show_opened"));
        assert!(request_lines[1].contains("offset=20"));

        let (header, rows) = read_csv(&dir.path().join(OUTPUT_FILE_NAME));
        assert!(!header.iter().any(|h| h == "unmapped"));
        assert_eq!(rows.len(), 21);
        assert_eq!(summary.total_requests, 2);
    }

    // Scenario: the server answers an error status with a non-JSON body.
    // Expected Outcome: a warning for the status, then the establishment ends as a transient error.
    #[traced_test]
    #[tokio::test]
    async fn tc10_http_error_status_is_transient() {
        let dir = tempdir().unwrap();
        let (base_url, server) = spawn_report_server(vec![(
            "HTTP/1.1 502 Bad Gateway",
            "<html>bad gateway</html>".to_string(),
        )]);
        let config = test_config(&base_url, &[12]);
        let client = SalesApiClient::new(&config.base_url, &config.credentials).unwrap();
        let extractor = Extractor::new(client, amount_mapping(), &config);
        let writer = open_writer(dir.path(), extractor.columns());

        let summary = extractor.run_scoped(writer).await.unwrap();
        server.join().unwrap();

        assert_eq!(summary.transient_errors, 1);
        assert_eq!(summary.establishments[0].end_reason, EndReason::TransientError);
        assert!(logs_contain("502 Bad Gateway"));
    }

    // Scenario: the first establishment returns a row that is not an object,
    // the second returns ordinary rows.
    // Expected Outcome:
    // - The bad row is skipped and the first establishment finishes normally.
    // - The second establishment is still requested and its rows are written.
    #[traced_test]
    #[tokio::test]
    async fn tc11_skipped_row_does_not_stop_next_establishment() {
        let dir = tempdir().unwrap();
        let source = Arc::new(
            ScriptedSource::new()
                .with_pages(1, vec![page_from(vec![json!({"amount": 5}), json!([1, 2, 3])])])
                .with_pages(2, vec![page_of(3, 8)]),
        );
        let extractor =
            Extractor::new(source.clone(), amount_mapping(), &test_config(BASE_URL, &[1, 2]));
        let writer = open_writer(dir.path(), extractor.columns());

        let summary = extractor.run_scoped(writer).await.unwrap();

        assert_eq!(source.requests(), vec![(1, 0), (2, 0)]);
        assert_eq!(summary.total_rows_skipped, 1);
        assert_eq!(summary.skipped_rows[0].establishment, EstablishmentId(1));
        assert_eq!(summary.establishments[0].end_reason, EndReason::ShortPage);
        assert_eq!(summary.establishments[1].rows_written, 3);

        let (_, rows) = read_csv(&dir.path().join(OUTPUT_FILE_NAME));
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][..2], ["5", "1"]);
        assert!(rows[1..].iter().all(|r| r[0] == "8" && r[1] == "2"));
    }
}
