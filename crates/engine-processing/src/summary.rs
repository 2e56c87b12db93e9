use chrono::{DateTime, Utc};
use model::{
    execution::{failed_row::FailedRow, request::EstablishmentId},
    pagination::page::EndReason,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EstablishmentSummary {
    pub establishment: EstablishmentId,
    pub requests: usize,
    pub rows_written: u64,
    pub rows_skipped: u64,
    pub end_reason: EndReason,
}

/// Outcome of one extraction run, written with `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub establishments: Vec<EstablishmentSummary>,
    pub total_requests: usize,
    pub total_rows_written: u64,
    pub total_rows_skipped: u64,
    pub transient_errors: usize,
    /// Rows dropped during mapping, with the data as received.
    pub skipped_rows: Vec<FailedRow>,
}

impl RunSummary {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            establishments: Vec::new(),
            total_requests: 0,
            total_rows_written: 0,
            total_rows_skipped: 0,
            transient_errors: 0,
            skipped_rows: Vec::new(),
        }
    }

    pub fn record(&mut self, establishment: EstablishmentSummary) {
        self.total_requests += establishment.requests;
        self.total_rows_written += establishment.rows_written;
        self.total_rows_skipped += establishment.rows_skipped;
        if establishment.end_reason == EndReason::TransientError {
            self.transient_errors += 1;
        }
        self.establishments.push(establishment);
    }

    pub fn skip(&mut self, row: FailedRow) {
        self.skipped_rows.push(row);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn establishment(&self, id: EstablishmentId) -> Option<&EstablishmentSummary> {
        self.establishments.iter().find(|e| e.establishment == id)
    }
}
