use crate::{
    error::ExtractError,
    pagination::{PageState, next_state},
    summary::{EstablishmentSummary, RunSummary},
    transform::{context::ContextColumns, mapping::FieldMapper},
};
use engine_config::settings::validated::ExtractorConfig;
use engine_core::connectors::{sink::RowSink, source::ReportSource};
use model::{
    execution::{
        failed_row::FailedRow,
        request::{DateRange, EstablishmentId, ReportFlags, ReportRequest},
    },
    pagination::page::PageOutcome,
    transform::mapping::FieldMapping,
};
use tracing::{debug, error, info, warn};

/// Walks every configured establishment page by page and writes the
/// mapped rows to a sink.
///
/// Establishments are processed one after another, and each page is written
/// before the next one is requested.
pub struct Extractor<S: ReportSource> {
    source: S,
    mapper: FieldMapper,
    establishments: Vec<EstablishmentId>,
    range: DateRange,
    flags: ReportFlags,
    fail_on_transient_error: bool,
}

impl<S: ReportSource> Extractor<S> {
    pub fn new(source: S, mapping: FieldMapping, config: &ExtractorConfig) -> Self {
        Self {
            source,
            mapper: FieldMapper::new(mapping),
            establishments: config.establishments.clone(),
            range: config.range,
            flags: config.flags,
            fail_on_transient_error: config.fail_on_transient_error,
        }
    }

    /// Header the sink must be opened with.
    pub fn columns(&self) -> &[String] {
        self.mapper.columns()
    }

    /// Runs the extraction and flushes `sink` whether or not it succeeded.
    /// The sink is dropped, closing it, before this returns.
    pub async fn run_scoped<W: RowSink>(&self, mut sink: W) -> Result<RunSummary, ExtractError> {
        let result = self.run(&mut sink).await;
        let flushed = sink.flush();

        match (result, flushed) {
            (Ok(summary), Ok(())) => Ok(summary),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(flush_err)) => {
                error!("Failed to flush output after error: {flush_err}");
                Err(e)
            }
        }
    }

    /// Runs the extraction without flushing; see [`Extractor::run_scoped`].
    pub async fn run<W: RowSink>(&self, sink: &mut W) -> Result<RunSummary, ExtractError> {
        if sink.columns() != self.columns() {
            return Err(ExtractError::ColumnMismatch {
                expected: self.columns().to_vec(),
                found: sink.columns().to_vec(),
            });
        }

        let mut summary = RunSummary::start();
        info!(
            "Extracting {} establishment(s) from {}",
            self.establishments.len(),
            self.source.name()
        );

        for &establishment in &self.establishments {
            let result = self.extract_establishment(establishment, sink, &mut summary).await?;
            info!(
                "Establishment {}: {} request(s), {} row(s) written, {} skipped, ended by {}",
                establishment,
                result.requests,
                result.rows_written,
                result.rows_skipped,
                result.end_reason
            );
            summary.record(result);
        }

        summary.finish();
        info!(
            "Extraction finished: {} row(s) written, {} skipped, {} failed page(s)",
            summary.total_rows_written, summary.total_rows_skipped, summary.transient_errors
        );
        Ok(summary)
    }

    async fn extract_establishment<W: RowSink>(
        &self,
        establishment: EstablishmentId,
        sink: &mut W,
        summary: &mut RunSummary,
    ) -> Result<EstablishmentSummary, ExtractError> {
        let context = ContextColumns::new(establishment, &self.range);
        let mut request = ReportRequest::first_page(establishment, self.range, self.flags);
        let mut requests = 0;
        let mut rows_written = 0;
        let mut rows_skipped = 0;

        let end_reason = loop {
            debug!(
                "Requesting establishment {} at offset {}",
                establishment,
                request.offset()
            );
            let outcome = self.source.fetch(&request).await?;
            requests += 1;

            match &outcome {
                PageOutcome::Page { rows } => {
                    for (index, raw) in rows.iter().enumerate() {
                        match self.mapper.map_row(raw, &context) {
                            Ok(row) => {
                                sink.write_row(&row)?;
                                rows_written += 1;
                            }
                            Err(e) => {
                                warn!(
                                    "Skipping row for establishment {}: {} (row: {})",
                                    establishment, e, raw
                                );
                                rows_skipped += 1;
                                summary.skip(
                                    FailedRow::new(
                                        establishment,
                                        raw.clone(),
                                        e.to_string(),
                                    )
                                    .with_position(request.offset(), index),
                                );
                            }
                        }
                    }
                }
                PageOutcome::EndOfData => {}
                PageOutcome::TransientError { status, reason } => {
                    error!(
                        "Report page for establishment {} at offset {} failed with status {}: {}",
                        establishment,
                        request.offset(),
                        status,
                        reason
                    );
                    if self.fail_on_transient_error {
                        return Err(ExtractError::TransientPage {
                            establishment,
                            offset: request.offset(),
                            status: *status,
                            reason: reason.clone(),
                        });
                    }
                }
            }

            match next_state(&request, &outcome) {
                PageState::More(next) => request = next,
                PageState::Done(reason) => break reason,
            }
        };

        Ok(EstablishmentSummary {
            establishment,
            requests,
            rows_written,
            rows_skipped,
            end_reason,
        })
    }
}
