use crate::error::SourceError;
use async_trait::async_trait;
use connectors::http::client::SalesApiClient;
use model::{execution::request::ReportRequest, pagination::page::PageOutcome};
use std::sync::Arc;

/// Something that can answer a single report page request.
///
/// Implementations issue exactly one request per call; pagination is the
/// caller's job.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch(&self, request: &ReportRequest) -> Result<PageOutcome, SourceError>;

    fn name(&self) -> &str;
}

#[async_trait]
impl ReportSource for SalesApiClient {
    async fn fetch(&self, request: &ReportRequest) -> Result<PageOutcome, SourceError> {
        let outcome = self.fetch_page(request).await?;
        Ok(outcome)
    }

    fn name(&self) -> &str {
        self.endpoint().as_str()
    }
}

#[async_trait]
impl<T> ReportSource for Arc<T>
where
    T: ReportSource + ?Sized,
{
    async fn fetch(&self, request: &ReportRequest) -> Result<PageOutcome, SourceError> {
        (**self).fetch(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
