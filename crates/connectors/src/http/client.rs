use crate::{error::ApiError, http::response::decode_page};
use model::{
    execution::request::{ApiCredentials, ReportRequest},
    pagination::page::PageOutcome,
};
use reqwest::{
    Client, Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tracing::{debug, warn};

pub const ENDPOINT_PATH: &str = "reports/sales_summary/json/";
/// `API-AUTHENTICATION`; header names are case-insensitive.
pub const AUTH_HEADER: &str = "api-authentication";

/// Longest slice of an error body copied into the log.
const MAX_LOGGED_BODY: usize = 512;

/// Client for the sales summary report endpoint.
///
/// Sends one GET per call with no retries and no timeout.
#[derive(Clone)]
pub struct SalesApiClient {
    client: Client,
    endpoint: Url,
}

impl SalesApiClient {
    pub fn new(base_url: &str, credentials: &ApiCredentials) -> Result<Self, ApiError> {
        let endpoint = endpoint_url(base_url)?;

        let mut auth =
            HeaderValue::from_str(&credentials.header_value()).map_err(|_| ApiError::InvalidHeader)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(AUTH_HEADER), auth);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(SalesApiClient { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn fetch_page(&self, request: &ReportRequest) -> Result<PageOutcome, ApiError> {
        let params = query_params(request);
        debug!(
            "GET {} establishment={} offset={}",
            self.endpoint,
            request.establishment,
            request.offset()
        );

        let transport = |source: reqwest::Error| ApiError::Transport {
            url: self.endpoint.to_string(),
            source,
        };

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            warn!(
                "{} - {} (establishment {}, offset {})",
                status,
                truncate(&body, MAX_LOGGED_BODY),
                request.establishment,
                request.offset()
            );
        }

        Ok(decode_page(status, &body))
    }
}

/// Joins the report path onto `base_url`, keeping any path prefix it has.
pub fn endpoint_url(base_url: &str) -> Result<Url, ApiError> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut base = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".into()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    base.join(ENDPOINT_PATH).map_err(|e| invalid(e.to_string()))
}

/// Query string for one report page. Disabled flags are left out entirely.
pub fn query_params(request: &ReportRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("limit", request.cursor.limit.to_string()),
        ("range_from", request.range.range_from()),
        ("range_to", request.range.range_to()),
        ("offset", request.cursor.offset.to_string()),
        ("establishment", request.establishment.to_string()),
    ];

    for flag in request.flags.enabled() {
        params.push((flag, "1".to_string()));
    }

    params
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
