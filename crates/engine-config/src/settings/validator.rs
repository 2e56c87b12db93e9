use crate::{
    dates::parse_date,
    error::ConfigError,
    params::RawParameters,
    settings::validated::{ExtractorConfig, ExtractorConfigBuilder},
};
use chrono::NaiveDate;
use model::execution::request::{ApiCredentials, DateRange, EstablishmentId, ReportFlags};
use serde_json::Value;
use tracing::{info, warn};

/// Turns raw parameters into an [`ExtractorConfig`], reporting every
/// problem found rather than stopping at the first one.
pub struct ParameterValidator {
    today: NaiveDate,
}

impl ParameterValidator {
    /// `today` anchors relative dates such as `yesterday`.
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn validate(&self, params: &RawParameters) -> Result<ExtractorConfig, ConfigError> {
        let mut builder = ExtractorConfigBuilder::new();
        let mut errors: Vec<String> = Vec::new();

        self.validate_credentials(params, &mut builder, &mut errors);
        self.validate_establishments(params, &mut builder, &mut errors);
        self.validate_dates(params, &mut builder, &mut errors);
        self.validate_flags(params, &mut builder);

        if !errors.is_empty() {
            return Err(ConfigError::ValidationFailed(errors));
        }

        let config = builder.build().ok_or_else(|| {
            ConfigError::ValidationFailed(vec!["Configuration is incomplete".to_string()])
        })?;

        info!(
            "Configuration valid: {} establishment(s), {} to {}",
            config.establishments.len(),
            config.range.from(),
            config.range.to()
        );
        Ok(config)
    }

    fn validate_credentials(
        &self,
        params: &RawParameters,
        builder: &mut ExtractorConfigBuilder,
        errors: &mut Vec<String>,
    ) {
        let url = non_empty(&params.url);
        let key = non_empty(&params.api_key);
        let secret = non_empty(&params.api_secret);

        let (Some(url), Some(key), Some(secret)) = (url, key, secret) else {
            errors.push("Credentials are missing".to_string());
            return;
        };

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("API url '{url}' must start with http:// or https://"));
            return;
        }

        builder.base_url = Some(url.to_string());
        builder.credentials = Some(ApiCredentials::new(key, secret));
    }

    fn validate_establishments(
        &self,
        params: &RawParameters,
        builder: &mut ExtractorConfigBuilder,
        errors: &mut Vec<String>,
    ) {
        let tokens = match &params.establishment_id {
            Some(value) => establishment_tokens(value),
            None => Vec::new(),
        };

        let mut establishments: Vec<EstablishmentId> = Vec::new();
        let mut invalid = false;
        for token in tokens {
            match token.parse::<EstablishmentId>() {
                Ok(id) if establishments.contains(&id) => {
                    warn!("Establishment {id} is configured more than once");
                }
                Ok(id) => establishments.push(id),
                Err(_) => {
                    errors.push(format!("Invalid establishment id '{token}'"));
                    invalid = true;
                }
            }
        }

        if establishments.is_empty() && !invalid {
            errors.push("Please configure establishment ids".to_string());
            return;
        }
        builder.establishments = establishments;
    }

    fn validate_dates(
        &self,
        params: &RawParameters,
        builder: &mut ExtractorConfigBuilder,
        errors: &mut Vec<String>,
    ) {
        let (Some(start), Some(end)) = (non_empty(&params.start_date), non_empty(&params.end_date))
        else {
            errors.push("Please configure your dates".to_string());
            return;
        };

        let from = parse_date(start, self.today);
        let to = parse_date(end, self.today);
        if from.is_none() {
            errors.push(format!("Unrecognised start_date '{start}'"));
        }
        if to.is_none() {
            errors.push(format!("Unrecognised end_date '{end}'"));
        }
        let (Some(from), Some(to)) = (from, to) else {
            return;
        };

        match DateRange::new(from, to) {
            Ok(range) => builder.range = Some(range),
            Err(_) => errors.push("StartDate cannot be larger than EndDate".to_string()),
        }
    }

    fn validate_flags(&self, params: &RawParameters, builder: &mut ExtractorConfigBuilder) {
        let defaults = ReportFlags::default();
        builder.flags = Some(ReportFlags {
            show_opened: params.show_opened.unwrap_or(defaults.show_opened),
            show_unpaid: params.show_unpaid.unwrap_or(defaults.show_unpaid),
            show_irregular: params.show_irregular.unwrap_or(defaults.show_irregular),
        });
        builder.fail_on_transient_error = params.fail_on_transient_error;
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Individual id tokens from a comma-separated string, a number, or a list.
fn establishment_tokens(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => s
            .split(',')
            .map(|t| t.split_whitespace().collect::<String>())
            .filter(|t| !t.is_empty())
            .collect(),
        Value::Number(n) => vec![n.to_string()],
        Value::Array(items) => items.iter().flat_map(establishment_tokens).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}
