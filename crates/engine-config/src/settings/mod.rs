use crate::{
    error::ConfigError,
    params::RawParameters,
    settings::{validated::ExtractorConfig, validator::ParameterValidator},
};
use chrono::NaiveDate;

pub mod validated;
pub mod validator;

/// Validate raw parameters, resolving relative dates against `today`.
pub fn validate(params: &RawParameters, today: NaiveDate) -> Result<ExtractorConfig, ConfigError> {
    ParameterValidator::new(today).validate(params)
}
