use crate::exit::ExitCode;
use connectors::{error::ApiError, file::csv::error::FileError};
use engine_config::error::ConfigError;
use engine_processing::error::ExtractError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Failed to set up the report API client: {0}")]
    Client(ApiError),

    #[error("Failed to open the output file: {0}")]
    Output(FileError),

    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("Failed to write the run report: {0}")]
    ReportWrite(#[from] std::io::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Config(_) | CliError::Configuration(_) => ExitCode::ConfigError,
            CliError::Client(ApiError::InvalidUrl { .. } | ApiError::InvalidHeader) => {
                ExitCode::ConfigError
            }
            _ => ExitCode::RuntimeError,
        }
    }
}
