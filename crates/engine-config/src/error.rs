use model::transform::mapping::MappingError;
use thiserror::Error;

/// Problems found before any request is sent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    ParseFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// One or more parameters are missing or invalid.
    #[error("Invalid configuration: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error("Failed to read mapping file {path}: {source}")]
    ReadMapping {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse mapping file {path}: {source}")]
    ParseMapping {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Mapping file {path} has no '{key}' object")]
    MissingMappingTable { path: String, key: String },

    #[error("Mapping entry '{field}' in {path} must be a string")]
    InvalidMappingEntry { path: String, field: String },

    #[error("Invalid mapping: {0}")]
    Mapping(#[from] MappingError),
}
