use crate::error::ConfigError;
use model::transform::mapping::FieldMapping;
use serde_json::Value;
use std::{fs, path::Path};
use tracing::debug;

/// Top-level key of the mapping file holding the rename table.
pub const MAPPING_KEY: &str = "sales_summary";

pub const DEFAULT_MAPPING_FILE: &str = "mapping.json";

pub fn load_mapping(path: &Path) -> Result<FieldMapping, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadMapping {
        path: path.display().to_string(),
        source,
    })?;

    let mapping = parse_mapping(&text, &path.display().to_string())?;
    debug!("Loaded {} mapped fields from {}", mapping.len(), path.display());
    Ok(mapping)
}

/// Reads `{"sales_summary": {"source": "destination", ...}}`, keeping the
/// order the entries appear in.
pub fn parse_mapping(text: &str, path: &str) -> Result<FieldMapping, ConfigError> {
    let document: Value =
        serde_json::from_str(text).map_err(|source| ConfigError::ParseMapping {
            path: path.to_string(),
            source,
        })?;

    let Some(table) = document.get(MAPPING_KEY).and_then(Value::as_object) else {
        return Err(ConfigError::MissingMappingTable {
            path: path.to_string(),
            key: MAPPING_KEY.to_string(),
        });
    };

    let mut entries = Vec::with_capacity(table.len());
    for (source, destination) in table {
        let Some(destination) = destination.as_str() else {
            return Err(ConfigError::InvalidMappingEntry {
                path: path.to_string(),
                field: source.clone(),
            });
        };
        entries.push((source.as_str(), destination));
    }

    Ok(FieldMapping::new(entries)?)
}
