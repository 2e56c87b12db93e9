use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;
use std::{collections::HashMap, fs, path::Path};
use tracing::debug;

pub const ENV_URL: &str = "SALES_API_URL";
pub const ENV_API_KEY: &str = "SALES_API_KEY";
pub const ENV_API_SECRET: &str = "SALES_API_SECRET";

/// `config.json` as written by the orchestrator.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub parameters: RawParameters,
}

/// Parameters exactly as configured, before validation.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RawParameters {
    pub url: Option<String>,
    pub api_key: Option<String>,
    #[serde(rename = "#api_secret")]
    pub api_secret: Option<String>,
    /// Comma-separated string, a single number, or a list of either.
    pub establishment_id: Option<Value>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(deserialize_with = "flexible_bool")]
    pub show_opened: Option<bool>,
    #[serde(deserialize_with = "flexible_bool")]
    pub show_unpaid: Option<bool>,
    #[serde(deserialize_with = "flexible_bool")]
    pub show_irregular: Option<bool>,
    #[serde(deserialize_with = "flexible_bool")]
    pub debug: Option<bool>,
    #[serde(deserialize_with = "flexible_bool")]
    pub fail_on_transient_error: Option<bool>,
}

impl RawParameters {
    /// Environment values win over the file for the connection settings.
    pub fn apply_env(&mut self, vars: &HashMap<String, String>) {
        let pick = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = pick(ENV_URL) {
            debug!("Using {ENV_URL} from environment");
            self.url = Some(url);
        }
        if let Some(key) = pick(ENV_API_KEY) {
            debug!("Using {ENV_API_KEY} from environment");
            self.api_key = Some(key);
        }
        if let Some(secret) = pick(ENV_API_SECRET) {
            debug!("Using {ENV_API_SECRET} from environment");
            self.api_secret = Some(secret);
        }
    }
}

pub fn load_parameters(path: &Path) -> Result<RawParameters, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;

    let file: ConfigFile = serde_json::from_str(&text).map_err(|source| ConfigError::ParseFile {
        path: path.display().to_string(),
        source,
    })?;

    Ok(file.parameters)
}

/// Accepts `true`/`false`, `0`/`1` and their string forms. Empty strings
/// and `null` leave the default in place.
fn flexible_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Ok(Some(false)),
            Some(1) => Ok(Some(true)),
            _ => Err(D::Error::custom(format!("expected 0 or 1, got {n}"))),
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("expected a boolean, got '{other}'"))),
        },
        Some(other) => Err(D::Error::custom(format!("expected a boolean, got {other}"))),
    }
}
