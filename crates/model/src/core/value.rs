use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell of an output row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Boolean(bool),
    /// Nested arrays and objects are carried through as-is.
    Json(serde_json::Value),
    Null,
}

impl Value {
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Null)
                }
            }
            serde_json::Value::String(s) => Value::String(s.clone()),
            other => Value::Json(other.clone()),
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::Int(v) => Some(v.to_string()),
            Value::Uint(v) => Some(v.to_string()),
            // Integral floats keep their fractional part: `10.0`, not `10`.
            Value::Float(v) => Some(format!("{v:?}")),
            Value::String(v) => Some(v.clone()),
            Value::Boolean(true) => Some("True".to_string()),
            Value::Boolean(false) => Some("False".to_string()),
            Value::Json(v) => Some(v.to_string()),
            Value::Null => None,
        }
    }

    /// Text written into a delimited file; nulls become empty fields.
    pub fn to_field(&self) -> String {
        self.as_string().unwrap_or_default()
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            other => write!(f, "{}", other.to_field()),
        }
    }
}
