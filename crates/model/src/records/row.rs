use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ESTABLISHMENT_ID: &str = "establishment_id";
pub const RANGE_FROM: &str = "range_from";
pub const RANGE_TO: &str = "range_to";

/// Columns injected into every output row, in header order.
pub const CONTEXT_COLUMNS: [&str; 3] = [ESTABLISHMENT_ID, RANGE_FROM, RANGE_TO];

/// One report line item exactly as the API returned it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RawRow(serde_json::Value);

impl RawRow {
    pub fn new(value: serde_json::Value) -> Self {
        RawRow(value)
    }

    pub fn as_object(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.0.as_object()
    }

    /// Name of the JSON type, used when a row has the wrong shape.
    pub fn kind(&self) -> &'static str {
        match &self.0 {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }

    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for RawRow {
    fn from(value: serde_json::Value) -> Self {
        RawRow(value)
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
}

/// A mapped row keyed by destination column names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputRow {
    pub field_values: Vec<FieldValue>,
}

impl OutputRow {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values.iter().find(|f| f.name == field)
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .map(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }

    /// Sets `field`, replacing any value already stored under that name.
    pub fn set(&mut self, field: &str, value: Value) {
        match self.field_values.iter_mut().find(|f| f.name == field) {
            Some(existing) => existing.value = value,
            None => self.field_values.push(FieldValue {
                name: field.to_string(),
                value,
            }),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.field_values.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.field_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_values.is_empty()
    }

    /// Renders the row in the order of `columns`; absent columns are empty.
    pub fn to_record(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .map(|column| self.get_value(column).to_field())
            .collect()
    }
}
