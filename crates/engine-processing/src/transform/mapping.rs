use crate::{error::TransformError, transform::context::ContextColumns};
use model::{
    core::value::Value,
    records::row::{OutputRow, RawRow},
    transform::mapping::FieldMapping,
};

/// Renames report fields to output columns.
///
/// Only mapped fields are copied. A mapped field missing from the raw row
/// becomes an empty value.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    mapping: FieldMapping,
    columns: Vec<String>,
}

impl FieldMapper {
    pub fn new(mapping: FieldMapping) -> Self {
        let columns = mapping.output_columns();
        Self { mapping, columns }
    }

    /// Header of the output file.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn map_row(
        &self,
        raw: &RawRow,
        context: &ContextColumns,
    ) -> Result<OutputRow, TransformError> {
        let object = raw
            .as_object()
            .ok_or(TransformError::NotAnObject { found: raw.kind() })?;

        let mut row = OutputRow::default();
        for (source, destination) in self.mapping.iter() {
            let value = object.get(source).map(Value::from_json).unwrap_or(Value::Null);
            row.set(destination, value);
        }
        context.apply(&mut row);

        Ok(row)
    }
}
