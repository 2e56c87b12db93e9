use model::{
    core::value::Value,
    execution::request::{DateRange, EstablishmentId},
    records::row::{ESTABLISHMENT_ID, OutputRow, RANGE_FROM, RANGE_TO},
};

/// Columns stamped onto every row of one establishment's report.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextColumns {
    establishment: EstablishmentId,
    range_from: String,
    range_to: String,
}

impl ContextColumns {
    pub fn new(establishment: EstablishmentId, range: &DateRange) -> Self {
        Self {
            establishment,
            range_from: range.range_from(),
            range_to: range.range_to(),
        }
    }

    /// Overwrites any mapped column of the same name.
    pub fn apply(&self, row: &mut OutputRow) {
        row.set(ESTABLISHMENT_ID, Value::Uint(self.establishment.0));
        row.set(RANGE_FROM, Value::from(self.range_from.as_str()));
        row.set(RANGE_TO, Value::from(self.range_to.as_str()));
    }
}
