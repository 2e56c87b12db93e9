use crate::error::SinkError;
use connectors::file::csv::writer::CsvFileWriter;
use model::records::row::OutputRow;

/// Destination for mapped rows. The column set is fixed when the sink is
/// opened and every row is written in that order.
pub trait RowSink {
    fn columns(&self) -> &[String];

    fn write_row(&mut self, row: &OutputRow) -> Result<(), SinkError>;

    /// Pushes buffered rows to the underlying storage.
    fn flush(&mut self) -> Result<(), SinkError>;
}

impl RowSink for CsvFileWriter {
    fn columns(&self) -> &[String] {
        CsvFileWriter::columns(self)
    }

    fn write_row(&mut self, row: &OutputRow) -> Result<(), SinkError> {
        CsvFileWriter::write_row(self, row)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        CsvFileWriter::flush(self)?;
        Ok(())
    }
}
