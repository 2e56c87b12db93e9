use crate::file::csv::error::FileError;
use csv::{Writer, WriterBuilder};
use model::records::row::OutputRow;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Comma-separated output file with a fixed column set.
///
/// The header is written when the file is created, so it appears exactly
/// once no matter how many rows follow.
pub struct CsvFileWriter {
    writer: Writer<File>,
    path: PathBuf,
    columns: Vec<String>,
    rows_written: u64,
}

impl CsvFileWriter {
    pub fn create(dir: &Path, file_name: &str, columns: Vec<String>) -> Result<Self, FileError> {
        if columns.is_empty() {
            return Err(FileError::NoColumns);
        }

        fs::create_dir_all(dir).map_err(|source| FileError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;

        let path = dir.join(file_name);
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(&columns)?;

        info!("Opened {} with {} columns", path.display(), columns.len());

        Ok(CsvFileWriter {
            writer,
            path,
            columns,
            rows_written: 0,
        })
    }

    pub fn write_row(&mut self, row: &OutputRow) -> Result<(), FileError> {
        self.writer.write_record(row.to_record(&self.columns))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), FileError> {
        self.writer.flush()?;
        debug!("Flushed {} rows to {}", self.rows_written, self.path.display());
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }
}
