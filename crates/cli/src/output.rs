use crate::error::CliError;
use engine_processing::summary::RunSummary;
use std::path::Path;

fn generate_report_json(summary: &RunSummary) -> Result<String, CliError> {
    let json = serde_json::to_string_pretty(summary)?;
    Ok(json)
}

pub async fn write_report(summary: &RunSummary, path: &Path) -> Result<(), CliError> {
    let report_json = generate_report_json(summary)?;
    tokio::fs::write(path, report_json).await?;
    Ok(())
}

/// The CSV header line for `columns`.
pub fn header_line(columns: &[String]) -> String {
    columns.join(",")
}

pub fn print_columns(columns: &[String]) {
    println!("{}", header_line(columns));
}
