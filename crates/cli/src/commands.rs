use clap::{Args, Subcommand};
use engine_config::mapping::DEFAULT_MAPPING_FILE;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Download the sales summary report into a CSV file
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        #[arg(long, help = "Directory for the CSV output (default: <data-dir>/out/tables)")]
        output_dir: Option<PathBuf>,

        #[arg(long, help = "If specified, writes the JSON run summary to this file")]
        report: Option<PathBuf>,
    },
    /// Check configuration and mapping and print the output header
    Validate {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, help = "Data directory (default: $KBC_DATADIR or ./data)")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Config file path (default: <data-dir>/config.json)")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_MAPPING_FILE, help = "Field mapping file")]
    pub mapping: PathBuf,

    #[arg(long, help = "Optional .env file with SALES_API_* overrides")]
    pub env_file: Option<PathBuf>,
}
