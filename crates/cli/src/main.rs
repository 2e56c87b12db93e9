use crate::{
    commands::{Commands, ConfigArgs},
    env::EnvManager,
    error::CliError,
    exit::ExitCode,
    logging::LogHandle,
};
use chrono::Local;
use clap::Parser;
use connectors::{file::csv::writer::CsvFileWriter, http::client::SalesApiClient};
use engine_config::{
    mapping::load_mapping,
    params::load_parameters,
    paths::{DATA_DIR_ENV, DataDir, OUTPUT_FILE_NAME},
    settings::{self, validated::ExtractorConfig},
};
use engine_processing::extractor::Extractor;
use model::transform::mapping::FieldMapping;
use std::path::PathBuf;
use tracing::{error, info};

mod commands;
mod env;
mod error;
mod exit;
mod logging;
mod output;

#[derive(Parser)]
#[command(
    name = "sales-extractor",
    version,
    about = "Extracts the sales summary report into CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Everything resolved before the first request.
struct Loaded {
    data_dir: DataDir,
    config: ExtractorConfig,
    mapping: FieldMapping,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let log = logging::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = ExitCode::for_usage(&e);
            if let Err(print_err) = e.print() {
                error!("Failed to print usage: {print_err}");
            }
            std::process::exit(code.as_i32());
        }
    };

    let result = match cli.command {
        Commands::Run {
            config,
            output_dir,
            report,
        } => run(&config, output_dir, report, &log).await,
        Commands::Validate { config } => validate(&config, &log),
    };

    let code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    };
    std::process::exit(code.as_i32());
}

async fn run(
    args: &ConfigArgs,
    output_dir: Option<PathBuf>,
    report: Option<PathBuf>,
    log: &LogHandle,
) -> Result<(), CliError> {
    let Loaded {
        data_dir,
        config,
        mapping,
    } = load(args, log)?;

    let client =
        SalesApiClient::new(config.base_url(), &config.credentials).map_err(CliError::Client)?;
    let extractor = Extractor::new(client, mapping, &config);

    let output_dir = resolve_output_dir(&data_dir, output_dir);
    let writer = CsvFileWriter::create(&output_dir, OUTPUT_FILE_NAME, extractor.columns().to_vec())
        .map_err(CliError::Output)?;

    let summary = extractor.run_scoped(writer).await?;
    info!(
        "Wrote {} row(s) to {}",
        summary.total_rows_written,
        output_dir.join(OUTPUT_FILE_NAME).display()
    );

    if let Some(path) = report {
        output::write_report(&summary, &path).await?;
        info!("Run summary written to {}", path.display());
    }

    Ok(())
}

fn validate(args: &ConfigArgs, log: &LogHandle) -> Result<(), CliError> {
    let Loaded {
        config, mapping, ..
    } = load(args, log)?;

    SalesApiClient::new(config.base_url(), &config.credentials).map_err(CliError::Client)?;

    info!(
        "Configuration is valid: {} establishment(s), {} mapped field(s)",
        config.establishments().len(),
        mapping.len()
    );
    output::print_columns(&mapping.output_columns());
    Ok(())
}

fn resolve_output_dir(data_dir: &DataDir, output_dir: Option<PathBuf>) -> PathBuf {
    output_dir.unwrap_or_else(|| data_dir.tables_out_dir())
}

fn load(args: &ConfigArgs, log: &LogHandle) -> Result<Loaded, CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = &args.env_file {
        env.load_from_file(path)?;
    }

    let data_dir = DataDir::resolve(args.data_dir.as_deref(), env.get(DATA_DIR_ENV));
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| data_dir.config_file());
    info!("Loading configuration from {}", config_path.display());

    let mut params = load_parameters(&config_path)?;
    params.apply_env(env.all());

    if params.debug == Some(true) {
        log.enable_debug();
        info!("Running version {}", env!("CARGO_PKG_VERSION"));
    }

    let config = settings::validate(&params, Local::now().date_naive())?;
    let mapping = load_mapping(&args.mapping)?;

    Ok(Loaded {
        data_dir,
        config,
        mapping,
    })
}
