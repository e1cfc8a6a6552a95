//! PriceCast CLI: sample exchange CSVs and write three-day forecast files.
//!
//! Usage: `pricecast <INPUT_FOLDER> [--num-files N] [--seed S] [--config FILE] [--json]`
//!
//! Every error is logged; the process exits normally once the run finishes.

use anyhow::{Context, Result};
use clap::Parser;
use pricecast_runner::{BatchRunner, RunConfig};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    name = "pricecast",
    about = "Stock price prediction: sample windows per exchange and project three days ahead"
)]
struct Cli {
    /// Path to the stock data directory (one subdirectory per exchange).
    input_folder: PathBuf,

    /// Number of files to sample per exchange.
    #[arg(long, alias = "num_files")]
    num_files: Option<usize>,

    /// Master seed for reproducible file and window sampling.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML run config. Flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON on stdout.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    /// Merge the optional config file with command-line flags.
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RunConfig::new(&self.input_folder),
        };
        config.base_dir = self.input_folder.clone();
        if let Some(n) = self.num_files {
            config.files_per_exchange = n;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(console_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.run_config()?;
    let runner = BatchRunner::new(config);
    let summary = runner.run().context("batch run failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(&cli) {
        error!(error = %format!("{err:#}"), "error in main function");
    }
    Ok(())
}
