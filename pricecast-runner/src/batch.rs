//! Batch orchestrator: walks exchanges and runs the per-file pipeline.
//!
//! For every exchange directory under the base directory:
//! 1. Select up to `files_per_exchange` CSV files
//! 2. Load each file and sample a window
//! 3. Project the forecast triple
//! 4. Write window + forecast to `output/{stem}_{timestamp}_predicted.csv`
//!
//! A failure for one file is logged and recorded in the [`RunSummary`]; the
//! run moves on to the next file. Only failing to create the output directory
//! or to list the base directory ends a run early.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use pricecast_core::rng::{SCOPE_SAMPLE, SCOPE_SELECT};
use pricecast_core::{
    forecast, load_window_candidate, ForecastError, LoadError, OutputRecordSet, RngHierarchy,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn, Span};

use crate::config::RunConfig;
use crate::export::{output_file_name, write_output_csv, ExportError};
use crate::selector::{is_output_path, select_files, OUTPUT_DIR_NAME};

/// Errors that end a run before any file is processed.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list base directory {path}: {source}")]
    ReadBaseDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single selected file produced no output.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Source of the run timestamp embedded in output file names.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A selected file that was skipped, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub master_seed: u64,
    pub output_dir: PathBuf,
    pub exchanges: Vec<String>,
    pub missing_exchanges: Vec<PathBuf>,
    pub files_selected: usize,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

impl RunSummary {
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Runs the sampling/forecast pipeline over every exchange in a base directory.
///
/// Holds the run's `batch_run` span; every event the runner emits is recorded
/// inside it, carrying the base directory and master seed.
pub struct BatchRunner<C: Clock = SystemClock> {
    config: RunConfig,
    rng: RngHierarchy,
    clock: C,
    span: Span,
}

impl BatchRunner<SystemClock> {
    pub fn new(config: RunConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> BatchRunner<C> {
    pub fn with_clock(config: RunConfig, clock: C) -> Self {
        let rng = match config.seed {
            Some(seed) => RngHierarchy::new(seed),
            None => RngHierarchy::from_entropy(),
        };
        let span = info_span!(
            "batch_run",
            base_dir = %config.base_dir.display(),
            seed = rng.master_seed()
        );
        Self {
            config,
            rng,
            clock,
            span,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn master_seed(&self) -> u64 {
        self.rng.master_seed()
    }

    /// Process every exchange directory under the base directory.
    pub fn run(&self) -> Result<RunSummary, BatchError> {
        let _enter = self.span.enter();

        let output_dir = self.config.output_dir();
        fs::create_dir_all(&output_dir).map_err(|source| BatchError::CreateOutputDir {
            path: output_dir.clone(),
            source,
        })?;

        let mut summary = RunSummary {
            master_seed: self.rng.master_seed(),
            output_dir: output_dir.clone(),
            ..RunSummary::default()
        };

        let exchanges = self.list_exchanges()?;
        info!(
            count = exchanges.len(),
            files_per_exchange = self.config.files_per_exchange,
            "starting batch run"
        );

        for exchange in exchanges {
            self.process_exchange(&exchange, &output_dir, &mut summary);
            summary.exchanges.push(exchange);
        }

        info!(
            written = summary.written_count(),
            skipped = summary.skipped_count(),
            missing_exchanges = summary.missing_exchanges.len(),
            "batch run complete"
        );
        Ok(summary)
    }

    /// Immediate subdirectories of the base directory, sorted by name.
    fn list_exchanges(&self) -> Result<Vec<String>, BatchError> {
        let base = &self.config.base_dir;
        let read_err = |source| BatchError::ReadBaseDir {
            path: base.clone(),
            source,
        };

        let mut exchanges = Vec::new();
        for entry in fs::read_dir(base).map_err(read_err)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    error!(error = %err, "failed to read base directory entry");
                    continue;
                }
            };
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == OUTPUT_DIR_NAME {
                continue;
            }
            exchanges.push(name);
        }
        exchanges.sort();
        Ok(exchanges)
    }

    fn process_exchange(&self, exchange: &str, output_dir: &Path, summary: &mut RunSummary) {
        let _span = info_span!("exchange", name = exchange).entered();
        let exchange_dir = self.config.base_dir.join(exchange);

        if !exchange_dir.exists() {
            warn!(path = %exchange_dir.display(), "directory not found, skipping");
            summary.missing_exchanges.push(exchange_dir);
            return;
        }
        if is_output_path(&exchange_dir) {
            info!(path = %exchange_dir.display(), "skipping output directory");
            return;
        }

        let mut rng = self.rng.rng_for(SCOPE_SELECT, exchange);
        let files = match select_files(&exchange_dir, self.config.files_per_exchange, &mut rng) {
            Ok(files) => files,
            Err(err) => {
                error!(error = %err, "file selection failed");
                return;
            }
        };
        info!(selected = files.len(), "sampled files");
        summary.files_selected += files.len();

        for path in files {
            match self.process_file(exchange, &path, output_dir) {
                Ok(written) => {
                    info!(path = %written.display(), "output saved");
                    summary.written.push(written);
                }
                Err(err) => {
                    error!(path = %path.display(), error = %err, "error processing file");
                    summary.skipped.push(SkippedFile {
                        path,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    /// Load, sample, forecast and write one file. Returns the written path.
    fn process_file(
        &self,
        exchange: &str,
        path: &Path,
        output_dir: &Path,
    ) -> Result<PathBuf, FileError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut rng = self
            .rng
            .rng_for(SCOPE_SAMPLE, &format!("{exchange}/{file_name}"));

        let window = load_window_candidate(path, &mut rng)?;
        debug!(
            path = %path.display(),
            start = %window.first().timestamp,
            end = %window.last().timestamp,
            "sampled window"
        );

        let triple = forecast(window.points())?;
        let records = OutputRecordSet::new(window, triple);

        let out_path = output_dir.join(output_file_name(path, self.clock.now()));
        write_output_csv(&out_path, &records)?;
        Ok(out_path)
    }
}
