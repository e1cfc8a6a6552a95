//! PriceCast Runner: batch orchestration over exchange directories.
//!
//! This crate builds on `pricecast-core` to provide:
//! - Random bounded file selection per exchange
//! - Run configuration (TOML + builder)
//! - CSV output writing with atomic rename
//! - The batch orchestrator and its run summary

pub mod batch;
pub mod config;
pub mod export;
pub mod selector;

pub use batch::{BatchError, BatchRunner, Clock, FileError, RunSummary, SkippedFile, SystemClock};
pub use config::{ConfigError, RunConfig, DEFAULT_FILES_PER_EXCHANGE};
pub use export::{export_points_csv, output_file_name, write_output_csv, ExportError};
pub use selector::{is_output_path, select_files, SelectError, OUTPUT_DIR_NAME};
