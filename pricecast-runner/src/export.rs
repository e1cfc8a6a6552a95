//! Output writer: CSV serialization of forecast record sets.
//!
//! Each output file has a `Stock-ID,Timestamp,Price` header followed by the
//! 10 observed and 3 projected rows. Dates are written as `YYYY-MM-DD`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use pricecast_core::{OutputRecordSet, PricePoint};
use thiserror::Error;

/// Format of the run timestamp embedded in output file names.
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const OUTPUT_SUFFIX: &str = "_predicted.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}; temp file {tmp} left behind: {cleanup}")]
    TmpLeftBehind {
        path: PathBuf,
        tmp: PathBuf,
        #[source]
        source: std::io::Error,
        cleanup: std::io::Error,
    },
}

/// Output file name for `input`: `{stem}_{YYYYMMDDHHMMSS}_predicted.csv`.
pub fn output_file_name(input: &Path, run_timestamp: NaiveDateTime) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "{stem}_{}{OUTPUT_SUFFIX}",
        run_timestamp.format(RUN_TIMESTAMP_FORMAT)
    )
}

/// Serialize points as CSV bytes with a header row.
pub fn export_points_csv(points: &[PricePoint]) -> Result<Vec<u8>, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for point in points {
        wtr.serialize(point)?;
    }
    wtr.into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))
}

/// Write a record set to `path`.
///
/// Writes go to a `.tmp` sibling first and are renamed into place, so a
/// reader never sees a half-written file under the final name. On failure the
/// temp file is removed.
pub fn write_output_csv(path: &Path, records: &OutputRecordSet) -> Result<(), ExportError> {
    let data = export_points_csv(records.points())?;
    let tmp_path = path.with_extension("csv.tmp");

    fs::write(&tmp_path, &data)
        .and_then(|()| fs::rename(&tmp_path, path))
        .map_err(|source| discard_tmp(path, &tmp_path, source))
}

/// Remove a failed write's temp file and build the error to report.
fn discard_tmp(path: &Path, tmp_path: &Path, source: std::io::Error) -> ExportError {
    match fs::remove_file(tmp_path) {
        Err(cleanup) if cleanup.kind() != ErrorKind::NotFound => ExportError::TmpLeftBehind {
            path: path.to_path_buf(),
            tmp: tmp_path.to_path_buf(),
            source,
            cleanup,
        },
        _ => ExportError::Io {
            path: path.to_path_buf(),
            source,
        },
    }
}
