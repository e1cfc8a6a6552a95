//! CSV point loader.
//!
//! Input files have no header and three positional columns:
//! `stock_id, DD-MM-YYYY, price`. Rows that do not coerce cleanly are dropped
//! before the series is sorted and sampled:
//! - field count other than 3
//! - non-UTF-8 bytes
//! - unparseable date
//! - unparseable or NaN price

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;

use crate::domain::{PricePoint, RecordSeries, SampledWindow, WindowError, WINDOW_LEN};
use crate::sampler::sample_window;

/// Date format of the timestamp column in input files.
pub const INPUT_DATE_FORMAT: &str = "%d-%m-%Y";

const FIELD_COUNT: usize = 3;

/// Errors from loading a single input file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("file is empty: {0}")]
    EmptyFile(PathBuf),

    #[error(
        "not enough data points in file {path}: need at least {min}, found {found}",
        min = WINDOW_LEN
    )]
    InsufficientPoints { path: PathBuf, found: usize },

    #[error("window sampling failed for {path}: {source}")]
    Window {
        path: PathBuf,
        #[source]
        source: WindowError,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Parse raw CSV rows into price points, dropping rows that fail coercion.
///
/// Returns the kept points in file order together with the number of rows read.
pub fn parse_rows<R: Read>(reader: R) -> Result<(Vec<PricePoint>, usize), csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut points = Vec::new();
    let mut rows = 0usize;
    let mut record = csv::ByteRecord::new();

    while rdr.read_byte_record(&mut record)? {
        rows += 1;
        if let Some(point) = coerce_row(&record) {
            points.push(point);
        }
    }

    Ok((points, rows))
}

fn coerce_row(record: &csv::ByteRecord) -> Option<PricePoint> {
    if record.len() != FIELD_COUNT {
        return None;
    }
    let stock_id = std::str::from_utf8(&record[0]).ok()?;
    let date = std::str::from_utf8(&record[1]).ok()?;
    let price = std::str::from_utf8(&record[2]).ok()?;

    let timestamp = NaiveDate::parse_from_str(date.trim(), INPUT_DATE_FORMAT).ok()?;
    let price: f64 = price.trim().parse().ok()?;
    if price.is_nan() {
        return None;
    }

    Some(PricePoint::new(stock_id, timestamp, price))
}

/// Load a file into a timestamp-sorted series of at least [`WINDOW_LEN`] points.
pub fn load_series(path: &Path) -> Result<RecordSeries, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (points, rows) = parse_rows(file).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    if rows == 0 {
        return Err(LoadError::EmptyFile(path.to_path_buf()));
    }
    if points.len() < WINDOW_LEN {
        return Err(LoadError::InsufficientPoints {
            path: path.to_path_buf(),
            found: points.len(),
        });
    }

    Ok(RecordSeries::from_unsorted(points))
}

/// Load a file and sample one window of consecutive points from it.
pub fn load_window_candidate<R: Rng + ?Sized>(
    path: &Path,
    rng: &mut R,
) -> Result<SampledWindow, LoadError> {
    let series = load_series(path)?;
    sample_window(&series, rng).map_err(|source| LoadError::Window {
        path: path.to_path_buf(),
        source,
    })
}
