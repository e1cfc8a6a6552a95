//! Data loading from per-stock CSV files

pub mod loader;

pub use loader::{load_series, load_window_candidate, parse_rows, LoadError, INPUT_DATE_FORMAT};
