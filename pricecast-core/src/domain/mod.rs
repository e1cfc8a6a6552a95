//! Domain types for PriceCast

pub mod price_point;
pub mod window;

pub use price_point::{PricePoint, RecordSeries};
pub use window::{ForecastTriple, OutputRecordSet, SampledWindow, WindowError};

/// Number of consecutive observed points in a sampled window.
pub const WINDOW_LEN: usize = 10;

/// Number of synthetic points projected past a window.
pub const FORECAST_LEN: usize = 3;

/// Rows in one output file: observed window plus forecast.
pub const OUTPUT_LEN: usize = WINDOW_LEN + FORECAST_LEN;
