//! PriceCast Core: domain types and the per-file pipeline stages.
//!
//! This crate contains everything that operates on a single input file:
//! - Domain types (price points, sorted series, windows, forecasts)
//! - CSV point loader with row coercion
//! - Window sampler with injected randomness
//! - Forecast heuristic
//! - Deterministic RNG hierarchy

pub mod data;
pub mod domain;
pub mod forecast;
pub mod rng;
pub mod sampler;

pub use data::{load_series, load_window_candidate, parse_rows, LoadError};
pub use domain::{
    ForecastTriple, OutputRecordSet, PricePoint, RecordSeries, SampledWindow, WindowError,
    FORECAST_LEN, OUTPUT_LEN, WINDOW_LEN,
};
pub use forecast::{forecast, ForecastError};
pub use rng::RngHierarchy;
pub use sampler::sample_window;
