//! Fixed-length point groups: sampled window, forecast triple, output set.

use thiserror::Error;

use super::{PricePoint, FORECAST_LEN, OUTPUT_LEN, WINDOW_LEN};

/// Errors from window construction and sampling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("expected {expected} points in a window, got {0}", expected = WINDOW_LEN)]
    WrongLength(usize),

    #[error("not enough data points: need at least {min}, found {found}", min = WINDOW_LEN)]
    InsufficientPoints { found: usize },

    #[error("no valid window start for a series of {len} points")]
    NoValidStart { len: usize },
}

/// Exactly [`WINDOW_LEN`] consecutive points, in series order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledWindow {
    points: Vec<PricePoint>,
}

impl SampledWindow {
    /// Wrap `points` as a window. Rejects any length other than [`WINDOW_LEN`].
    pub fn new(points: Vec<PricePoint>) -> Result<Self, WindowError> {
        if points.len() != WINDOW_LEN {
            return Err(WindowError::WrongLength(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[WINDOW_LEN - 1]
    }

    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }
}

/// The three projected points following a window.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTriple {
    pub points: [PricePoint; FORECAST_LEN],
}

impl ForecastTriple {
    pub fn prices(&self) -> [f64; FORECAST_LEN] {
        [
            self.points[0].price,
            self.points[1].price,
            self.points[2].price,
        ]
    }
}

/// Observed window followed by its forecast: the rows of one output file.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecordSet {
    points: Vec<PricePoint>,
}

impl OutputRecordSet {
    pub fn new(window: SampledWindow, forecast: ForecastTriple) -> Self {
        let mut points = window.into_points();
        points.extend(forecast.points);
        debug_assert_eq!(points.len(), OUTPUT_LEN);
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
