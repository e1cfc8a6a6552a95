//! PricePoint: the fundamental price observation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single price observation for one stock on one calendar day.
///
/// Field names serialize to the output column headers
/// (`Stock-ID`, `Timestamp`, `Price`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(rename = "Stock-ID")]
    pub stock_id: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: NaiveDate,
    #[serde(rename = "Price")]
    pub price: f64,
}

impl PricePoint {
    pub fn new(stock_id: impl Into<String>, timestamp: NaiveDate, price: f64) -> Self {
        Self {
            stock_id: stock_id.into(),
            timestamp,
            price,
        }
    }
}

/// Points from one file, sorted ascending by timestamp.
///
/// The sort is stable: points sharing a timestamp keep their file order.
/// Duplicate timestamps are not collapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSeries {
    points: Vec<PricePoint>,
}

impl RecordSeries {
    /// Build a series from points in arbitrary order.
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
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
