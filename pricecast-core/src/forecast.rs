//! Forecast heuristic: three synthetic points past a sampled window.
//!
//! Given window prices `p[0..10]`:
//! - `day1 = second largest of p` (order statistic, so a repeated maximum counts twice)
//! - `day2 = day1 + (day1 - p[9]) / 2`
//! - `day3 = day2 + (day2 - day1) / 4`
//!
//! Every projected point carries the stock id of the window's first point and
//! is dated 1, 2 and 3 days after the window's last point.

use chrono::Days;
use thiserror::Error;

use crate::domain::{ForecastTriple, PricePoint, WINDOW_LEN};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    #[error("invalid input: expected {expected} consecutive data points, got {0}", expected = WINDOW_LEN)]
    WrongLength(usize),

    #[error("forecast date out of range after {0}")]
    DateOverflow(chrono::NaiveDate),
}

/// Project three points past `window`.
pub fn forecast(window: &[PricePoint]) -> Result<ForecastTriple, ForecastError> {
    if window.len() != WINDOW_LEN {
        return Err(ForecastError::WrongLength(window.len()));
    }

    let last = &window[WINDOW_LEN - 1];
    let stock_id = &window[0].stock_id;

    let day1 = second_highest(window);
    let day2 = day1 + (day1 - last.price) / 2.0;
    let day3 = day2 + (day2 - day1) / 4.0;

    let point = |offset: u64, price: f64| -> Result<PricePoint, ForecastError> {
        let timestamp = last
            .timestamp
            .checked_add_days(Days::new(offset))
            .ok_or(ForecastError::DateOverflow(last.timestamp))?;
        Ok(PricePoint::new(stock_id.clone(), timestamp, price))
    };

    Ok(ForecastTriple {
        points: [point(1, day1)?, point(2, day2)?, point(3, day3)?],
    })
}

fn second_highest(window: &[PricePoint]) -> f64 {
    let mut prices: Vec<f64> = window.iter().map(|p| p.price).collect();
    prices.sort_by(|a, b| b.total_cmp(a));
    prices[1]
}
