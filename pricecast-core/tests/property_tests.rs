//! Property tests for pipeline invariants.
//!
//! Uses proptest to verify:
//! 1. Window shape: every sampled window has 10 points in non-decreasing time order
//! 2. Window exclusion: the final possible window is never chosen
//! 3. Short series: fewer than 11 points never yield a window
//! 4. Forecast determinism: same window, same three values
//! 5. Forecast anchoring: day1 is never above the window maximum

use chrono::{Days, NaiveDate};
use pricecast_core::{forecast, sample_window, PricePoint, RecordSeries, WINDOW_LEN};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (0.01..5000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

/// Points with day offsets in arbitrary order, possibly repeating.
fn arb_points(min: usize, max: usize) -> impl Strategy<Value = Vec<PricePoint>> {
    prop::collection::vec((0u64..400, arb_price()), min..max).prop_map(|rows| {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        rows.into_iter()
            .map(|(offset, price)| PricePoint::new("NVDA", base + Days::new(offset), price))
            .collect()
    })
}

fn arb_window() -> impl Strategy<Value = Vec<PricePoint>> {
    arb_points(WINDOW_LEN, WINDOW_LEN + 1).prop_map(|pts| {
        RecordSeries::from_unsorted(pts).points().to_vec()
    })
}

// ── 1. Window shape ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn sampled_window_is_ten_sorted_points(points in arb_points(11, 120), seed in any::<u64>()) {
        let series = RecordSeries::from_unsorted(points);
        let window = sample_window(&series, &mut StdRng::seed_from_u64(seed)).unwrap();

        prop_assert_eq!(window.points().len(), WINDOW_LEN);
        prop_assert!(window
            .points()
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }
}

// ── 2. Window exclusion ──────────────────────────────────────────────

proptest! {
    #[test]
    fn final_window_never_selected(len in 11usize..60, seed in any::<u64>()) {
        let base = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let points: Vec<PricePoint> = (0..len)
            .map(|i| PricePoint::new("AMD", base + Days::new(i as u64), i as f64))
            .collect();
        let series = RecordSeries::from_unsorted(points);

        let window = sample_window(&series, &mut StdRng::seed_from_u64(seed)).unwrap();
        let start = window.first().price as usize;
        prop_assert!(start < len - WINDOW_LEN);
        prop_assert_eq!(series.points()[start..start + WINDOW_LEN].to_vec(), window.points().to_vec());
    }
}

// ── 3. Short series ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn short_series_never_sample(points in arb_points(0, 11), seed in any::<u64>()) {
        let series = RecordSeries::from_unsorted(points);
        prop_assert!(sample_window(&series, &mut StdRng::seed_from_u64(seed)).is_err());
    }
}

// ── 4. Forecast determinism ──────────────────────────────────────────

proptest! {
    #[test]
    fn forecast_is_deterministic(window in arb_window()) {
        let a = forecast(&window).unwrap();
        let b = forecast(&window).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ── 5. Forecast anchoring ────────────────────────────────────────────

proptest! {
    #[test]
    fn day1_is_a_window_price_not_above_max(window in arb_window()) {
        let triple = forecast(&window).unwrap();
        let day1 = triple.points[0].price;
        let max = window.iter().map(|p| p.price).fold(f64::MIN, f64::max);

        prop_assert!(day1 <= max);
        prop_assert!(window.iter().any(|p| p.price == day1));
        prop_assert_eq!(&triple.points[0].stock_id, &window[0].stock_id);
    }
}
