//! Window sampler: picks a random run of consecutive points from a series.
//!
//! The start index is drawn uniformly from `[0, len - WINDOW_LEN - 1]`. The last
//! possible start (`len - WINDOW_LEN`) is never drawn, so a series of exactly
//! `WINDOW_LEN` points has no valid start and is rejected.

use rand::Rng;

use crate::domain::{RecordSeries, SampledWindow, WindowError, WINDOW_LEN};

/// Select a random window of [`WINDOW_LEN`] consecutive points.
pub fn sample_window<R: Rng + ?Sized>(
    series: &RecordSeries,
    rng: &mut R,
) -> Result<SampledWindow, WindowError> {
    let len = series.len();
    if len < WINDOW_LEN {
        return Err(WindowError::InsufficientPoints { found: len });
    }
    if len == WINDOW_LEN {
        return Err(WindowError::NoValidStart { len });
    }

    let max_start = len - WINDOW_LEN - 1;
    let start = rng.gen_range(0..=max_start);
    SampledWindow::new(series.points()[start..start + WINDOW_LEN].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use chrono::{Days, NaiveDate};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn series(n: usize) -> RecordSeries {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        RecordSeries::from_unsorted(
            (0..n)
                .map(|i| PricePoint::new("TSLA", start + Days::new(i as u64), i as f64))
                .collect(),
        )
    }

    #[test]
    fn short_series_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sample_window(&series(9), &mut rng).unwrap_err(),
            WindowError::InsufficientPoints { found: 9 }
        );
    }

    #[test]
    fn exactly_ten_points_has_no_valid_start() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sample_window(&series(10), &mut rng).unwrap_err(),
            WindowError::NoValidStart { len: 10 }
        );
    }

    #[test]
    fn eleven_points_always_start_at_zero() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let window = sample_window(&series(11), &mut rng).unwrap();
            assert_eq!(window.first().price, 0.0);
            assert_eq!(window.last().price, 9.0);
        }
    }

    #[test]
    fn final_window_is_never_selected() {
        let s = series(14);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let window = sample_window(&s, &mut rng).unwrap();
            // Start indices 0..=3 are eligible; 4 is excluded.
            assert!(window.first().price <= 3.0);
        }
    }

    #[test]
    fn window_is_contiguous() {
        let mut rng = StdRng::seed_from_u64(5);
        let window = sample_window(&series(40), &mut rng).unwrap();
        let first = window.first().price;
        for (i, p) in window.points().iter().enumerate() {
            assert_eq!(p.price, first + i as f64);
        }
    }

    #[test]
    fn same_seed_same_window() {
        let s = series(100);
        let a = sample_window(&s, &mut StdRng::seed_from_u64(77)).unwrap();
        let b = sample_window(&s, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }
}
