//! Rescaling of raw cosine similarity into a display score.
//!
//! Raw similarities are min-max normalised over the current batch and then
//! stretched with `ln(1 + x * stretch) * multiplier`. With the defaults
//! (stretch 9, multiplier 100) the result lies in `[0, 100 * ln 10]`,
//! roughly `[0, 230]`.
//!
//! The stretched value is a display scale. It is neither a probability nor
//! a percentage; the batch-relative percentage is computed by the ranker.

use crate::config::ScalingConfig;

/// Min-max normalise `values` into `[0, 1)` with `epsilon` guarding the
/// denominator.
///
/// When every value is equal the output is all zeros: a flat distribution
/// collapses to a flat low score and only bonuses separate the listings.
pub fn min_max(values: &[f64], epsilon: f64) -> Vec<f64> {
    let Some((min, max)) = bounds(values) else {
        return Vec::new();
    };
    values
        .iter()
        .map(|v| (v - min) / (max - min + epsilon))
        .collect()
}

/// Monotonic log stretch applied after min-max scaling.
pub fn stretch(scaled: f64, config: &ScalingConfig) -> f64 {
    (scaled * config.stretch).ln_1p() * config.multiplier
}

/// Full rescale: min-max, then stretch.
pub fn rescale(similarities: &[f64], epsilon: f64, config: &ScalingConfig) -> Vec<f64> {
    min_max(similarities, epsilon)
        .into_iter()
        .map(|s| stretch(s, config))
        .collect()
}

/// Minimum and maximum of a slice, or `None` when it is empty.
pub fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn min_max_spans_zero_to_one() {
        let scaled = min_max(&[0.2, 0.5, 0.8], EPS);
        assert_eq!(scaled[0], 0.0);
        assert!((scaled[2] - 1.0).abs() < 1e-6);
        assert!(scaled[2] < 1.0);
        assert!((scaled[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn flat_input_collapses_to_zero() {
        let scaled = min_max(&[0.4, 0.4, 0.4], EPS);
        assert!(scaled.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(min_max(&[], EPS).is_empty());
        assert!(bounds(&[]).is_none());
    }

    #[test]
    fn stretch_maps_unit_interval() {
        let config = ScalingConfig::default();
        assert_eq!(stretch(0.0, &config), 0.0);
        let top = stretch(1.0, &config);
        assert!((top - 100.0 * 10f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn rescale_preserves_order() {
        let raw = [0.05, 0.9, 0.3, 0.31, 0.0];
        let out = rescale(&raw, EPS, &ScalingConfig::default());
        for i in 0..raw.len() {
            for j in 0..raw.len() {
                if raw[i] > raw[j] {
                    assert!(out[i] >= out[j], "order broken at {i},{j}");
                }
            }
        }
    }

    #[test]
    fn rescale_stays_in_display_range() {
        let out = rescale(&[0.0, 0.1, 1.0], EPS, &ScalingConfig::default());
        let ceiling = 100.0 * 10f64.ln();
        assert!(out.iter().all(|&s| (0.0..=ceiling).contains(&s)));
    }
}
