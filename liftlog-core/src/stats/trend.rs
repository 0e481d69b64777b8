//! Trend classifier
//!
//! Splits a chronologically ordered sample sequence (typically per-entry
//! weights for one exercise) into two halves and classifies the direction of
//! change between the half means.

use crate::types::Trend;
use serde::Deserialize;

/// Policy knobs for trend classification.
///
/// The canonical minimum sample count is 6; sequences shorter than the
/// minimum classify as [`Trend::InsufficientData`]. A permissive any-split
/// policy is expressible as `min_samples = 2`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TrendConfig {
    /// Minimum number of samples required before classifying
    pub min_samples: usize,
    /// Percent change above which the trend is improving
    pub improve_threshold_pct: f64,
    /// Percent change below which the trend is declining (negative)
    pub decline_threshold_pct: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_samples: 6,
            improve_threshold_pct: 5.0,
            decline_threshold_pct: -5.0,
        }
    }
}

/// Percent change between the means of the first `floor(n/2)` samples and
/// the remaining samples.
///
/// Returns `None` when either half is empty. A zero first-half mean yields
/// `Some(0.0)` rather than an undefined ratio, the same zero-base masking
/// the session comparator uses.
pub fn half_split_change(samples: &[f64]) -> Option<f64> {
    let mid = samples.len() / 2;
    let (first, second) = samples.split_at(mid);
    if first.is_empty() || second.is_empty() {
        return None;
    }

    let first_mean = mean(first);
    let second_mean = mean(second);
    if first_mean == 0.0 {
        return Some(0.0);
    }
    Some((second_mean - first_mean) / first_mean * 100.0)
}

/// Classify a sample sequence against the configured thresholds.
pub fn classify_trend(samples: &[f64], config: &TrendConfig) -> Trend {
    if samples.len() < config.min_samples {
        return Trend::InsufficientData;
    }

    match half_split_change(samples) {
        None => Trend::InsufficientData,
        Some(change) if change > config.improve_threshold_pct => Trend::Improving,
        Some(change) if change < config.decline_threshold_pct => Trend::Declining,
        Some(_) => Trend::Stable,
    }
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improving_sequence() {
        // First half mean 100, second half mean ~111.7
        let samples = [100.0, 100.0, 100.0, 110.0, 110.0, 115.0];
        assert_eq!(
            classify_trend(&samples, &TrendConfig::default()),
            Trend::Improving
        );
    }

    #[test]
    fn test_declining_sequence() {
        let samples = [100.0, 100.0, 100.0, 90.0, 88.0, 85.0];
        assert_eq!(
            classify_trend(&samples, &TrendConfig::default()),
            Trend::Declining
        );
    }

    #[test]
    fn test_stable_within_thresholds() {
        let samples = [100.0, 100.0, 100.0, 102.0, 103.0, 101.0];
        assert_eq!(
            classify_trend(&samples, &TrendConfig::default()),
            Trend::Stable
        );
    }

    #[test]
    fn test_below_minimum_is_insufficient() {
        // Three declining points, minimum-6 policy
        let samples = [100.0, 95.0, 90.0];
        assert_eq!(
            classify_trend(&samples, &TrendConfig::default()),
            Trend::InsufficientData
        );
    }

    #[test]
    fn test_permissive_policy_classifies_short_sequences() {
        let permissive = TrendConfig {
            min_samples: 2,
            ..Default::default()
        };
        assert_eq!(classify_trend(&[100.0, 120.0], &permissive), Trend::Improving);
        assert_eq!(classify_trend(&[100.0], &permissive), Trend::InsufficientData);
    }

    #[test]
    fn test_odd_length_gives_larger_second_half() {
        // n = 5: first 2 samples vs remaining 3
        let samples = [100.0, 100.0, 120.0, 120.0, 120.0];
        assert_eq!(half_split_change(&samples), Some(20.0));
    }

    #[test]
    fn test_zero_first_mean_is_masked_to_zero() {
        let samples = [0.0, 0.0, 0.0, 50.0, 50.0, 50.0];
        assert_eq!(half_split_change(&samples), Some(0.0));
        assert_eq!(
            classify_trend(&samples, &TrendConfig::default()),
            Trend::Stable
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(half_split_change(&[]), None);
        assert_eq!(
            classify_trend(&[], &TrendConfig::default()),
            Trend::InsufficientData
        );
    }
}
