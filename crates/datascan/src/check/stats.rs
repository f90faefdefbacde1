//! Sample statistics for standardized scores.

use serde::{Deserialize, Serialize};

/// Mean and sample standard deviation of a sequence.
///
/// Moments are kept relative to the largest magnitude in the sequence, so
/// any finite input yields finite moments and z-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    count: usize,
    scale: f64,
    scaled_mean: f64,
    /// Standard deviation with an `n - 1` denominator, in scaled units.
    scaled_std_dev: f64,
}

impl SampleStats {
    /// Compute statistics for `values`.
    ///
    /// Returns `None` for fewer than two values, where the sample standard
    /// deviation is undefined. A sequence of identical values has a standard
    /// deviation of exactly zero.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let count = values.len();
        if count < 2 {
            return None;
        }

        let first = values[0];
        if values.iter().all(|&v| v == first) {
            return Some(Self {
                count,
                scale: 1.0,
                scaled_mean: first,
                scaled_std_dev: 0.0,
            });
        }

        let scale = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));

        // Welford's update over values in [-1, 1].
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for (k, &v) in values.iter().enumerate() {
            let x = v / scale;
            let delta = x - mean;
            mean += delta / (k + 1) as f64;
            m2 += delta * (x - mean);
        }

        Some(Self {
            count,
            scale,
            scaled_mean: mean,
            scaled_std_dev: (m2 / (count - 1) as f64).sqrt(),
        })
    }

    /// Number of values.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean.
    pub fn mean(&self) -> f64 {
        self.scaled_mean * self.scale
    }

    /// Sample standard deviation. May overflow to infinity for spreads near
    /// `f64::MAX`; [`z_score`](Self::z_score) does not.
    pub fn std_dev(&self) -> f64 {
        self.scaled_std_dev * self.scale
    }

    /// Returns true if scores cannot be computed (zero or non-finite spread).
    pub fn is_degenerate(&self) -> bool {
        self.scaled_std_dev == 0.0 || !self.scaled_std_dev.is_finite()
    }

    /// Standardized score of `value`; 0.0 when the spread is degenerate.
    pub fn z_score(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            (value / self.scale - self.scaled_mean) / self.scaled_std_dev
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_values() {
        assert!(SampleStats::from_values(&[]).is_none());
        assert!(SampleStats::from_values(&[4.0]).is_none());
    }

    #[test]
    fn test_sample_std_dev() {
        // Sample variance of 2, 4, 4, 4, 5, 5, 7, 9 is 32 / 7
        let stats = SampleStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count(), 8);
        assert!((stats.mean() - 5.0).abs() < 1e-12);
        assert!((stats.std_dev() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_identical_values_have_zero_spread() {
        let stats = SampleStats::from_values(&[0.1, 0.1, 0.1, 0.1]).unwrap();
        assert_eq!(stats.std_dev(), 0.0);
        assert_eq!(stats.mean(), 0.1);
        assert!(stats.is_degenerate());
        assert_eq!(stats.z_score(0.1), 0.0);
    }

    #[test]
    fn test_z_score() {
        let stats = SampleStats::from_values(&[1.0, 3.0]).unwrap();
        // mean 2, sample std sqrt(2)
        assert!((stats.z_score(3.0) - 1.0 / 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_values_near_f64_max_stay_finite() {
        let mut values = vec![1e307; 30];
        values.push(-1.7e308);

        let stats = SampleStats::from_values(&values).unwrap();
        assert!(!stats.is_degenerate());
        assert!(stats.mean().is_finite());

        let z = stats.z_score(-1.7e308);
        assert!(z.is_finite());
        assert!(z < -5.0);
        assert!(stats.z_score(1e307).abs() < 1.0);
    }

    #[test]
    fn test_scaling_preserves_z_scores() {
        let small = SampleStats::from_values(&[1.0, 2.0, 3.0, 10.0]).unwrap();
        let large = SampleStats::from_values(&[1e300, 2e300, 3e300, 1e301]).unwrap();
        assert!((small.z_score(10.0) - large.z_score(1e301)).abs() < 1e-9);
    }
}
