//! Histogram distance functions.

use crate::error::{PhogError, PhogResult};

/// Distance used when ranking descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Sum of absolute differences
    #[default]
    L1,
    /// Σ (a-b)² / (a+b), skipping entries where both are zero
    ChiSquared,
}

fn check_lengths(a: &[f64], b: &[f64]) -> PhogResult<()> {
    if a.len() != b.len() {
        return Err(PhogError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// L1 (Manhattan) distance between two equal-length vectors.
pub fn l1_distance(a: &[f64], b: &[f64]) -> PhogResult<f64> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
}

/// Chi-squared distance between two equal-length non-negative vectors.
pub fn chi_squared_distance(a: &[f64], b: &[f64]) -> PhogResult<f64> {
    check_lengths(a, b)?;
    Ok(a.iter()
        .zip(b)
        .filter(|(x, y)| *x + *y > 0.0)
        .map(|(x, y)| (x - y) * (x - y) / (x + y))
        .sum())
}

impl DistanceMetric {
    pub fn compute(self, a: &[f64], b: &[f64]) -> PhogResult<f64> {
        match self {
            DistanceMetric::L1 => l1_distance(a, b),
            DistanceMetric::ChiSquared => chi_squared_distance(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_l1_distance() {
        let a = [0.0, 3.0, 31.0];
        let b = [1.0, 1.0, 31.0];
        assert_eq!(l1_distance(&a, &b).unwrap(), 3.0);
        assert_eq!(l1_distance(&b, &a).unwrap(), 3.0);
        assert_eq!(l1_distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_chi_squared_distance() {
        let a = [0.0, 4.0, 2.0];
        let b = [0.0, 0.0, 6.0];
        // 16/4 + 16/8
        assert_relative_eq!(chi_squared_distance(&a, &b).unwrap(), 6.0);
        assert_relative_eq!(chi_squared_distance(&b, &a).unwrap(), 6.0);
        assert_eq!(chi_squared_distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        let err = l1_distance(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err, PhogError::LengthMismatch { left: 2, right: 1 });
        assert!(DistanceMetric::ChiSquared.compute(&[], &[0.0]).is_err());
    }
}
