//! Univariate Gaussian distribution for speed likelihoods

use statrs::statistics::Statistics;
use std::f64::consts::PI;

/// Univariate Gaussian distribution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnivariateGaussian {
    /// Mean
    pub mean: f64,
    /// Variance
    pub variance: f64,
}

impl UnivariateGaussian {
    /// Create new Gaussian from mean and variance
    pub fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    /// Estimate from samples with the Bessel-corrected (n - 1) variance.
    ///
    /// Returns `None` when the variance is undefined or zero: fewer than two
    /// samples, or all samples equal.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.len() < 2 {
            return None;
        }

        let mean = samples.iter().mean();
        let variance = samples.iter().variance();

        if !variance.is_finite() || variance <= 0.0 {
            return None;
        }

        Some(Self::new(mean, variance))
    }

    /// Sample variance, NaN when undefined
    pub fn sample_variance(samples: &[f64]) -> f64 {
        samples.iter().variance()
    }

    /// Standard deviation
    pub fn std(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Probability density at x
    pub fn pdf(&self, x: f64) -> f64 {
        let diff = x - self.mean;
        1.0 / (2.0 * PI * self.variance).sqrt() * (-(diff * diff) / (2.0 * self.variance)).exp()
    }
}
