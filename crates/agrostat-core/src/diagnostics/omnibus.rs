//! D'Agostino-Pearson omnibus normality test
//!
//! Combines the D'Agostino skewness test and the Anscombe-Glynn kurtosis
//! test into K² = Zs² + Zk², which is chi-squared with 2 degrees of freedom
//! under normality.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use super::residuals::{kurtosis, skewness};

/// Minimum sample size for the skewness transform
pub const OMNIBUS_MIN_OBS: usize = 8;

/// Result of the omnibus test
#[derive(Debug, Clone, Copy)]
pub struct OmnibusResult {
    /// K² statistic
    pub statistic: f64,
    /// Chi-squared(2) upper-tail probability
    pub p_value: f64,
}

impl OmnibusResult {
    fn undefined() -> Self {
        Self {
            statistic: f64::NAN,
            p_value: f64::NAN,
        }
    }
}

/// Z-score of the sample skewness
pub fn skew_test(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let b2 = skewness(data);

    let mut y = b2 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    if y == 0.0 {
        y = 1.0;
    }
    let ya = y / alpha;
    delta * (ya + (ya * ya + 1.0).sqrt()).ln()
}

/// Z-score of the sample kurtosis
pub fn kurtosis_test(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let b2 = kurtosis(data);

    let expected = 3.0 * (n - 1.0) / (n + 1.0);
    let var_b2 =
        24.0 * n * (n - 2.0) * (n - 3.0) / ((n + 1.0) * (n + 1.0) * (n + 3.0) * (n + 5.0));
    let x = (b2 - expected) / var_b2.sqrt();

    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());

    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    (term1 - term2) / (2.0 / (9.0 * a)).sqrt()
}

/// Omnibus test on finite values of `data`.
///
/// Fewer than [`OMNIBUS_MIN_OBS`] observations give NaN statistic and p-value.
pub fn omnibus(data: &[f64]) -> OmnibusResult {
    let clean: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if clean.len() < OMNIBUS_MIN_OBS {
        return OmnibusResult::undefined();
    }

    let zs = skew_test(&clean);
    let zk = kurtosis_test(&clean);
    let statistic = zs * zs + zk * zk;
    if !statistic.is_finite() {
        return OmnibusResult {
            statistic,
            p_value: f64::NAN,
        };
    }

    let p_value = match ChiSquared::new(2.0) {
        Ok(dist) => dist.sf(statistic),
        Err(_) => f64::NAN,
    };
    OmnibusResult { statistic, p_value }
}
