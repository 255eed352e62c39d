//! Jarque-Bera test for normality
//!
//! The Jarque-Bera test is used to check if sample data has skewness and kurtosis
//! matching a normal distribution.

use super::residuals::central_moments;
use crate::errors::{StatsError, StatsResult};

/// Result of Jarque-Bera test
#[derive(Debug, Clone)]
pub struct JarqueBeraResult {
    /// JB test statistic
    pub statistic: f64,
    /// p-value for the test
    pub p_value: f64,
    /// Sample skewness
    pub skewness: f64,
    /// Sample kurtosis (Pearson, not excess)
    pub kurtosis: f64,
    /// Number of observations
    pub n: usize,
}

/// Compute the Jarque-Bera test statistic for normality
///
/// # Arguments
/// * `data` - Sample data (typically residuals)
///
/// # Returns
/// JarqueBeraResult with test statistic, p-value, skewness, and kurtosis.
/// Constant data yields NaN moments and statistic.
pub fn jarque_bera(data: &[f64]) -> StatsResult<JarqueBeraResult> {
    // Filter NaN values
    let clean_data: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
    let n = clean_data.len();

    if n < 3 {
        return Err(StatsError::InsufficientDataMsg(
            "Jarque-Bera test requires at least 3 observations".into(),
        ));
    }

    let (m2, m3, m4) = central_moments(&clean_data).ok_or(StatsError::NoValidData)?;

    let (skewness, kurtosis) = if m2 > 0.0 {
        (m3 / m2.powf(1.5), m4 / (m2 * m2))
    } else {
        (f64::NAN, f64::NAN)
    };

    // JB = n/6 * (S^2 + (K - 3)^2 / 4)
    let excess = kurtosis - 3.0;
    let jb_stat = (n as f64 / 6.0) * (skewness * skewness + excess * excess / 4.0);

    // Survival function of chi-squared(2) is exactly exp(-x/2)
    let p_value = (-jb_stat / 2.0).exp();

    Ok(JarqueBeraResult {
        statistic: jb_stat,
        p_value,
        skewness,
        kurtosis,
        n,
    })
}
