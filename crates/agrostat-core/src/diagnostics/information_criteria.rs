//! Gaussian log-likelihood and information criteria (AIC, BIC)

use std::f64::consts::PI;

use crate::errors::{StatsError, StatsResult};

/// Concentrated Gaussian log-likelihood of a least-squares fit
///
/// llf = -n/2 * ln(2π) - n/2 * ln(RSS/n) - n/2
///
/// A perfect fit (RSS = 0) has infinite likelihood.
pub fn log_likelihood(rss: f64, n: usize) -> StatsResult<f64> {
    if n == 0 {
        return Err(StatsError::InvalidInput("n must be > 0".into()));
    }
    if rss < 0.0 {
        return Err(StatsError::InvalidInput("RSS must be non-negative".into()));
    }

    let n_f = n as f64;
    let half_n = n_f / 2.0;
    Ok(-half_n * (2.0 * PI).ln() - half_n * (rss / n_f).ln() - half_n)
}

/// Compute AIC (Akaike Information Criterion)
///
/// AIC = -2 * llf + 2k
///
/// where k is the number of parameters including the intercept.
/// Lower AIC indicates better model fit (accounting for complexity).
pub fn compute_aic(rss: f64, n: usize, k: usize) -> StatsResult<f64> {
    let llf = log_likelihood(rss, n)?;
    Ok(-2.0 * llf + 2.0 * k as f64)
}

/// Compute BIC (Bayesian Information Criterion)
///
/// BIC = -2 * llf + k * ln(n)
///
/// BIC penalizes model complexity more heavily than AIC for larger samples.
pub fn compute_bic(rss: f64, n: usize, k: usize) -> StatsResult<f64> {
    let llf = log_likelihood(rss, n)?;
    Ok(-2.0 * llf + k as f64 * (n as f64).ln())
}

/// Compute both AIC and BIC
pub fn compute_aic_bic(rss: f64, n: usize, k: usize) -> StatsResult<(f64, f64)> {
    Ok((compute_aic(rss, n, k)?, compute_bic(rss, n, k)?))
}
