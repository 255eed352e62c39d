//! Ordinary Least Squares (OLS) regression wrapper
//!
//! The fit and the per-regressor inference come from `anofox-regression`.
//! The intercept row of the coefficient table is completed from the QR
//! factor of the design, since (X'X)⁻¹ = R⁻¹R⁻ᵀ.

use anofox_regression::prelude::*;
use faer::linalg::triangular_solve::solve_upper_triangular_in_place;
use faer::{Col, Mat, Par};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::{debug, warn};

use crate::diagnostics::{compute_aic_bic, durbin_watson, jarque_bera, log_likelihood, omnibus};
use crate::errors::{StatsError, StatsResult};
use crate::types::{FitResult, FitResultCore, FitResultDiagnostics, FitResultInference, OlsOptions};

/// Fit an OLS regression model
///
/// # Arguments
/// * `y` - Response variable (n observations)
/// * `x` - Feature columns (p features, each with n observations)
/// * `options` - Fitting options
///
/// # Returns
/// * `FitResult` containing coefficients (intercept first), goodness of fit,
///   residual diagnostics and optionally inference statistics
pub fn fit_ols(y: &[f64], x: &[Vec<f64>], options: &OlsOptions) -> StatsResult<FitResult> {
    // Validate inputs
    if y.is_empty() {
        return Err(StatsError::EmptyInput { field: "y" });
    }
    if x.is_empty() {
        return Err(StatsError::EmptyInput { field: "x" });
    }
    if !(options.confidence_level > 0.0 && options.confidence_level < 1.0) {
        return Err(StatsError::InvalidInput(format!(
            "confidence level {} must be in (0, 1)",
            options.confidence_level
        )));
    }

    let n_obs = y.len();
    let n_features = x.len();

    // Check all feature vectors have same length as y
    for col in x.iter() {
        if col.len() != n_obs {
            return Err(StatsError::DimensionMismatch {
                y_len: n_obs,
                x_rows: col.len(),
            });
        }
    }

    let n_params = if options.fit_intercept {
        n_features + 1
    } else {
        n_features
    };

    // Filter out rows with NaN values
    let valid_indices: Vec<usize> = (0..n_obs)
        .filter(|&i| y[i].is_finite() && x.iter().all(|col| col[i].is_finite()))
        .collect();

    if valid_indices.is_empty() {
        return Err(StatsError::NoValidData);
    }

    let n_valid = valid_indices.len();
    if n_valid < n_obs {
        debug!(dropped = n_obs - n_valid, "dropping rows with missing values");
    }
    if n_valid <= n_params {
        return Err(StatsError::InsufficientData {
            rows: n_valid,
            cols: n_params,
        });
    }

    // Convert to faer types
    let y_col = Col::from_fn(n_valid, |i| y[valid_indices[i]]);
    let x_mat = Mat::from_fn(n_valid, n_features, |i, j| x[j][valid_indices[i]]);
    let offset = usize::from(options.fit_intercept);
    let design = Mat::from_fn(n_valid, n_params, |i, j| {
        if j < offset {
            1.0
        } else {
            x[j - offset][valid_indices[i]]
        }
    });

    // Rank check from the singular values, relative to the largest one
    let singular = design.singular_values().map_err(|_| StatsError::SvdFailed)?;
    let s_max = singular.first().copied().unwrap_or(0.0);
    let s_min = singular.last().copied().unwrap_or(0.0);
    let tol = s_max * n_valid.max(n_params) as f64 * f64::EPSILON;
    if s_min <= tol {
        warn!(s_min, s_max, "design matrix is rank deficient");
        return Err(StatsError::SingularMatrix);
    }
    let condition_number = s_max / s_min;

    // Build and fit the model
    let fitted = OlsRegressor::builder()
        .with_intercept(options.fit_intercept)
        .confidence_level(options.confidence_level)
        .build()
        .fit(&x_mat, &y_col)
        .map_err(|e| StatsError::RegressError(format!("{:?}", e)))?;
    let result = fitted.result();

    let intercept = if options.fit_intercept {
        Some(result.intercept.ok_or_else(|| {
            StatsError::RegressError("intercept missing from the fitted model".into())
        })?)
    } else {
        None
    };
    let coefficients: Vec<f64> = intercept
        .into_iter()
        .chain(result.coefficients.iter().copied())
        .collect();

    // Residuals of the used observations, in input order
    let residuals: Vec<f64> = (0..n_valid)
        .map(|i| {
            let fitted: f64 = (0..n_params).map(|j| design[(i, j)] * coefficients[j]).sum();
            y_col[i] - fitted
        })
        .collect();
    let ssr: f64 = residuals.iter().map(|e| e * e).sum();

    let df_resid = n_valid - n_params;
    let df_model = n_features;
    let sigma2 = ssr / df_resid as f64;

    debug!(
        n = n_valid,
        params = n_params,
        r_squared = result.r_squared,
        condition_number,
        "OLS fit complete"
    );

    let inference = if options.compute_inference {
        let feature_values = |c: Option<&Col<f64>>| -> Vec<f64> {
            c.map(|c| c.iter().copied().collect())
                .unwrap_or_else(|| vec![f64::NAN; n_features])
        };
        let mut inference = FitResultInference {
            std_errors: feature_values(result.std_errors.as_ref()),
            t_values: feature_values(result.t_statistics.as_ref()),
            p_values: feature_values(result.p_values.as_ref()),
            ci_lower: feature_values(result.conf_interval_lower.as_ref()),
            ci_upper: feature_values(result.conf_interval_upper.as_ref()),
            confidence_level: options.confidence_level,
            f_statistic: result.f_statistic,
            f_pvalue: result.f_pvalue,
        };
        if let Some(b0) = intercept {
            let variance = sigma2 * inverse_gram_diagonal(&design)[0];
            prepend_intercept_row(&mut inference, b0, variance, df_resid)?;
        }
        Some(inference)
    } else {
        None
    };

    let diagnostics = compute_diagnostics(&residuals, ssr, n_valid, n_params, condition_number)?;

    let core = FitResultCore {
        coefficients,
        intercept,
        r_squared: result.r_squared,
        adj_r_squared: result.adj_r_squared,
        residual_std_error: sigma2.sqrt(),
        ssr,
        df_model,
        df_resid,
        n_observations: n_valid,
        n_features,
        residuals,
    };

    Ok(FitResult {
        core,
        inference,
        diagnostics,
    })
}

/// Diagonal of (X'X)⁻¹ from the triangular factor of X = QR
///
/// Entry i is the squared norm of row i of R⁻¹. No normal equations are
/// formed, so small-unit regressors keep their precision.
fn inverse_gram_diagonal(design: &Mat<f64>) -> Vec<f64> {
    let p = design.ncols();
    let qr = design.qr();
    let mut r_inv = Mat::<f64>::identity(p, p);
    solve_upper_triangular_in_place(qr.thin_R(), r_inv.as_mut(), Par::Seq);
    (0..p)
        .map(|i| (0..p).map(|j| r_inv[(i, j)].powi(2)).sum())
        .collect()
}

fn two_sided_p(dist: &StudentsT, t: f64) -> f64 {
    if t.is_nan() {
        f64::NAN
    } else if t.is_infinite() {
        0.0
    } else {
        2.0 * dist.sf(t.abs())
    }
}

/// Insert the intercept's t test and confidence bounds ahead of the regressors
fn prepend_intercept_row(
    inference: &mut FitResultInference,
    b0: f64,
    variance: f64,
    df_resid: usize,
) -> StatsResult<()> {
    let t_dist = StudentsT::new(0.0, 1.0, df_resid as f64)
        .map_err(|e| StatsError::InvalidInput(e.to_string()))?;
    let t_crit = t_dist.inverse_cdf((1.0 + inference.confidence_level) / 2.0);

    let se = variance.max(0.0).sqrt();
    let t = b0 / se;
    inference.std_errors.insert(0, se);
    inference.t_values.insert(0, t);
    inference.p_values.insert(0, two_sided_p(&t_dist, t));
    inference.ci_lower.insert(0, b0 - t_crit * se);
    inference.ci_upper.insert(0, b0 + t_crit * se);
    Ok(())
}

fn compute_diagnostics(
    residuals: &[f64],
    ssr: f64,
    n: usize,
    n_params: usize,
    condition_number: f64,
) -> StatsResult<FitResultDiagnostics> {
    let llf = log_likelihood(ssr, n)?;
    let (aic, bic) = compute_aic_bic(ssr, n, n_params)?;
    let omni = omnibus(residuals);
    let jb = jarque_bera(residuals)?;

    Ok(FitResultDiagnostics {
        log_likelihood: llf,
        aic,
        bic,
        omnibus: omni.statistic,
        omnibus_pvalue: omni.p_value,
        skew: jb.skewness,
        kurtosis: jb.kurtosis,
        durbin_watson: durbin_watson(residuals),
        jarque_bera: jb.statistic,
        jarque_bera_pvalue: jb.p_value,
        condition_number,
    })
}
