//! Diagnostic functions for regression models

mod information_criteria;
mod jarque_bera;
mod omnibus;
mod residuals;

pub use information_criteria::{compute_aic, compute_aic_bic, compute_bic, log_likelihood};
pub use jarque_bera::{jarque_bera, JarqueBeraResult};
pub use omnibus::{kurtosis_test, omnibus, skew_test, OmnibusResult, OMNIBUS_MIN_OBS};
pub use residuals::{central_moments, durbin_watson, kurtosis, skewness};
