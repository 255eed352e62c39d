//! Regression model wrappers

mod ols;

pub use ols::fit_ols;
