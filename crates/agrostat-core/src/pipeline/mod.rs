//! End-to-end analysis pipelines
//!
//! - `regression`: column selection, OLS fit and summary report
//! - `crd`: wide-to-long reshape, ANOVA, pairwise comparisons and summary report

pub mod crd;
pub mod regression;

pub use crd::{run_crd, CrdOutcome, CrdRequest, CRD_STEM};
pub use regression::{run_regression, RegressionOutcome, RegressionRequest, REGRESSION_STEM};
