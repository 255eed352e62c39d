//! Regression pipeline: selected columns -> OLS -> summary report

use std::collections::HashSet;

use tracing::info;

use crate::data::Table;
use crate::errors::{StatsError, StatsResult};
use crate::export::{Artifact, PdfLayout};
use crate::models::fit_ols;
use crate::report::{regression_report, Report};
use crate::types::{FitResult, OlsOptions};

/// File stem of the exported regression summary
pub const REGRESSION_STEM: &str = "regression_summary";

/// A complete variable selection
#[derive(Debug, Clone)]
pub struct RegressionRequest {
    pub dependent: String,
    pub independent: Vec<String>,
    pub options: OlsOptions,
}

impl RegressionRequest {
    /// Returns `None` until both a dependent and at least one independent
    /// variable are selected.
    pub fn from_selection(
        dependent: Option<String>,
        independent: Vec<String>,
        options: OlsOptions,
    ) -> Option<Self> {
        let dependent = dependent.filter(|d| !d.is_empty())?;
        if independent.is_empty() {
            return None;
        }
        Some(Self {
            dependent,
            independent,
            options,
        })
    }

    fn validate(&self) -> StatsResult<()> {
        if self.independent.contains(&self.dependent) {
            return Err(StatsError::InvalidSelection(format!(
                "'{}' is selected as both dependent and independent",
                self.dependent
            )));
        }
        let mut seen = HashSet::new();
        for name in &self.independent {
            if !seen.insert(name) {
                return Err(StatsError::InvalidSelection(format!(
                    "independent variable '{}' is selected more than once",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Result of a regression run
#[derive(Debug, Clone)]
pub struct RegressionOutcome {
    pub dependent: String,
    pub regressors: Vec<String>,
    pub fit: FitResult,
    pub report: Report,
}

impl RegressionOutcome {
    /// PDF and XLSX renderings of the summary, sections flowing on one page
    pub fn artifacts(&self) -> StatsResult<Vec<Artifact>> {
        self.report.artifacts(REGRESSION_STEM, &PdfLayout::default())
    }
}

fn numeric_or_nan(table: &Table, name: &str) -> StatsResult<Vec<f64>> {
    Ok(table
        .numeric_column(name)?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

/// Fit the requested model on the table
pub fn run_regression(table: &Table, request: &RegressionRequest) -> StatsResult<RegressionOutcome> {
    request.validate()?;

    let y = numeric_or_nan(table, &request.dependent)?;
    let x = request
        .independent
        .iter()
        .map(|name| numeric_or_nan(table, name))
        .collect::<StatsResult<Vec<_>>>()?;

    let fit = fit_ols(&y, &x, &request.options)?;
    info!(
        dependent = %request.dependent,
        regressors = request.independent.len(),
        n = fit.core.n_observations,
        r_squared = fit.core.r_squared,
        "regression complete"
    );

    let report = regression_report(&fit, &request.dependent, &request.independent);
    Ok(RegressionOutcome {
        dependent: request.dependent.clone(),
        regressors: request.independent.clone(),
        fit,
        report,
    })
}
