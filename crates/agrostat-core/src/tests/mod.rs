//! Statistical hypothesis testing for completely randomized designs
//!
//! - One-way ANOVA on grouped responses
//! - Pairwise mean comparisons (Tukey HSD, Fisher LSD)
//! - Rank-based pairwise p-value matrices (DSCF, Dunn)
//! - Studentized range distribution
//!
//! The ANOVA F test wraps the anofox-tests crate; the post-hoc procedures
//! have no counterpart there and are computed here.

pub mod nonparametric;

pub use nonparametric::{pairwise_matrix, MatrixMethod, MatrixOptions, PAdjust, PairwiseMatrix};
pub use parametric::one_way_anova;
pub use posthoc::{
    pairwise_comparison, PairwiseComparison, PairwiseMethod, PairwiseOptions, PairwiseRow,
};
pub use studentized_range::{ptukey, qtukey};

use crate::{StatsError, StatsResult};

/// One line of an ANOVA table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaRow {
    /// Degrees of freedom
    pub df: usize,
    /// Sum of squares
    pub sum_sq: f64,
    /// Mean square (sum of squares over df)
    pub mean_sq: f64,
}

/// Per-treatment descriptive statistics
#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentSummary {
    pub label: String,
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation (NaN for a single observation)
    pub std: f64,
}

/// Result of a one-way ANOVA
#[derive(Debug, Clone)]
pub struct AnovaTable {
    /// Between-treatment row, `C(Treatment)`
    pub treatment: AnovaRow,
    /// Within-treatment row, `Residual`
    pub residual: AnovaRow,
    /// F statistic
    pub f_statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Treatment summaries in label order
    pub summaries: Vec<TreatmentSummary>,
    /// Mean of all observations
    pub grand_mean: f64,
    /// Coefficient of variation, sqrt(MSE) / grand mean in percent
    pub cv_percent: f64,
    /// Total number of observations
    pub n: usize,
}

/// Convert anofox_tests StatError to our StatsError
fn convert_error(e: anofox_tests::StatError) -> StatsError {
    StatsError::TestError(e.to_string())
}

/// Filter non-finite values from a slice
fn filter_nan(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Clean groups and check that they line up with their labels
fn prepare_groups(groups: &[Vec<f64>], labels: &[String]) -> StatsResult<Vec<Vec<f64>>> {
    if groups.len() != labels.len() {
        return Err(StatsError::InvalidInput(format!(
            "{} groups but {} labels",
            groups.len(),
            labels.len()
        )));
    }
    let clean: Vec<Vec<f64>> = groups.iter().map(|g| filter_nan(g)).collect();
    if clean.len() < 2 {
        return Err(StatsError::InsufficientDataMsg(
            "at least 2 treatments are required".into(),
        ));
    }
    if let Some(i) = clean.iter().position(|g| g.is_empty()) {
        return Err(StatsError::InsufficientDataMsg(format!(
            "treatment '{}' has no observations",
            labels[i]
        )));
    }
    Ok(clean)
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// Pooled within-group mean square and its degrees of freedom
fn pooled_mse(groups: &[Vec<f64>]) -> StatsResult<(f64, usize)> {
    let n: usize = groups.iter().map(|g| g.len()).sum();
    let k = groups.len();
    if n <= k {
        return Err(StatsError::InsufficientDataMsg(format!(
            "{} observations in {} treatments leave no residual degrees of freedom",
            n, k
        )));
    }
    let ssw: f64 = groups
        .iter()
        .map(|g| {
            let m = mean(g);
            g.iter().map(|v| (v - m).powi(2)).sum::<f64>()
        })
        .sum();
    let df = n - k;
    Ok((ssw / df as f64, df))
}
