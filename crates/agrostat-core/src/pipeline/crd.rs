//! Completely randomized design pipeline: wide table -> long records ->
//! ANOVA, pairwise comparisons and p-value matrix -> summary report

use tracing::info;

use crate::data::{wide_to_long, LongTable, Table, TreatmentLabels};
use crate::errors::StatsResult;
use crate::export::{Artifact, PdfLayout};
use crate::report::{crd_report, Report};
use crate::tests::{
    one_way_anova, pairwise_comparison, pairwise_matrix, AnovaTable, MatrixOptions,
    PairwiseComparison, PairwiseMatrix, PairwiseOptions,
};

/// File stem of the exported CRD summary
pub const CRD_STEM: &str = "CRD_summary";

/// Options for a CRD analysis
#[derive(Debug, Clone, Default)]
pub struct CrdRequest {
    /// How rows map to treatments (default: row position)
    pub labels: TreatmentLabels,
    /// Pairwise mean comparison (default: Tukey HSD at 0.05)
    pub pairwise: PairwiseOptions,
    /// Rank-based p-value matrix (default: DSCF)
    pub matrix: MatrixOptions,
}

/// Result of a CRD run
#[derive(Debug, Clone)]
pub struct CrdOutcome {
    pub long: LongTable,
    pub anova: AnovaTable,
    pub comparison: PairwiseComparison,
    pub matrix: PairwiseMatrix,
    pub report: Report,
}

impl CrdOutcome {
    /// PDF and XLSX renderings of the summary, one section per PDF page
    pub fn artifacts(&self) -> StatsResult<Vec<Artifact>> {
        self.report.artifacts(CRD_STEM, &PdfLayout::per_section())
    }
}

/// Reshape the wide table and run the three analyses on the same groups
pub fn run_crd(table: &Table, request: &CrdRequest) -> StatsResult<CrdOutcome> {
    let long = wide_to_long(table, request.labels)?;
    let groups = long.groups();
    let labels = &long.labels;

    let anova = one_way_anova(&groups, labels)?;
    let comparison = pairwise_comparison(&groups, labels, &request.pairwise)?;
    let matrix = pairwise_matrix(&groups, labels, &request.matrix)?;

    info!(
        records = long.records.len(),
        treatments = long.n_treatments(),
        f = anova.f_statistic,
        p = anova.p_value,
        "CRD analysis complete"
    );

    let report = crd_report(&anova, &comparison, &matrix);
    Ok(CrdOutcome {
        long,
        anova,
        comparison,
        matrix,
        report,
    })
}
