//! ANOVA, pairwise comparison and p-value matrix sections for a CRD analysis

use super::{aligned_table, Report, Section};
use crate::tests::{AnovaTable, PairwiseComparison, PairwiseMatrix, PairwiseMethod};

fn anova_section(anova: &AnovaTable) -> Section {
    let mut section = Section::new("ANOVA");

    let header: Vec<String> = ["", "df", "sum_sq", "mean_sq", "F", "PR(>F)"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows = vec![
        vec![
            "C(Treatment)".to_string(),
            format!("{:.1}", anova.treatment.df as f64),
            format!("{:.6}", anova.treatment.sum_sq),
            format!("{:.6}", anova.treatment.mean_sq),
            format!("{:.6}", anova.f_statistic),
            format!("{:.6}", anova.p_value),
        ],
        vec![
            "Residual".to_string(),
            format!("{:.1}", anova.residual.df as f64),
            format!("{:.6}", anova.residual.sum_sq),
            format!("{:.6}", anova.residual.mean_sq),
            "NaN".to_string(),
            "NaN".to_string(),
        ],
    ];
    let mut table = aligned_table(&header, &rows, 2);
    // Row labels read left-aligned
    for (line, label) in table.iter_mut().skip(1).zip(["C(Treatment)", "Residual"]) {
        let width = "C(Treatment)".len();
        let rest = line[width..].to_string();
        *line = format!("{:<width$}{}", label, rest, width = width);
    }
    for line in table {
        section.push(line);
    }

    section.push("");
    let header: Vec<String> = ["Treatment", "n", "mean", "std"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<Vec<String>> = anova
        .summaries
        .iter()
        .map(|s| {
            vec![
                s.label.clone(),
                s.n.to_string(),
                format!("{:.4}", s.mean),
                format!("{:.4}", s.std),
            ]
        })
        .collect();
    for line in aligned_table(&header, &rows, 2) {
        section.push(line);
    }
    section.push("");
    section.push(format!("Grand mean: {:.4}", anova.grand_mean));
    section.push(format!("CV (%): {:.2}", anova.cv_percent));
    section
}

fn pairwise_section(comparison: &PairwiseComparison) -> Section {
    let mut section = Section::new("LSD");

    let title = match comparison.method {
        PairwiseMethod::TukeyHsd => format!(
            "Multiple Comparison of Means - Tukey HSD, FWER={:.2}",
            comparison.alpha
        ),
        PairwiseMethod::FisherLsd => format!(
            "Multiple Comparison of Means - Fisher LSD, alpha={:.2}",
            comparison.alpha
        ),
    };
    let p_header = match comparison.method {
        PairwiseMethod::TukeyHsd => "p-adj",
        PairwiseMethod::FisherLsd => "p-value",
    };

    let header: Vec<String> = ["group1", "group2", "meandiff", p_header, "lower", "upper", "reject"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<Vec<String>> = comparison
        .rows
        .iter()
        .map(|r| {
            vec![
                r.group1.clone(),
                r.group2.clone(),
                format!("{:.4}", r.mean_diff),
                format!("{:.4}", r.p_value),
                format!("{:.4}", r.lower),
                format!("{:.4}", r.upper),
                if r.reject { "True" } else { "False" }.to_string(),
            ]
        })
        .collect();

    let table = aligned_table(&header, &rows, 1);
    let width = table
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0);

    section.push(title);
    section.push("=".repeat(width));
    let mut lines = table.into_iter();
    if let Some(head) = lines.next() {
        section.push(head);
    }
    section.push("-".repeat(width));
    for line in lines {
        section.push(line);
    }
    section.push("-".repeat(width));
    section
}

fn matrix_section(matrix: &PairwiseMatrix) -> Section {
    let mut section = Section::new("DMRT");
    section.push(format!("{} pairwise p-values", matrix.method.title()));

    let mut header = vec![String::new()];
    header.extend(matrix.labels.iter().cloned());
    let rows: Vec<Vec<String>> = matrix
        .labels
        .iter()
        .zip(&matrix.p_values)
        .map(|(label, row)| {
            std::iter::once(label.clone())
                .chain(row.iter().map(|p| format!("{:.6}", p)))
                .collect()
        })
        .collect();

    // Index column is left-aligned, values right-aligned
    let index_width = matrix.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    for (i, line) in aligned_table(&header, &rows, 2).into_iter().enumerate() {
        if i == 0 {
            section.push(line);
        } else {
            let label = &matrix.labels[i - 1];
            let rest: String = line.chars().skip(index_width).collect();
            section.push(format!("{:<w$}{}", label, rest, w = index_width));
        }
    }
    section
}

/// Build the CRD report: sections "ANOVA", "LSD" and "DMRT" in that order
pub fn crd_report(
    anova: &AnovaTable,
    comparison: &PairwiseComparison,
    matrix: &PairwiseMatrix,
) -> Report {
    let mut report = Report::new("CRD Summary");
    report.push(anova_section(anova));
    report.push(pairwise_section(comparison));
    report.push(matrix_section(matrix));
    report
}
