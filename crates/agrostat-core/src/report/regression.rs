//! OLS summary in the conventional "OLS Regression Results" layout

use super::{format_general, Report, Section, REPORT_WIDTH};
use crate::types::FitResult;

/// Label on the left, value right-aligned to fill `width`
fn pair(label: &str, value: &str, width: usize) -> String {
    let pad = width.saturating_sub(label.chars().count());
    format!("{}{:>pad$}", label, value, pad = pad)
}

/// Two label/value pairs side by side, 78 columns wide
fn header_row(left: (&str, String), right: (&str, String)) -> String {
    format!("{}   {}", pair(left.0, &left.1, 38), pair(right.0, &right.1, 37))
}

fn fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Build the regression summary report
///
/// `regressors` names the feature columns in fit order; the intercept, when
/// present, is labelled `const`.
pub fn regression_report(fit: &FitResult, dependent: &str, regressors: &[String]) -> Report {
    let core = &fit.core;
    let diag = &fit.diagnostics;
    let double_rule = "=".repeat(REPORT_WIDTH);
    let single_rule = "-".repeat(REPORT_WIDTH);

    let (f_statistic, f_pvalue) = fit
        .inference
        .as_ref()
        .map(|inf| (inf.f_statistic, inf.f_pvalue))
        .unwrap_or((f64::NAN, f64::NAN));

    let mut section = Section::new(format!("{:^width$}", "OLS Regression Results", width = REPORT_WIDTH));
    section.push(double_rule.clone());
    section.push(header_row(
        ("Dep. Variable:", dependent.to_string()),
        ("R-squared:", fixed(core.r_squared, 3)),
    ));
    section.push(header_row(
        ("Model:", "OLS".to_string()),
        ("Adj. R-squared:", fixed(core.adj_r_squared, 3)),
    ));
    section.push(header_row(
        ("Method:", "Least Squares".to_string()),
        ("F-statistic:", format_general(f_statistic, 4)),
    ));
    section.push(header_row(
        ("No. Observations:", core.n_observations.to_string()),
        ("Prob (F-statistic):", format_general(f_pvalue, 3)),
    ));
    section.push(header_row(
        ("Df Residuals:", core.df_resid.to_string()),
        ("Log-Likelihood:", format_general(diag.log_likelihood, 5)),
    ));
    section.push(header_row(
        ("Df Model:", core.df_model.to_string()),
        ("AIC:", format_general(diag.aic, 4)),
    ));
    section.push(header_row(
        ("Covariance Type:", "nonrobust".to_string()),
        ("BIC:", format_general(diag.bic, 4)),
    ));
    section.push(double_rule.clone());

    // Coefficient table
    let mut names: Vec<String> = Vec::with_capacity(core.coefficients.len());
    if core.intercept.is_some() {
        names.push("const".to_string());
    }
    names.extend(regressors.iter().cloned());
    let name_width = names.iter().map(|n| n.chars().count() + 1).max().unwrap_or(0).max(10);

    match &fit.inference {
        Some(inf) => {
            let tail = (1.0 - inf.confidence_level) / 2.0;
            section.push(format!(
                "{:<nw$}{:>11}{:>11}{:>11}{:>11}{:>12}{:>12}",
                "",
                "coef",
                "std err",
                "t",
                "P>|t|",
                format!("[{}", format_general(tail, 3)),
                format!("{}]", format_general(1.0 - tail, 3)),
                nw = name_width
            ));
            section.push(single_rule.clone());
            for (i, name) in names.iter().enumerate() {
                section.push(format!(
                    "{:<nw$}{:>11.4}{:>11.3}{:>11.3}{:>11.3}{:>12.3}{:>12.3}",
                    name,
                    core.coefficients[i],
                    inf.std_errors[i],
                    inf.t_values[i],
                    inf.p_values[i],
                    inf.ci_lower[i],
                    inf.ci_upper[i],
                    nw = name_width
                ));
            }
        }
        None => {
            section.push(format!("{:<nw$}{:>11}", "", "coef", nw = name_width));
            section.push(single_rule.clone());
            for (name, coef) in names.iter().zip(&core.coefficients) {
                section.push(format!("{:<nw$}{:>11.4}", name, coef, nw = name_width));
            }
        }
    }
    section.push(double_rule.clone());

    // Residual diagnostics
    section.push(header_row(
        ("Omnibus:", fixed(diag.omnibus, 3)),
        ("Durbin-Watson:", fixed(diag.durbin_watson, 3)),
    ));
    section.push(header_row(
        ("Prob(Omnibus):", fixed(diag.omnibus_pvalue, 3)),
        ("Jarque-Bera (JB):", fixed(diag.jarque_bera, 3)),
    ));
    section.push(header_row(
        ("Skew:", fixed(diag.skew, 3)),
        ("Prob(JB):", fixed(diag.jarque_bera_pvalue, 3)),
    ));
    section.push(header_row(
        ("Kurtosis:", fixed(diag.kurtosis, 3)),
        ("Cond. No.", format_general(diag.condition_number, 3)),
    ));
    section.push(double_rule);

    let mut report = Report::new("Regression Summary");
    report.push(section);
    report
}
