//! Plain-text reports shared by the terminal and the exporters
//!
//! A `Report` is an ordered list of titled sections of pre-rendered lines.
//! `Report::lines()` is the exact text the CLI prints and both exporters write.

mod crd;
mod regression;

pub use crd::crd_report;
pub use regression::regression_report;

use crate::export::{pdf::render_pdf, xlsx::render_xlsx, Artifact, PdfLayout, MIME_PDF, MIME_XLSX};
use crate::StatsResult;

/// Width of the fixed-layout summary tables
pub const REPORT_WIDTH: usize = 78;

/// A titled block of report lines
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub body: Vec<String>,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: Vec::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }

    /// Title line followed by the body
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(self.title.clone())
            .chain(self.body.iter().cloned())
            .collect()
    }
}

/// An ordered collection of sections
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Document title, used as PDF metadata
    pub title: String,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Every line of every section, in order
    pub fn lines(&self) -> Vec<String> {
        self.sections.iter().flat_map(|s| s.lines()).collect()
    }

    /// Render the report as `<stem>.pdf` and `<stem>.xlsx`
    pub fn artifacts(&self, stem: &str, layout: &PdfLayout) -> StatsResult<Vec<Artifact>> {
        Ok(vec![
            Artifact {
                file_name: format!("{}.pdf", stem),
                mime: MIME_PDF,
                bytes: render_pdf(self, layout)?,
            },
            Artifact {
                file_name: format!("{}.xlsx", stem),
                mime: MIME_XLSX,
                bytes: render_xlsx(self)?,
            },
        ])
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Format with `digits` significant digits, switching to exponent notation
/// for very small or very large magnitudes (like printf `%g`).
pub fn format_general(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let digits = digits.max(1);
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= digits as i32 {
        let s = format!("{:.*e}", digits - 1, value);
        // Rust prints `1.23e-5`; pad the exponent to two digits
        match s.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, magnitude) = match exp.strip_prefix('-') {
                    Some(m) => ('-', m),
                    None => ('+', exp),
                };
                format!("{}e{}{:0>2}", trim_zeros(mantissa), sign, magnitude)
            }
            None => s,
        }
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Right-aligned text table with columns sized to their widest cell
pub fn aligned_table(header: &[String], rows: &[Vec<String>], gap: usize) -> Vec<String> {
    let n_cols = header.len();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let render = |cells: &[String]| -> String {
        let parts: Vec<String> = (0..n_cols)
            .map(|i| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!("{:>width$}", cell, width = widths[i])
            })
            .collect();
        parts.join(&" ".repeat(gap))
    };

    std::iter::once(render(header))
        .chain(rows.iter().map(|r| render(r)))
        .collect()
}
