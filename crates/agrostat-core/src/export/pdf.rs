//! PDF rendering with the built-in Courier font
//!
//! Built-in fonts use WinAnsiEncoding, which silently drops characters it
//! cannot encode. Such characters are drawn as `?` so that column alignment
//! survives.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::debug;

use crate::errors::{StatsError, StatsResult};
use crate::report::Report;

/// Courier advance width as a fraction of the font size
const COURIER_ADVANCE: f64 = 0.6;
const PT_TO_MM: f64 = 25.4 / 72.0;

/// Page geometry and section placement
#[derive(Debug, Clone)]
pub struct PdfLayout {
    /// Page width (default: A4, 210 mm)
    pub page_width_mm: f64,
    /// Page height (default: A4, 297 mm)
    pub page_height_mm: f64,
    /// Margin on every side (default: 15 mm)
    pub margin_mm: f64,
    /// Font size in points (default: 9)
    pub font_size_pt: f64,
    /// Baseline-to-baseline distance (default: 4.2 mm)
    pub line_height_mm: f64,
    /// Start every section on a new page
    pub page_per_section: bool,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 15.0,
            font_size_pt: 9.0,
            line_height_mm: 4.2,
            page_per_section: false,
        }
    }
}

impl PdfLayout {
    /// Layout with one section per page
    pub fn per_section() -> Self {
        Self {
            page_per_section: true,
            ..Default::default()
        }
    }

    /// Characters that fit between the margins
    pub fn chars_per_line(&self) -> usize {
        let printable = self.page_width_mm - 2.0 * self.margin_mm;
        let advance = self.font_size_pt * COURIER_ADVANCE * PT_TO_MM;
        ((printable / advance).floor() as usize).max(1)
    }

    /// Lines that fit between the margins
    pub fn lines_per_page(&self) -> usize {
        let printable = self.page_height_mm - 2.0 * self.margin_mm;
        ((printable / self.line_height_mm).floor() as usize).max(1)
    }

    /// Split a line into chunks no wider than the printable width
    pub fn wrap(&self, line: &str) -> Vec<String> {
        let width = self.chars_per_line();
        let chars: Vec<char> = line.chars().collect();
        if chars.len() <= width {
            return vec![line.to_string()];
        }
        chars.chunks(width).map(|c| c.iter().collect()).collect()
    }

    /// Distribute the report lines over pages
    pub fn paginate(&self, report: &Report) -> Vec<Vec<String>> {
        let per_page = self.lines_per_page();
        let mut pages: Vec<Vec<String>> = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for section in &report.sections {
            if self.page_per_section && !current.is_empty() {
                pages.push(std::mem::take(&mut current));
            }
            for line in section.lines() {
                for chunk in self.wrap(&line) {
                    if current.len() == per_page {
                        pages.push(std::mem::take(&mut current));
                    }
                    current.push(chunk);
                }
            }
        }
        if !current.is_empty() || pages.is_empty() {
            pages.push(current);
        }
        pages
    }
}

/// Characters above 0x7F that WinAnsiEncoding maps outside Latin-1
const WIN_ANSI_EXTRA: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•',
    '–', '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// Replace characters the built-in fonts cannot show, one for one
pub fn win_ansi_text(line: &str) -> String {
    line.chars()
        .map(|ch| match ch {
            ' '..='~' => ch,
            '\u{A0}' => ' ',
            '\u{A1}'..='\u{FF}' if ch != '\u{AD}' => ch,
            _ if WIN_ANSI_EXTRA.contains(&ch) => ch,
            _ => '?',
        })
        .collect()
}

fn pdf_error(e: printpdf::Error) -> StatsError {
    StatsError::Export(format!("PDF: {}", e))
}

/// Render the report as a PDF document
pub fn render_pdf(report: &Report, layout: &PdfLayout) -> StatsResult<Vec<u8>> {
    let width = Mm(layout.page_width_mm as f32);
    let height = Mm(layout.page_height_mm as f32);
    let (doc, first_page, first_layer) = PdfDocument::new(&report.title, width, height, "Layer 1");
    let font = doc.add_builtin_font(BuiltinFont::Courier).map_err(pdf_error)?;

    let pages = layout.paginate(report);
    for (index, lines) in pages.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);

        for (row, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = layout.page_height_mm - layout.margin_mm - (row + 1) as f64 * layout.line_height_mm;
            layer.use_text(
                win_ansi_text(line),
                layout.font_size_pt as f32,
                Mm(layout.margin_mm as f32),
                Mm(y as f32),
                &font,
            );
        }
    }

    let bytes = doc.save_to_bytes().map_err(pdf_error)?;
    debug!(pages = pages.len(), bytes = bytes.len(), "rendered PDF");
    Ok(bytes)
}
