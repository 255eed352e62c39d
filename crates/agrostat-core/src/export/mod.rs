//! Report exporters
//!
//! - `pdf`: paginated monospaced text
//! - `xlsx`: one worksheet, one line per row in column A

pub mod pdf;
pub mod xlsx;

pub use pdf::{render_pdf, win_ansi_text, PdfLayout};
pub use xlsx::render_xlsx;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A downloadable rendering of a report
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}
