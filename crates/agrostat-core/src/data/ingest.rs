//! File ingestion: delimited text and spreadsheet input
//!
//! The first row of either format is the header row.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use csv::{ReaderBuilder, Trim};
use tracing::info;

use super::table::{Cell, Table};
use crate::errors::{StatsError, StatsResult};

/// Supported input formats, selected by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-delimited text (`.csv`)
    Csv,
    /// Office Open XML workbook (`.xlsx`)
    Xlsx,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> StatsResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(FileFormat::Csv),
            Some("xlsx") => Ok(FileFormat::Xlsx),
            _ => Err(StatsError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Csv => "CSV",
            FileFormat::Xlsx => "XLSX",
        }
    }
}

/// Read a file from disk, choosing the parser from its extension
pub fn load_table(path: &Path) -> StatsResult<Table> {
    let format = FileFormat::from_path(path)?;
    let bytes = fs::read(path)?;
    read_table(&bytes, format)
}

/// Parse an in-memory byte stream in the declared format
pub fn read_table(bytes: &[u8], format: FileFormat) -> StatsResult<Table> {
    let table = match format {
        FileFormat::Csv => read_csv(bytes)?,
        FileFormat::Xlsx => read_xlsx(bytes)?,
    };
    info!(
        format = format.name(),
        rows = table.n_rows(),
        cols = table.n_cols(),
        "table loaded"
    );
    Ok(table)
}

fn csv_error(e: csv::Error) -> StatsError {
    StatsError::Parse {
        format: "CSV",
        message: e.to_string(),
    }
}

fn read_csv(bytes: &[u8]) -> StatsResult<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(Cell::parse).collect());
    }

    Table::from_rows(headers, rows)
}

fn xlsx_error(message: impl ToString) -> StatsError {
    StatsError::Parse {
        format: "XLSX",
        message: message.to_string(),
    }
}

fn read_xlsx(bytes: &[u8]) -> StatsResult<Table> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).map_err(xlsx_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(StatsError::EmptyInput { field: "workbook" })?
        .map_err(xlsx_error)?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or(StatsError::EmptyInput { field: "header row" })?
        .iter()
        .map(|d| d.to_string())
        .collect();

    let body = rows.map(|row| row.iter().map(data_to_cell).collect()).collect();
    Table::from_rows(headers, body)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) => Cell::parse(s),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
        Data::Empty => Cell::Empty,
    }
}
