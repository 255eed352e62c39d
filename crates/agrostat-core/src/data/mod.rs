//! Tabular data: the in-memory table, file ingestion and the wide-to-long reshape

mod ingest;
mod reshape;
mod table;

pub use ingest::{load_table, read_table, FileFormat};
pub use reshape::{wide_to_long, LongRecord, LongTable, TreatmentLabels};
pub use table::{Cell, Column, Table};
