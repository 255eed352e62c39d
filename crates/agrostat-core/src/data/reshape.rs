//! Wide-to-long reshape for completely randomized design layouts
//!
//! Input rows are treatments and input columns are replications. Every
//! replication cell becomes exactly one long-format record; the
//! replication (column) name is not carried forward.

use std::collections::HashMap;

use tracing::debug;

use super::table::{Cell, Table};
use crate::errors::{StatsError, StatsResult};

/// How treatment identifiers are assigned to the rows of a wide table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreatmentLabels {
    /// Zero-based row position; every column is a replication
    #[default]
    RowPosition,
    /// The first column names the treatment; remaining columns are replications
    FirstColumn,
}

/// One observation: a treatment index and its response (None when the cell was empty)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongRecord {
    pub treatment: usize,
    pub response: Option<f64>,
}

/// Long-format ANOVA input
#[derive(Debug, Clone, PartialEq)]
pub struct LongTable {
    /// Treatment labels in first-seen order; `LongRecord::treatment` indexes this
    pub labels: Vec<String>,
    /// Records in row-major order of the source table
    pub records: Vec<LongRecord>,
}

impl LongTable {
    pub fn n_treatments(&self) -> usize {
        self.labels.len()
    }

    /// Number of records whose response is missing
    pub fn n_missing(&self) -> usize {
        self.records.iter().filter(|r| r.response.is_none()).count()
    }

    /// Responses grouped by treatment, missing values excluded
    pub fn groups(&self) -> Vec<Vec<f64>> {
        let mut groups = vec![Vec::new(); self.labels.len()];
        for record in &self.records {
            if let Some(v) = record.response {
                groups[record.treatment].push(v);
            }
        }
        let missing = self.n_missing();
        if missing > 0 {
            debug!(missing, "excluding missing responses from grouped data");
        }
        groups
    }
}

/// Reshape a wide treatment-by-replication table into long records
pub fn wide_to_long(table: &Table, labels: TreatmentLabels) -> StatsResult<LongTable> {
    let columns = table.columns();
    let (label_column, replications) = match labels {
        TreatmentLabels::RowPosition => (None, columns),
        TreatmentLabels::FirstColumn => match columns.split_first() {
            Some((first, rest)) => (Some(first), rest),
            None => return Err(StatsError::EmptyInput { field: "table" }),
        },
    };

    if replications.is_empty() {
        return Err(StatsError::EmptyInput {
            field: "replication columns",
        });
    }

    let n_rows = table.n_rows();
    let mut treatment_labels: Vec<String> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();
    let mut records = Vec::with_capacity(n_rows * replications.len());

    for row in 0..n_rows {
        let label = match label_column {
            Some(col) => match &col.cells[row] {
                Cell::Empty => {
                    return Err(StatsError::InvalidInput(format!(
                        "treatment label missing in column '{}' at row {}",
                        col.name, row
                    )))
                }
                cell => cell.to_string(),
            },
            None => row.to_string(),
        };
        let treatment = *index_of.entry(label.clone()).or_insert_with(|| {
            treatment_labels.push(label);
            treatment_labels.len() - 1
        });

        for col in replications {
            let response = match &col.cells[row] {
                Cell::Number(v) => Some(*v),
                Cell::Empty => None,
                Cell::Text(_) => {
                    if labels == TreatmentLabels::RowPosition {
                        debug!(
                            column = %col.name,
                            "text cell under row-position labels; the first column may hold treatment names"
                        );
                    }
                    return Err(StatsError::NonNumeric {
                        column: col.name.clone(),
                        row,
                    });
                }
            };
            records.push(LongRecord {
                treatment,
                response,
            });
        }
    }

    debug!(
        records = records.len(),
        treatments = treatment_labels.len(),
        "reshaped wide table"
    );

    Ok(LongTable {
        labels: treatment_labels,
        records,
    })
}
