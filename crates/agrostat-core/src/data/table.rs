//! Column-oriented table built once at ingestion time

use std::collections::HashMap;
use std::fmt;

use crate::errors::{StatsError, StatsResult};

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Classify a raw text field: blank or NaN is `Empty`, a finite number is
    /// `Number`, anything else (including infinities) is `Text`
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            Ok(v) if v.is_nan() => Cell::Empty,
            _ => Cell::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            Cell::Number(v) => write!(f, "{}", v),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Empty => write!(f, "NaN"),
        }
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

/// Ordered named columns of equal length
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from a header row and data rows.
    ///
    /// Blank headers become `Unnamed: <index>` and repeated headers are
    /// suffixed `.1`, `.2`, ... so that every column name is unique.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> StatsResult<Self> {
        if headers.is_empty() {
            return Err(StatsError::EmptyInput { field: "header row" });
        }

        let names = unique_names(headers);
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column {
                name,
                cells: Vec::with_capacity(rows.len()),
            })
            .collect();

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() > columns.len() {
                return Err(StatsError::Parse {
                    format: "table",
                    message: format!(
                        "row {} has {} fields but the header has {}",
                        i + 1,
                        row.len(),
                        columns.len()
                    ),
                });
            }
            let width = row.len();
            for (col, cell) in columns.iter_mut().zip(row) {
                col.cells.push(cell);
            }
            // Short rows are padded with empty cells
            for col in columns.iter_mut().skip(width) {
                col.cells.push(Cell::Empty);
            }
        }

        Ok(Self { columns })
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> StatsResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| StatsError::ColumnNotFound(name.to_string()))
    }

    /// Numeric view of a column; `Empty` cells are `None`, text cells are an error
    pub fn numeric_column(&self, name: &str) -> StatsResult<Vec<Option<f64>>> {
        let column = self.column(name)?;
        column
            .cells
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Cell::Number(v) => Ok(Some(*v)),
                Cell::Empty => Ok(None),
                Cell::Text(_) => Err(StatsError::NonNumeric {
                    column: column.name.clone(),
                    row,
                }),
            })
            .collect()
    }

    /// Render the first `n` rows as an aligned text block with a row index
    pub fn preview(&self, n: usize) -> String {
        let n = n.min(self.n_rows());
        let index: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let index_width = index.iter().map(|s| s.len()).max().unwrap_or(0);

        let rendered: Vec<(String, Vec<String>, usize)> = self
            .columns
            .iter()
            .map(|col| {
                let values: Vec<String> = col.cells[..n].iter().map(|c| c.to_string()).collect();
                let width = values
                    .iter()
                    .map(|s| s.chars().count())
                    .chain(std::iter::once(col.name.chars().count()))
                    .max()
                    .unwrap_or(0);
                (col.name.clone(), values, width)
            })
            .collect();

        let mut out = String::new();
        out.push_str(&" ".repeat(index_width));
        for (name, _, width) in &rendered {
            out.push_str(&format!("  {:>width$}", name, width = *width));
        }
        for (i, idx) in index.iter().enumerate() {
            out.push('\n');
            out.push_str(&format!("{:<width$}", idx, width = index_width));
            for (_, values, width) in &rendered {
                out.push_str(&format!("  {:>width$}", values[i], width = *width));
            }
        }
        out
    }
}

fn unique_names(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let base = if raw.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                raw.trim().to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base.clone()
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}
