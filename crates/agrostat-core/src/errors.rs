use thiserror::Error;

/// Errors that can occur while loading data, computing statistics or exporting reports
#[derive(Error, Debug)]
pub enum StatsError {
    // Ingestion errors
    #[error("Unsupported file format: {0} (expected .csv or .xlsx)")]
    UnsupportedFormat(String),

    #[error("Failed to parse {format} input: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Input validation errors
    #[error("Empty input: {field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Column '{column}' has a non-numeric value at row {row}")]
    NonNumeric { column: String, row: usize },

    #[error("Invalid variable selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid alpha parameter: {0} (must be in (0, 1))")]
    InvalidAlpha(f64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient data: {rows} rows, {cols} features (need rows > features)")]
    InsufficientData { rows: usize, cols: usize },

    #[error("Insufficient data: {0}")]
    InsufficientDataMsg(String),

    #[error("All rows filtered due to missing values")]
    NoValidData,

    #[error("Dimension mismatch: y has {y_len} elements, X has {x_rows} rows")]
    DimensionMismatch { y_len: usize, x_rows: usize },

    // Numerical errors
    #[error("Matrix is singular or near-singular")]
    SingularMatrix,

    #[error("SVD failed to converge")]
    SvdFailed,

    // Backend errors
    #[error("anofox-regression error: {0}")]
    RegressError(String),

    #[error("anofox-tests error: {0}")]
    TestError(String),

    // Output errors
    #[error("Export error: {0}")]
    Export(String),
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
