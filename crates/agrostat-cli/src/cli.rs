//! CLI argument parsing for agrostat

use std::path::PathBuf;

use agrostat_core::tests::{MatrixMethod, PAdjust, PairwiseMethod};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "agrostat")]
#[command(version)]
#[command(about = "Regression and completely randomized design ANOVA for CSV/XLSX data", long_about = None)]
pub struct Cli {
    /// Log debug output to stderr (otherwise RUST_LOG applies, default warn)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the columns of a data file and preview its first rows
    Columns(InputArgs),

    /// Ordinary least squares regression with an intercept
    Regress(RegressArgs),

    /// One-way ANOVA with pairwise comparisons for a completely randomized design
    Crd(CrdArgs),
}

#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Input data file (.csv or .xlsx)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Directory for the PDF and XLSX summaries
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Print the report without writing any files
    #[arg(long = "no-export")]
    pub no_export: bool,
}

#[derive(Debug, Args, Clone)]
pub struct RegressArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Dependent (response) column
    #[arg(short = 'y', long, value_name = "COL")]
    pub dependent: Option<String>,

    /// Independent (regressor) columns
    #[arg(short = 'x', long, value_name = "COL", num_args = 1..)]
    pub independent: Vec<String>,

    /// Confidence level for coefficient intervals
    #[arg(long, value_name = "LEVEL", default_value_t = 0.95)]
    pub confidence: f64,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Pairwise mean comparison procedure
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PairwiseArg {
    /// Tukey HSD (default)
    Tukey,
    /// Fisher LSD, unadjusted
    Lsd,
}

impl From<PairwiseArg> for PairwiseMethod {
    fn from(arg: PairwiseArg) -> Self {
        match arg {
            PairwiseArg::Tukey => PairwiseMethod::TukeyHsd,
            PairwiseArg::Lsd => PairwiseMethod::FisherLsd,
        }
    }
}

/// Rank-based p-value matrix procedure
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatrixArg {
    /// Dwass-Steel-Critchlow-Fligner (default)
    Dscf,
    /// Dunn's test
    Dunn,
}

impl From<MatrixArg> for MatrixMethod {
    fn from(arg: MatrixArg) -> Self {
        match arg {
            MatrixArg::Dscf => MatrixMethod::Dscf,
            MatrixArg::Dunn => MatrixMethod::Dunn,
        }
    }
}

/// Multiplicity adjustment for Dunn's test
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PAdjustArg {
    None,
    Bonferroni,
    Holm,
}

impl From<PAdjustArg> for PAdjust {
    fn from(arg: PAdjustArg) -> Self {
        match arg {
            PAdjustArg::None => PAdjust::None,
            PAdjustArg::Bonferroni => PAdjust::Bonferroni,
            PAdjustArg::Holm => PAdjust::Holm,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct CrdArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Treat the first column as treatment labels instead of a replication
    #[arg(long = "row-labels")]
    pub row_labels: bool,

    /// Significance level for pairwise comparisons
    #[arg(long, value_name = "ALPHA", default_value_t = 0.05)]
    pub alpha: f64,

    /// Pairwise mean comparison procedure
    #[arg(long, value_enum, default_value = "tukey")]
    pub pairwise: PairwiseArg,

    /// Rank-based p-value matrix procedure
    #[arg(long, value_enum, default_value = "dscf")]
    pub matrix: MatrixArg,

    /// Multiplicity adjustment for Dunn's test
    #[arg(long = "p-adjust", value_enum, default_value = "bonferroni")]
    pub p_adjust: PAdjustArg,

    #[command(flatten)]
    pub export: ExportArgs,
}
