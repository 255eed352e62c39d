//! agrostat-core: regression and CRD ANOVA analysis core
//!
//! This crate ingests tabular files, runs ordinary least squares or a
//! one-way ANOVA with post-hoc comparisons, renders the results as text
//! reports and exports those reports to PDF and XLSX.

pub mod data;
pub mod diagnostics;
pub mod errors;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod tests;
pub mod types;

pub use errors::{StatsError, StatsResult};
pub use types::*;
