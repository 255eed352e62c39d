mod cli;

use std::fs;
use std::path::Path;

use agrostat_core::data::{load_table, Table, TreatmentLabels};
use agrostat_core::export::Artifact;
use agrostat_core::pipeline::{run_crd, run_regression, CrdRequest, RegressionRequest};
use agrostat_core::tests::{MatrixOptions, PairwiseOptions};
use agrostat_core::OlsOptions;
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, CrdArgs, ExportArgs, RegressArgs};
use tracing::Level;
use tracing_subscriber::EnvFilter;

const PREVIEW_ROWS: usize = 5;

/// Initialize tracing subscriber; `--verbose` forces debug output
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::builder()
            .with_default_directive(Level::WARN.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Table> {
    load_table(path).with_context(|| format!("failed to load {}", path.display()))
}

fn print_preview(table: &Table) {
    println!("{}", table.preview(PREVIEW_ROWS));
    println!();
}

fn write_artifacts(artifacts: &[Artifact], export: &ExportArgs) -> Result<()> {
    fs::create_dir_all(&export.out_dir)
        .with_context(|| format!("failed to create {}", export.out_dir.display()))?;
    for artifact in artifacts {
        let path = export.out_dir.join(&artifact.file_name);
        fs::write(&path, &artifact.bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!(
            "Saved {} ({}, {} bytes)",
            path.display(),
            artifact.mime,
            artifact.bytes.len()
        );
    }
    Ok(())
}

fn columns(path: &Path) -> Result<()> {
    let table = load(path)?;
    for name in table.column_names() {
        println!("{}", name);
    }
    println!();
    print_preview(&table);
    Ok(())
}

fn regress(args: RegressArgs) -> Result<()> {
    let table = load(&args.input.input)?;
    print_preview(&table);

    let options = OlsOptions {
        confidence_level: args.confidence,
        ..Default::default()
    };
    let Some(request) = RegressionRequest::from_selection(args.dependent, args.independent, options)
    else {
        println!("Select a dependent variable (--dependent) and at least one independent variable (--independent) to run the regression.");
        return Ok(());
    };

    let outcome = run_regression(&table, &request).context("regression failed")?;
    print!("{}", outcome.report);
    if !args.export.no_export {
        write_artifacts(&outcome.artifacts()?, &args.export)?;
    }
    Ok(())
}

fn crd(args: CrdArgs) -> Result<()> {
    let table = load(&args.input.input)?;
    print_preview(&table);

    let request = CrdRequest {
        labels: if args.row_labels {
            TreatmentLabels::FirstColumn
        } else {
            TreatmentLabels::RowPosition
        },
        pairwise: PairwiseOptions {
            method: args.pairwise.into(),
            alpha: args.alpha,
        },
        matrix: MatrixOptions {
            method: args.matrix.into(),
            p_adjust: args.p_adjust.into(),
        },
    };

    let outcome = run_crd(&table, &request).context("CRD analysis failed")?;
    print!("{}", outcome.report);
    if !args.export.no_export {
        write_artifacts(&outcome.artifacts()?, &args.export)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Columns(input) => columns(&input.input),
        Command::Regress(regress_args) => regress(regress_args),
        Command::Crd(crd_args) => crd(crd_args),
    }
}
