//! Plot command implementation
//!
//! Loads datasets from a manifest and/or loose sweep files, builds one
//! six-panel figure and writes it.

use crate::cli::args::{OutputFormat, PlotArgs};
use crate::cli::output::{print_output, PlotSummary};
use crate::config::ConfigBuilder;
use crate::domain::Dataset;
use crate::error::{AppError, Result};
use crate::figure::Figure;
use crate::input::{DatasetEntry, Manifest};
use crate::render::Viewer;
use crate::services::build_panels;

use std::path::Path;

/// Name for a dataset given as loose files: `--name`, else the first file stem
fn loose_dataset_name(args: &PlotArgs) -> String {
    if let Some(name) = &args.name {
        return name.clone();
    }
    args.gate
        .iter()
        .chain(&args.drain)
        .chain(&args.mixed)
        .next()
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load every dataset named on the command line, manifest first
pub fn load_datasets(args: &PlotArgs) -> Result<Vec<Dataset>> {
    let mut datasets = Vec::new();

    if let Some(path) = &args.manifest {
        datasets.extend(Manifest::load(path)?.load_datasets()?);
    }

    if args.has_files() {
        let entry = DatasetEntry::from_files(
            &loose_dataset_name(args),
            &args.gate,
            &args.drain,
            &args.mixed,
        );
        datasets.push(entry.load()?);
    }

    if datasets.is_empty() {
        return Err(AppError::NoInput);
    }
    Ok(datasets)
}

/// Execute the plot command
pub fn run_plot(
    args: &PlotArgs,
    config_path: Option<&Path>,
    format: OutputFormat,
    dry_run: bool,
    viewer: &dyn Viewer,
) -> Result<()> {
    let config = ConfigBuilder::new()
        .with_file(config_path)?
        .with_dry_run(dry_run.then_some(true))
        .with_output(args.output.clone())
        .with_auto_open(args.no_open.then_some(false))
        .with_plot_flags(&args.flags)
        .build();

    let datasets = load_datasets(args)?;
    let figure: Figure = build_panels(&datasets, &config.plot, None)?;

    let written = !config.general.dry_run;
    if written {
        figure.write_html(&config.export, viewer)?;
    } else {
        log::info!("DRY RUN: Would write {}", config.export.path.display());
    }

    let summary = PlotSummary::new(&figure, &config.export.path, written);
    print_output(&summary, format)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::{Cli, Commands};
    use crate::mock::RecordingViewer;
    use clap::Parser;
    use tempfile::TempDir;

    fn plot_args(argv: &[&str]) -> PlotArgs {
        let mut full = vec!["ivplot", "plot"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Plot(args) => args,
            other => panic!("Expected Plot command, got {:?}", other),
        }
    }

    fn write_tables(dir: &Path) {
        std::fs::write(
            dir.join("m1_transfer.csv"),
            "vgs,vds,ids\n0.0,0.1,1e-10\n0.5,0.1,1e-7\n1.0,0.1,1e-5\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("m1_output.csv"),
            "vgs,vds,ids\n1.0,0.0,0\n1.0,0.5,4e-5\n1.0,1.0,6e-5\n",
        )
        .unwrap();
    }

    #[test]
    fn test_no_input_is_an_error() {
        let args = plot_args(&[]);
        assert!(matches!(load_datasets(&args), Err(AppError::NoInput)));
    }

    #[test]
    fn test_loose_files_form_one_dataset() {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path());
        let gate = dir.path().join("m1_transfer.csv");
        let drain = dir.path().join("m1_output.csv");

        let args = plot_args(&[
            "--gate",
            gate.to_str().unwrap(),
            "--drain",
            drain.to_str().unwrap(),
        ]);
        let datasets = load_datasets(&args).unwrap();

        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].name(), "m1_transfer");
        assert_eq!(datasets[0].point_count(), 6);
    }

    #[test]
    fn test_run_plot_writes_document() {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path());
        let out = dir.path().join("out/plot.html");
        let gate = dir.path().join("m1_transfer.csv");
        let viewer = RecordingViewer::new();

        let args = plot_args(&[
            "--gate",
            gate.to_str().unwrap(),
            "--name",
            "M1",
            "-o",
            out.to_str().unwrap(),
        ]);
        let config = dir.path().join("empty.toml");
        std::fs::write(&config, "").unwrap();

        run_plot(&args, Some(&config), OutputFormat::Compact, false, &viewer).unwrap();

        let html = std::fs::read_to_string(&out).unwrap();
        assert!(html.contains("\"M1 (Ids-Vgs)\""));
        assert_eq!(viewer.opened(), vec![out]);
    }

    #[test]
    fn test_run_plot_dry_run_and_no_open() {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path());
        let out = dir.path().join("plot.html");
        let drain = dir.path().join("m1_output.csv");
        let viewer = RecordingViewer::new();
        let config = dir.path().join("empty.toml");
        std::fs::write(&config, "").unwrap();

        let args = plot_args(&["--drain", drain.to_str().unwrap(), "-o", out.to_str().unwrap()]);
        run_plot(&args, Some(&config), OutputFormat::Json, true, &viewer).unwrap();
        assert!(!out.exists());

        let args = plot_args(&[
            "--drain",
            drain.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--no-open",
        ]);
        run_plot(&args, Some(&config), OutputFormat::Table, false, &viewer).unwrap();
        assert!(out.exists());
        assert!(viewer.opened().is_empty());
    }

    #[test]
    fn test_run_plot_invalid_alpha() {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path());
        let gate = dir.path().join("m1_transfer.csv");
        let config = dir.path().join("empty.toml");
        std::fs::write(&config, "").unwrap();

        let args = plot_args(&["--gate", gate.to_str().unwrap(), "--alpha", "1.5"]);
        let result = run_plot(
            &args,
            Some(&config),
            OutputFormat::Table,
            false,
            &RecordingViewer::new(),
        );
        assert!(matches!(result, Err(AppError::Domain(_))));
    }
}
