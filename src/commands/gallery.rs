//! Gallery command implementation
//!
//! Writes one document per manifest dataset plus an index page.

use crate::cli::args::{GalleryArgs, OutputFormat};
use crate::cli::output::{print_output, GallerySummary};
use crate::config::ConfigBuilder;
use crate::error::Result;
use crate::input::Manifest;
use crate::render::Viewer;
use crate::services::{DatasetSource, GalleryService};

use std::path::Path;

/// Execute the gallery command
pub fn run_gallery(
    args: &GalleryArgs,
    config_path: Option<&Path>,
    format: OutputFormat,
    dry_run: bool,
    viewer: &dyn Viewer,
) -> Result<()> {
    let config = ConfigBuilder::new()
        .with_file(config_path)?
        .with_dry_run(dry_run.then_some(true))
        .with_auto_open(args.no_open.then_some(false))
        .with_thumbnails(args.thumbnails.then_some(true))
        .with_index_name(args.index_name.clone())
        .with_plot_flags(&args.flags)
        .build();

    let manifest = Manifest::load(&args.manifest)?;
    let sources: Vec<&dyn DatasetSource> = manifest
        .datasets
        .iter()
        .map(|entry| entry as &dyn DatasetSource)
        .collect();

    let service = GalleryService::new(
        config.plot,
        config.gallery,
        config.export.plotly_js,
        config.general.dry_run,
    );
    let report = service.build(&sources, &args.output, viewer)?;

    if !report.failures.is_empty() {
        log::warn!(
            "{} of {} datasets failed",
            report.failures.len(),
            sources.len()
        );
    }

    let summary = GallerySummary {
        written: !service.is_dry_run(),
        report,
    };
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

    fn gallery_args(argv: &[&str]) -> GalleryArgs {
        let mut full = vec!["ivplot", "gallery"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Gallery(args) => args,
            other => panic!("Expected Gallery command, got {:?}", other),
        }
    }

    #[test]
    fn test_run_gallery_from_manifest() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("m1.csv"),
            "vgs,vds,ids\n0,0.1,1e-9\n0.5,0.1,1e-6\n1.0,0.1,1e-4\n",
        )
        .unwrap();
        let manifest = dir.path().join("devices.toml");
        std::fs::write(
            &manifest,
            r#"
[[dataset]]
name = "M1"
[[dataset.sweep]]
file = "m1.csv"
kind = "gate"

[[dataset]]
name = "M2"
[[dataset.sweep]]
file = "missing.csv"
kind = "drain"
"#,
        )
        .unwrap();
        let config = dir.path().join("empty.toml");
        std::fs::write(&config, "").unwrap();
        let out = dir.path().join("gallery");
        let viewer = RecordingViewer::new();

        let args = gallery_args(&[
            manifest.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--no-open",
        ]);
        run_gallery(&args, Some(&config), OutputFormat::Table, false, &viewer).unwrap();

        assert!(out.join("M1.html").exists());
        assert!(!out.join("M2.html").exists());
        let index = std::fs::read_to_string(out.join("ivplot_gallery.html")).unwrap();
        assert!(index.contains("Failed datasets (1)"));
        assert!(viewer.opened().is_empty());
    }

    #[test]
    fn test_run_gallery_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("empty.toml");
        std::fs::write(&config, "").unwrap();
        let manifest = dir.path().join("nope.toml");

        let args = gallery_args(&[manifest.to_str().unwrap(), "-o", "unused"]);
        let result = run_gallery(
            &args,
            Some(&config),
            OutputFormat::Table,
            false,
            &RecordingViewer::new(),
        );
        assert!(result.is_err());
    }
}
