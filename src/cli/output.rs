//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::domain::DatasetSummary;
use crate::figure::{Figure, Panel};
use crate::services::GalleryReport;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

fn format_range(range: Option<(f64, f64)>, unit: &str) -> String {
    match range {
        Some((lo, hi)) => format!("{:.3e} .. {:.3e} {}", lo, hi, unit),
        None => "-".to_string(),
    }
}

/// Points drawn on one panel
#[derive(Debug, Clone, Serialize)]
pub struct PanelCount {
    pub panel: Panel,
    pub title: String,
    pub points: usize,
}

/// Result of the plot command
#[derive(Debug, Clone, Serialize)]
pub struct PlotSummary {
    pub output: String,
    pub written: bool,
    pub title: String,
    pub datasets: usize,
    pub points: usize,
    pub traces: usize,
    pub cameras_linked: bool,
    pub panels: Vec<PanelCount>,
}

impl PlotSummary {
    pub fn new(figure: &Figure, output: &Path, written: bool) -> Self {
        let panels = Panel::ALL
            .iter()
            .filter(|p| p.in_view(figure.view()))
            .map(|&panel| PanelCount {
                panel,
                title: panel.title().to_string(),
                points: figure.panel_point_count(panel),
            })
            .collect();

        Self {
            output: output.display().to_string(),
            written,
            title: figure.title().to_string(),
            datasets: figure.dataset_count(),
            points: figure.total_points(),
            traces: figure.traces().len(),
            cameras_linked: figure.cameras_linked(),
            panels,
        }
    }
}

impl TableDisplay for PlotSummary {
    fn to_table(&self) -> String {
        let action = if self.written { "Wrote" } else { "Would write" };
        let mut output = format!("{} {}\n", action, self.output);
        output.push_str(&format!("  Title: {}\n", self.title));
        output.push_str(&format!(
            "  Datasets: {} ({} points, {} traces)\n",
            self.datasets, self.points, self.traces
        ));

        for panel in &self.panels {
            output.push_str(&format!("  {:<22} {:>8} points\n", panel.title, panel.points));
        }

        if self.cameras_linked {
            output.push_str("  3D cameras linked\n");
        }

        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{}: {} datasets, {} points",
            self.output, self.datasets, self.points
        )
    }
}

/// Result of the gallery command
#[derive(Debug, Clone, Serialize)]
pub struct GallerySummary {
    pub written: bool,
    #[serde(flatten)]
    pub report: GalleryReport,
}

impl TableDisplay for GallerySummary {
    fn to_table(&self) -> String {
        let action = if self.written { "Wrote" } else { "Would write" };
        let mut output = format!("{} {}\n", action, self.report.index.display());
        output.push_str(&format!("  Documents: {}\n", self.report.entries.len()));

        for entry in &self.report.entries {
            output.push_str(&format!(
                "    {} -> {} ({} points)\n",
                entry.name, entry.document_name, entry.points
            ));
        }

        if !self.report.failures.is_empty() {
            output.push_str(&format!("  Failures: {}\n", self.report.failures.len()));
            for failure in &self.report.failures {
                output.push_str(&format!("    {}: {}\n", failure.name, failure.reason));
            }
        }

        output
    }

    fn to_compact(&self) -> String {
        format!(
            "{}: {} documents, {} failures",
            self.report.index.display(),
            self.report.entries.len(),
            self.report.failures.len()
        )
    }
}

/// Dataset summaries for the info command
#[derive(Debug, Clone, Serialize)]
pub struct DatasetTable {
    pub manifest: String,
    pub datasets: Vec<DatasetSummary>,
}

impl TableDisplay for DatasetTable {
    fn to_table(&self) -> String {
        let mut output = format!("Manifest: {}\n", self.manifest);
        output.push_str(&format!("Datasets: {}\n", self.datasets.len()));

        for d in &self.datasets {
            output.push_str(&format!(
                "\n{}\n  Sweeps: {} (gate {}, drain {}, mixed {})\n  Points: {} ({} with positive current)\n",
                d.name, d.sweeps, d.gate_sweeps, d.drain_sweeps, d.mixed_sweeps, d.points, d.positive_points
            ));
            output.push_str(&format!("  Vgs: {}\n", format_range(d.vgs, "V")));
            output.push_str(&format!("  Vds: {}\n", format_range(d.vds, "V")));
            output.push_str(&format!("  Ids: {}\n", format_range(d.ids, "A")));
        }

        output
    }

    fn to_compact(&self) -> String {
        self.datasets
            .iter()
            .map(|d| format!("{}:{}pts", d.name, d.points))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dataset, PlotOptions};
    use crate::mock::{drain_sweep, gate_sweep};
    use crate::services::build_panels;
    use crate::services::gallery::GalleryFailure;
    use std::path::PathBuf;

    #[test]
    fn test_plot_summary() {
        let figure = build_panels(
            &[Dataset::new("M1", vec![gate_sweep(20), drain_sweep(30)])],
            &PlotOptions::default(),
            None,
        )
        .unwrap();

        let summary = PlotSummary::new(&figure, Path::new("out.html"), true);
        assert_eq!(summary.panels.len(), 6);
        assert_eq!(summary.points, 50);

        let table = summary.to_table();
        assert!(table.starts_with("Wrote out.html"));
        assert!(table.contains("3D cameras linked"));
        assert_eq!(summary.to_compact(), "out.html: 1 datasets, 50 points");

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["panels"][0]["panel"], "log_vgs");
    }

    #[test]
    fn test_gallery_summary() {
        let summary = GallerySummary {
            written: false,
            report: GalleryReport {
                index: PathBuf::from("g/ivplot_gallery.html"),
                entries: vec![],
                failures: vec![GalleryFailure {
                    name: "M3".to_string(),
                    reason: "bad row".to_string(),
                }],
            },
        };

        let table = summary.to_table();
        assert!(table.starts_with("Would write g/ivplot_gallery.html"));
        assert!(table.contains("M3: bad row"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["failures"][0]["name"], "M3");
        assert_eq!(json["written"], false);
    }

    #[test]
    fn test_dataset_table() {
        let table = DatasetTable {
            manifest: "devices.toml".to_string(),
            datasets: vec![Dataset::new("M1", vec![gate_sweep(4)]).summary()],
        };
        let text = table.to_table();
        assert!(text.contains("Sweeps: 1 (gate 1, drain 0, mixed 0)"));
        assert!(text.contains("Vds: 1.000e-1 .. 1.000e-1 V"));
        assert_eq!(table.to_compact(), "M1:4pts");
    }
}
