//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::domain::{AxisMode, MixedPlacement, PanelView, Render3d};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Transistor I-V sweep plotter
///
/// Render gate and drain sweeps into a six-panel interactive HTML figure.
#[derive(Parser, Debug)]
#[command(name = "ivplot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "IVPLOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dry run mode - build figures but write nothing
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level selected by `--verbose`
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plot datasets into one six-panel figure
    Plot(PlotArgs),

    /// Write one figure per dataset plus an index page
    Gallery(GalleryArgs),

    /// Summarize the datasets in a manifest
    Info(InfoArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Plot styling flags shared by `plot` and `gallery`
#[derive(Args, Debug, Clone, Default)]
pub struct PlotFlags {
    /// Current-axis rows to draw
    #[arg(long, value_enum)]
    pub axis_mode: Option<AxisMode>,

    /// Panel columns to draw
    #[arg(long, value_enum)]
    pub view: Option<PanelView>,

    /// 3D render mode
    #[arg(long = "render-3d", value_enum)]
    pub render_3d: Option<Render3d>,

    /// Do not link the cameras of the two 3D scenes
    #[arg(long)]
    pub no_link: bool,

    /// Colour scale for the hidden-axis colouring (viridis, plasma, ...)
    #[arg(long)]
    pub colorscale: Option<String>,

    /// Marker opacity in (0, 1]; adaptive when unset
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Marker symbol (plotly name or o . x + s D ^ v < > p *)
    #[arg(long)]
    pub marker: Option<String>,

    /// Marker size in pixels
    #[arg(long)]
    pub marker_size: Option<f64>,

    /// Fixed 3D colour for the plotted datasets
    #[arg(long)]
    pub color: Option<String>,

    /// Legend label for the plotted datasets
    #[arg(long)]
    pub label: Option<String>,

    /// Down-sample each sweep to at most this many points
    #[arg(long)]
    pub max_samples: Option<usize>,

    /// Down-sampling seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Column(s) mixed sweeps are drawn in
    #[arg(long, value_enum)]
    pub mixed_column: Option<MixedPlacement>,

    /// Figure title
    #[arg(long)]
    pub title: Option<String>,

    /// plotly.js source: "cdn", a URL, or a local plotly.min.js to inline
    #[arg(long, value_name = "SOURCE")]
    pub plotly_js: Option<String>,
}

/// Arguments for the plot command
#[derive(Parser, Debug)]
pub struct PlotArgs {
    /// Dataset manifest (TOML)
    pub manifest: Option<PathBuf>,

    /// Gate sweep CSV (Vgs swept)
    #[arg(long, value_name = "FILE")]
    pub gate: Vec<PathBuf>,

    /// Drain sweep CSV (Vds swept)
    #[arg(long, value_name = "FILE")]
    pub drain: Vec<PathBuf>,

    /// Mixed sweep CSV (both voltages vary)
    #[arg(long, value_name = "FILE")]
    pub mixed: Vec<PathBuf>,

    /// Dataset name for sweeps given as files
    #[arg(long)]
    pub name: Option<String>,

    /// Output HTML file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not open the document after writing
    #[arg(long)]
    pub no_open: bool,

    #[command(flatten)]
    pub flags: PlotFlags,
}

impl PlotArgs {
    /// Whether any sweep file was given directly
    pub fn has_files(&self) -> bool {
        !(self.gate.is_empty() && self.drain.is_empty() && self.mixed.is_empty())
    }
}

/// Arguments for the gallery command
#[derive(Parser, Debug)]
pub struct GalleryArgs {
    /// Dataset manifest (TOML)
    pub manifest: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Render a PNG preview for every dataset
    #[arg(long)]
    pub thumbnails: bool,

    /// Index file name
    #[arg(long)]
    pub index_name: Option<String>,

    /// Do not open the index after writing
    #[arg(long)]
    pub no_open: bool,

    #[command(flatten)]
    pub flags: PlotFlags,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Dataset manifest (TOML)
    pub manifest: PathBuf,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_plot_files() {
        let args = Cli::try_parse_from([
            "ivplot",
            "plot",
            "--gate",
            "m1_transfer.csv",
            "--drain",
            "m1_out_a.csv",
            "--drain",
            "m1_out_b.csv",
            "-o",
            "out/m1.html",
            "--no-open",
        ])
        .unwrap();

        if let Commands::Plot(plot) = args.command {
            assert!(plot.manifest.is_none());
            assert!(plot.has_files());
            assert_eq!(plot.gate.len(), 1);
            assert_eq!(plot.drain.len(), 2);
            assert_eq!(plot.output, Some(PathBuf::from("out/m1.html")));
            assert!(plot.no_open);
        } else {
            panic!("Expected Plot command");
        }
    }

    #[test]
    fn test_cli_parse_plot_flags() {
        let args = Cli::try_parse_from([
            "ivplot",
            "plot",
            "devices.toml",
            "--view",
            "3d",
            "--axis-mode",
            "log",
            "--render-3d",
            "auto",
            "--alpha",
            "0.4",
            "--max-samples",
            "500",
            "--mixed-column",
            "drain",
            "--no-link",
        ])
        .unwrap();

        if let Commands::Plot(plot) = args.command {
            assert_eq!(plot.manifest, Some(PathBuf::from("devices.toml")));
            assert!(!plot.has_files());
            assert_eq!(plot.flags.view, Some(PanelView::ThreeD));
            assert_eq!(plot.flags.axis_mode, Some(AxisMode::Log));
            assert_eq!(plot.flags.render_3d, Some(Render3d::Auto));
            assert_eq!(plot.flags.alpha, Some(0.4));
            assert_eq!(plot.flags.max_samples, Some(500));
            assert_eq!(plot.flags.mixed_column, Some(MixedPlacement::Drain));
            assert!(plot.flags.no_link);
        } else {
            panic!("Expected Plot command");
        }
    }

    #[test]
    fn test_cli_parse_gallery() {
        let args = Cli::try_parse_from([
            "ivplot",
            "--dry-run",
            "gallery",
            "devices.toml",
            "-o",
            "gallery",
            "--thumbnails",
        ])
        .unwrap();

        assert!(args.dry_run);
        if let Commands::Gallery(gallery) = args.command {
            assert_eq!(gallery.output, PathBuf::from("gallery"));
            assert!(gallery.thumbnails);
            assert!(!gallery.no_open);
        } else {
            panic!("Expected Gallery command");
        }
    }

    #[test]
    fn test_cli_gallery_requires_output() {
        let result = Cli::try_parse_from(["ivplot", "gallery", "devices.toml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_view() {
        let result = Cli::try_parse_from(["ivplot", "plot", "--view", "4d"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_global_flags() {
        let args =
            Cli::try_parse_from(["ivplot", "info", "devices.toml", "-v", "--format", "json"])
                .unwrap();
        assert!(args.verbose);
        assert!(matches!(args.format, OutputFormat::Json));
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let quiet = Cli::try_parse_from(["ivplot", "info", "devices.toml"]).unwrap();
        assert_eq!(quiet.log_level(), log::LevelFilter::Warn);

        let loud = Cli::try_parse_from(["ivplot", "-v", "info", "devices.toml"]).unwrap();
        assert_eq!(loud.log_level(), log::LevelFilter::Debug);
    }
}
