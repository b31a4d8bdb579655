//! ivplot - transistor I-V sweep plotter
//!
//! A command-line tool that renders gate and drain sweeps into a six-panel
//! interactive HTML figure.

use clap::Parser;
use ivplot::cli::args::{generate_completions, Cli, Commands};
use ivplot::commands::{run_gallery, run_info, run_plot};
use ivplot::error::{AppError, ConfigError, DomainError, RenderError};
use ivplot::render::SystemViewer;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still overrides the flag
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let viewer = SystemViewer;
    let config = cli.config.as_deref();

    match &cli.command {
        Commands::Plot(args) => run_plot(args, config, cli.format, cli.dry_run, &viewer),

        Commands::Gallery(args) => run_gallery(args, config, cli.format, cli.dry_run, &viewer),

        Commands::Info(args) => run_info(args, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::NoInput => {
            eprintln!();
            eprintln!("Hint: Pass a dataset manifest, or sweep tables with --gate/--drain/--mixed.");
        }
        AppError::Domain(DomainError::MalformedSweep(_)) => {
            eprintln!();
            eprintln!("Hint: Sweep tables need a header row with vgs, vds and ids columns.");
            eprintln!("      Other header names can be mapped with `columns = {{ ... }}` in the manifest.");
        }
        AppError::Domain(DomainError::EmptySweepSet(_)) => {
            eprintln!();
            eprintln!("Hint: Log panels need positive drain currents; try --axis-mode linear.");
        }
        AppError::Config(ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Relative sweep paths in a manifest are resolved against the manifest's directory.");
        }
        AppError::Render(RenderError::PlotlyBundle(_)) => {
            eprintln!();
            eprintln!("Hint: --plotly-js takes \"cdn\", a URL, or the path of a local plotly.min.js.");
        }
        _ => {}
    }
}
