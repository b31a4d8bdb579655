//! Info command implementation
//!
//! Shows per-dataset sweep counts and value ranges for a manifest.

use crate::cli::args::{InfoArgs, OutputFormat};
use crate::cli::output::{print_output, DatasetTable};
use crate::domain::Dataset;
use crate::error::Result;
use crate::input::Manifest;

/// Execute the info command
pub fn run_info(args: &InfoArgs, format: OutputFormat) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let datasets = manifest.load_datasets()?;

    let table = DatasetTable {
        manifest: args.manifest.display().to_string(),
        datasets: datasets.iter().map(Dataset::summary).collect(),
    };
    print_output(&table, format)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, DomainError};
    use tempfile::TempDir;

    #[test]
    fn test_run_info() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.csv"), "vgs,vds,ids\n0,0.1,1e-9\n").unwrap();
        let manifest = dir.path().join("devices.toml");
        std::fs::write(
            &manifest,
            "[[dataset]]\nname = \"A\"\n[[dataset.sweep]]\nfile = \"a.csv\"\nkind = \"gate\"\n",
        )
        .unwrap();

        let args = InfoArgs { manifest };
        assert!(run_info(&args, OutputFormat::Compact).is_ok());
    }

    #[test]
    fn test_run_info_malformed_table() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.csv"), "vgs,ids\n0,1e-9\n").unwrap();
        let manifest = dir.path().join("devices.toml");
        std::fs::write(
            &manifest,
            "[[dataset]]\nname = \"A\"\n[[dataset.sweep]]\nfile = \"a.csv\"\n",
        )
        .unwrap();

        let result = run_info(&InfoArgs { manifest }, OutputFormat::Table);
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::MalformedSweep(_)))
        ));
    }
}
