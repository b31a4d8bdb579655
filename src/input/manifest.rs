//! Dataset manifests
//!
//! A manifest is a TOML file listing datasets and the CSV table of each of
//! their sweeps:
//!
//! ```toml
//! [[dataset]]
//! name = "M1"
//!
//! [[dataset.sweep]]
//! file = "m1_transfer.csv"
//! kind = "gate"
//! columns = { vgs = "VG", vds = "VD", ids = "ID" }
//! ```
//!
//! Relative file paths are resolved against the manifest's directory.

use crate::domain::{Dataset, SweepKind};
use crate::error::{AppError, ConfigError};
use crate::input::table::{read_sweep, ColumnNames};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One sweep table of a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub file: PathBuf,
    #[serde(default)]
    pub kind: SweepKind,
    #[serde(default)]
    pub columns: ColumnNames,
}

/// One dataset: a name and its sweep tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "sweep", default)]
    pub sweeps: Vec<SweepEntry>,
}

impl DatasetEntry {
    /// Build an entry from loose files given on the command line
    pub fn from_files(name: &str, gate: &[PathBuf], drain: &[PathBuf], mixed: &[PathBuf]) -> Self {
        let entries = |files: &[PathBuf], kind: SweepKind| {
            files
                .iter()
                .map(|file| SweepEntry {
                    file: file.clone(),
                    kind,
                    columns: ColumnNames::default(),
                })
                .collect::<Vec<_>>()
        };

        let mut sweeps = entries(gate, SweepKind::Gate);
        sweeps.extend(entries(drain, SweepKind::Drain));
        sweeps.extend(entries(mixed, SweepKind::Mixed));

        Self {
            name: name.to_string(),
            sweeps,
        }
    }

    /// Read every sweep table into a dataset
    ///
    /// # Errors
    /// Returns the first read or parse error
    pub fn load(&self) -> Result<Dataset, AppError> {
        let sweeps = self
            .sweeps
            .iter()
            .map(|entry| read_sweep(&entry.file, entry.kind, &entry.columns))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Dataset::new(self.name.clone(), sweeps))
    }

    fn resolve(&mut self, base: &Path) {
        for sweep in &mut self.sweeps {
            if sweep.file.is_relative() {
                sweep.file = base.join(&sweep.file);
            }
        }
    }
}

/// The datasets listed in a manifest file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "dataset", default)]
    pub datasets: Vec<DatasetEntry>,
}

impl Manifest {
    /// Parse manifest text, resolving relative sweep files against `base`
    ///
    /// # Errors
    /// Returns `ConfigError` for invalid TOML or a manifest without datasets
    pub fn parse(text: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut manifest: Manifest = toml::from_str(text)?;

        if manifest.datasets.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "dataset".to_string(),
                message: "manifest lists no datasets".to_string(),
            });
        }

        for dataset in &mut manifest.datasets {
            dataset.resolve(base);
        }
        Ok(manifest)
    }

    /// Load a manifest file
    ///
    /// # Errors
    /// Returns `ConfigError::FileNotFound` if the file cannot be read, or a
    /// parse error from [`Manifest::parse`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let manifest = Self::parse(&content, base)?;
        log::debug!(
            "Loaded manifest {} with {} datasets",
            path.display(),
            manifest.datasets.len()
        );
        Ok(manifest)
    }

    /// Load every dataset, failing on the first error
    pub fn load_datasets(&self) -> Result<Vec<Dataset>, AppError> {
        self.datasets.iter().map(DatasetEntry::load).collect()
    }
}
