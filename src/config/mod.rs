//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::domain::PlotOptions;
use crate::render::ExportOptions;
use crate::services::GalleryOptions;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Plot styling defaults
    pub plot: PlotOptions,
    /// Single-document export settings
    pub export: ExportOptions,
    /// Gallery settings
    pub gallery: GalleryOptions,
}

/// General configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Dry run mode
    pub dry_run: bool,
}
