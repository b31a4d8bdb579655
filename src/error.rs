//! Unified error types for ivplot
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error while rendering or exporting a figure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from sweep/dataset validation
    #[error("Data validation error: {0}")]
    Domain(#[from] DomainError),

    /// No sweep files or manifest were given
    #[error("No input data given")]
    NoInput,

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from sweep, dataset and option validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A sweep table is missing a column or holds unusable values
    #[error("Malformed sweep: {0}")]
    MalformedSweep(String),

    /// No usable points remain for the requested panels
    #[error("Empty sweep set: {0}")]
    EmptySweepSet(String),

    /// Alpha override outside (0, 1]
    #[error("Invalid alpha: {0} (must be in (0, 1])")]
    InvalidAlpha(f64),

    /// Marker size must be positive
    #[error("Invalid marker size: {0} (must be > 0)")]
    InvalidMarkerSize(f64),

    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config or manifest file not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors from document, preview and viewer output
#[derive(Error, Debug)]
pub enum RenderError {
    /// Writing a document failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Figure data could not be serialized
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Preview image drawing failed
    #[error("Preview rendering failed: {0}")]
    Preview(String),

    /// The system viewer could not be launched
    #[error("Could not open {path} in a viewer: {reason}")]
    Viewer { path: String, reason: String },

    /// Local plotly.js bundle could not be read
    #[error("Could not read plotly.js bundle {0}")]
    PlotlyBundle(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
