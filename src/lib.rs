//! ivplot - transistor I-V sweep plotting library
//!
//! This library renders transistor current-voltage sweeps into a fixed
//! six-panel interactive figure (log and linear current against Vgs, Vds and
//! both in 3D) and exports it as standalone plotly.js HTML.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`figure`]: Figure, layout and trace model
//! - [`input`]: CSV sweep tables and dataset manifests
//! - [`render`]: HTML, index and preview output
//! - [`services`]: Panel building and gallery services

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod figure;
pub mod input;
pub mod render;
pub mod services;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
pub use figure::Figure;
pub use services::{build_gallery, build_panels};
