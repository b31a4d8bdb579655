//! Measurement input
//!
//! CSV sweep tables and TOML dataset manifests. Everything read here is
//! validated into [`Sweep`](crate::domain::Sweep) values at this boundary.

pub mod manifest;
pub mod table;

pub use manifest::{DatasetEntry, Manifest, SweepEntry};
pub use table::{parse_sweep, read_sweep, ColumnNames};
