//! Domain models for ivplot
//!
//! Sweeps, datasets and plotting options. Types are validated on
//! construction (fail-fast pattern).

pub mod options;
pub mod style;
pub mod sweep;

pub use options::{AxisMode, MixedPlacement, PanelView, PlotOptions, Render3d, DEFAULT_TITLE};
pub use sweep::{Dataset, DatasetSummary, Sweep, SweepKind, SweepPoint};
