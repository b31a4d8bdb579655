//! Per-call plotting options
//!
//! These are deserialized straight from the `[plot]` config section and then
//! overridden by command-line flags.

use crate::error::DomainError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default figure title
pub const DEFAULT_TITLE: &str = "Transistor Curves";

/// Which current-axis rows to draw
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// Log row and linear row
    #[default]
    Both,
    /// Linear row only
    Linear,
    /// Log row only
    Log,
}

impl AxisMode {
    pub fn wants_log(&self) -> bool {
        matches!(self, Self::Both | Self::Log)
    }

    pub fn wants_linear(&self) -> bool {
        matches!(self, Self::Both | Self::Linear)
    }
}

/// Which panel columns to draw
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelView {
    /// All six panels
    #[default]
    All,
    /// Ids vs Vgs column only
    Vgs,
    /// Ids vs Vds column only
    Vds,
    /// The two 3D scenes on their own
    #[value(name = "3d")]
    #[serde(rename = "3d")]
    ThreeD,
}

impl PanelView {
    pub fn shows_vgs(&self) -> bool {
        matches!(self, Self::All | Self::Vgs)
    }

    pub fn shows_vds(&self) -> bool {
        matches!(self, Self::All | Self::Vds)
    }

    pub fn shows_3d(&self) -> bool {
        matches!(self, Self::All | Self::ThreeD)
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Vgs => write!(f, "vgs"),
            Self::Vds => write!(f, "vds"),
            Self::ThreeD => write!(f, "3d"),
        }
    }
}

/// How the 3D scenes draw each dataset
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Render3d {
    /// Raw point cloud
    #[default]
    Points,
    /// Triangulated surface
    Surface,
    /// Surface when the data lies on a regular Vgs x Vds grid
    Auto,
}

/// Which 2D column(s) a mixed sweep is drawn in
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MixedPlacement {
    /// Both columns
    #[default]
    Both,
    /// Ids vs Vgs column, coloured by Vds
    Gate,
    /// Ids vs Vds column, coloured by Vgs
    Drain,
}

/// Options for one panel-building call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    /// Current-axis rows to draw
    pub axis_mode: AxisMode,
    /// Panel columns to draw
    pub view: PanelView,
    /// 3D render mode
    pub render_3d: Render3d,
    /// Mirror camera moves between the two 3D scenes
    pub link_3d: bool,
    /// Colour scale for the 2D hidden-axis colouring
    pub colorscale: String,
    /// Marker opacity override; adaptive when unset
    pub alpha: Option<f64>,
    /// Marker symbol (plotly name or matplotlib shorthand)
    pub marker: String,
    /// Marker size in pixels
    pub marker_size: f64,
    /// Fixed 3D colour for the datasets in this call
    pub color: Option<String>,
    /// Legend label for the datasets in this call
    pub label: Option<String>,
    /// Per-sweep point limit for down-sampling
    pub max_samples: Option<usize>,
    /// Down-sampling seed
    pub seed: u64,
    /// Column placement of mixed sweeps
    pub mixed: MixedPlacement,
    /// Document title
    pub title: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            axis_mode: AxisMode::default(),
            view: PanelView::default(),
            render_3d: Render3d::default(),
            link_3d: true,
            colorscale: "viridis".to_string(),
            alpha: None,
            marker: "circle".to_string(),
            marker_size: 6.0,
            color: None,
            label: None,
            max_samples: None,
            seed: 0,
            mixed: MixedPlacement::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl PlotOptions {
    /// Check option values before any data is touched
    ///
    /// # Errors
    /// Returns `DomainError` for an alpha outside (0, 1], a non-positive
    /// marker size or a zero sample limit
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(alpha) = self.alpha {
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(DomainError::InvalidAlpha(alpha));
            }
        }

        if !(self.marker_size > 0.0 && self.marker_size.is_finite()) {
            return Err(DomainError::InvalidMarkerSize(self.marker_size));
        }

        if self.max_samples == Some(0) {
            return Err(DomainError::InvalidValue(
                "max_samples must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
