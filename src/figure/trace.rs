//! Plotly trace types
//!
//! Only the attributes ivplot sets are modelled. Serialization produces the
//! JSON objects plotly.js expects in its `data` array.

use serde::Serialize;

/// A trace of any supported type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(Scatter),
    Scatter3d(Scatter3d),
    Mesh3d(Mesh3d),
}

impl Trace {
    /// Number of data points carried by the trace
    pub fn len(&self) -> usize {
        match self {
            Self::Scatter(t) => t.x.len(),
            Self::Scatter3d(t) => t.x.len(),
            Self::Mesh3d(t) => t.x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Scatter(t) => &t.name,
            Self::Scatter3d(t) => &t.name,
            Self::Mesh3d(t) => &t.name,
        }
    }

    pub fn show_legend(&self) -> bool {
        match self {
            Self::Scatter(t) => t.showlegend,
            Self::Scatter3d(t) => t.showlegend,
            Self::Mesh3d(t) => t.showlegend,
        }
    }

    pub fn opacity(&self) -> f64 {
        match self {
            Self::Scatter(t) => t.marker.opacity,
            Self::Scatter3d(t) => t.marker.opacity,
            Self::Mesh3d(t) => t.opacity,
        }
    }

    /// 3D coordinates and colour, for traces drawn in a scene
    pub fn scene_points(&self) -> Option<(&[f64], &[f64], &[f64], &str)> {
        match self {
            Self::Scatter(_) => None,
            Self::Scatter3d(t) => Some((
                t.x.as_slice(),
                t.y.as_slice(),
                t.z.as_slice(),
                t.marker.color.as_str(),
            )),
            Self::Mesh3d(t) => Some((
                t.x.as_slice(),
                t.y.as_slice(),
                t.z.as_slice(),
                t.color.as_str(),
            )),
        }
    }
}

/// Marker of a 2D trace, coloured through a shared colour axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorMappedMarker {
    pub symbol: String,
    pub size: f64,
    pub opacity: f64,
    pub color: Vec<f64>,
    pub coloraxis: String,
}

/// Marker of a 3D trace with one flat colour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolidMarker {
    pub symbol: String,
    pub size: f64,
    pub opacity: f64,
    pub color: String,
}

/// 2D marker scatter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    pub marker: ColorMappedMarker,
    pub name: String,
    pub legendgroup: String,
    pub showlegend: bool,
    pub hovertemplate: String,
    pub xaxis: &'static str,
    pub yaxis: &'static str,
}

/// 3D marker scatter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scatter3d {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub mode: &'static str,
    pub marker: SolidMarker,
    pub name: String,
    pub legendgroup: String,
    pub showlegend: bool,
    pub hovertemplate: String,
    pub scene: &'static str,
}

/// Triangulated 3D surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mesh3d {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub i: Vec<usize>,
    pub j: Vec<usize>,
    pub k: Vec<usize>,
    pub color: String,
    pub opacity: f64,
    pub name: String,
    pub legendgroup: String,
    pub showlegend: bool,
    pub showscale: bool,
    pub scene: &'static str,
}
