//! Panel grid and plotly layout construction
//!
//! The figure is a 2 x 3 grid: log row on top, linear row below, Ids-Vgs on
//! the left, 3D in the middle and Ids-Vds on the right. The `3d` view keeps
//! only the middle column.

use crate::domain::PanelView;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

const H_SPACING: f64 = 0.08;
const V_SPACING: f64 = 0.12;

/// Initial 3D camera eye position
pub const CAMERA_EYE: (f64, f64, f64) = (1.6, 1.6, 1.0);

/// One of the six panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    LogVgs,
    Log3d,
    LogVds,
    LinVgs,
    Lin3d,
    LinVds,
}

/// Panel column, used for legend grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PanelColumn {
    Vgs,
    Surface,
    Vds,
}

/// The two shared colour axes of the 2D panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorAxis {
    /// Left column, colour encodes Vds
    Vds,
    /// Right column, colour encodes Vgs
    Vgs,
}

impl ColorAxis {
    /// Layout key of this colour axis
    pub fn id(&self) -> &'static str {
        match self {
            Self::Vds => "coloraxis",
            Self::Vgs => "coloraxis2",
        }
    }
}

/// Where a trace is drawn: a 2D axis pair or a 3D scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Axes { x: &'static str, y: &'static str },
    Scene(&'static str),
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::LogVgs,
        Panel::Log3d,
        Panel::LogVds,
        Panel::LinVgs,
        Panel::Lin3d,
        Panel::LinVds,
    ];

    pub fn is_log(&self) -> bool {
        matches!(self, Self::LogVgs | Self::Log3d | Self::LogVds)
    }

    pub fn is_3d(&self) -> bool {
        matches!(self, Self::Log3d | Self::Lin3d)
    }

    pub fn column(&self) -> PanelColumn {
        match self {
            Self::LogVgs | Self::LinVgs => PanelColumn::Vgs,
            Self::Log3d | Self::Lin3d => PanelColumn::Surface,
            Self::LogVds | Self::LinVds => PanelColumn::Vds,
        }
    }

    /// Colour axis of a 2D panel
    pub fn color_axis(&self) -> Option<ColorAxis> {
        match self.column() {
            PanelColumn::Vgs => Some(ColorAxis::Vds),
            PanelColumn::Vds => Some(ColorAxis::Vgs),
            PanelColumn::Surface => None,
        }
    }

    /// Axis or scene references for traces on this panel
    pub fn placement(&self) -> Placement {
        match self {
            Self::LogVgs => Placement::Axes { x: "x", y: "y" },
            Self::LogVds => Placement::Axes { x: "x2", y: "y2" },
            Self::LinVgs => Placement::Axes { x: "x3", y: "y3" },
            Self::LinVds => Placement::Axes { x: "x4", y: "y4" },
            Self::Log3d => Placement::Scene("scene"),
            Self::Lin3d => Placement::Scene("scene2"),
        }
    }

    /// Subplot title
    pub fn title(&self) -> &'static str {
        match self {
            Self::LogVgs => "Ids vs Vgs [log]",
            Self::Log3d => "3D: Ids(Vgs,Vds) [log]",
            Self::LogVds => "Ids vs Vds [log]",
            Self::LinVgs => "Ids vs Vgs [lin]",
            Self::Lin3d => "3D: Ids(Vgs,Vds) [lin]",
            Self::LinVds => "Ids vs Vds [lin]",
        }
    }

    /// Current axis title
    pub fn current_label(&self) -> &'static str {
        if self.is_log() {
            "Ids (A, log10)"
        } else {
            "Ids (A)"
        }
    }

    /// Whether the panel exists in the layout for `view`
    pub fn in_view(&self, view: PanelView) -> bool {
        match view {
            PanelView::ThreeD => self.is_3d(),
            _ => true,
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Paper-coordinate domain of grid cell (`row`, `col`), both 0-based
fn cell_domain(rows: usize, cols: usize, row: usize, col: usize) -> ([f64; 2], [f64; 2]) {
    let width = (1.0 - H_SPACING * (cols - 1) as f64) / cols as f64;
    let height = (1.0 - V_SPACING * (rows - 1) as f64) / rows as f64;
    let x0 = col as f64 * (width + H_SPACING);
    // row 0 is the top row
    let y1 = 1.0 - row as f64 * (height + V_SPACING);
    ([round(x0), round(x0 + width)], [round(y1 - height), round(y1)])
}

fn round(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

fn grid_cell(panel: Panel, view: PanelView) -> (usize, usize, usize, usize) {
    let row = usize::from(!panel.is_log());
    match view {
        PanelView::ThreeD => (2, 1, row, 0),
        _ => {
            let col = match panel.column() {
                PanelColumn::Vgs => 0,
                PanelColumn::Surface => 1,
                PanelColumn::Vds => 2,
            };
            (2, 3, row, col)
        }
    }
}

fn scene_layout(x: [f64; 2], y: [f64; 2], z_title: &str) -> Value {
    let (ex, ey, ez) = CAMERA_EYE;
    json!({
        "domain": { "x": x, "y": y },
        "xaxis": { "title": { "text": "Vgs (V)" } },
        "yaxis": { "title": { "text": "Vds (V)" } },
        "zaxis": { "title": { "text": z_title } },
        "aspectmode": "cube",
        "dragmode": "turntable",
        "camera": {
            "up": { "x": 0, "y": 0, "z": 1 },
            "eye": { "x": ex, "y": ey, "z": ez }
        }
    })
}

/// Plotly layout object with in-place patching
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layout(Map<String, Value>);

impl Layout {
    /// Build the grid layout for `view`
    pub fn for_view(view: PanelView, title: &str, colorscale: &str) -> Self {
        let mut layout = Self(Map::new());
        let mut annotations = Vec::new();

        for panel in Panel::ALL.iter().filter(|p| p.in_view(view)) {
            let (rows, cols, row, col) = grid_cell(*panel, view);
            let (x, y) = cell_domain(rows, cols, row, col);

            match panel.placement() {
                Placement::Scene(scene) => {
                    layout.update(json!({ scene: scene_layout(x, y, panel.current_label()) }));
                }
                Placement::Axes { x: xref, y: yref } => {
                    let x_title = match panel.column() {
                        PanelColumn::Vgs => "Vgs (V)",
                        _ => "Vds (V)",
                    };
                    layout.update(json!({
                        axis_key("xaxis", xref): {
                            "domain": x,
                            "anchor": yref,
                            "title": { "text": x_title }
                        },
                        axis_key("yaxis", yref): {
                            "domain": y,
                            "anchor": xref,
                            "title": { "text": panel.current_label() }
                        }
                    }));
                }
            }

            annotations.push(json!({
                "text": panel.title(),
                "x": round((x[0] + x[1]) / 2.0),
                "y": y[1],
                "xref": "paper",
                "yref": "paper",
                "xanchor": "center",
                "yanchor": "bottom",
                "showarrow": false,
                "font": { "size": 16 }
            }));
        }

        layout.update(json!({
            "title": { "text": title },
            "annotations": annotations,
            "margin": { "l": 40, "r": 40, "t": 60, "b": 40 },
            "legend": {
                "orientation": "h",
                "yanchor": "bottom",
                "y": 1.02,
                "xanchor": "left",
                "x": 0.66
            },
            "uirevision": "keep"
        }));

        if view != PanelView::ThreeD {
            layout.update(json!({
                "coloraxis": {
                    "colorscale": colorscale,
                    "colorbar": { "title": { "text": "Vds (V)" }, "x": -0.08, "xanchor": "left" }
                },
                "coloraxis2": {
                    "colorscale": colorscale,
                    "colorbar": { "title": { "text": "Vgs (V)" }, "x": 1.06, "xanchor": "left" }
                }
            }));
        }

        layout
    }

    /// Deep-merge `patch` into the layout
    ///
    /// Objects merge key by key; any other value replaces what was there.
    pub fn update(&mut self, patch: Value) {
        if let Value::Object(patch) = patch {
            merge_map(&mut self.0, patch);
        }
    }

    /// Look up a value by a dotted path such as `coloraxis.cmin`
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title.text").and_then(Value::as_str)
    }

    pub fn set_title(&mut self, title: &str) {
        self.update(json!({ "title": { "text": title } }));
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn axis_key(prefix: &str, reference: &str) -> String {
    // "x" -> "xaxis", "x2" -> "xaxis2"
    format!("{}{}", prefix, &reference[1..])
}

fn merge_map(target: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_map(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}
