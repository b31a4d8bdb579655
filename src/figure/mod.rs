//! The figure accumulator
//!
//! A [`Figure`] owns every trace added to it plus the state shared between
//! overlays: the running colour ranges of the two 2D colour axes, the colour
//! assigned to each dataset label, and the accumulated point count that
//! drives adaptive opacity. Callers pass the same figure back in to overlay
//! more datasets.

pub mod layout;
pub mod trace;

pub use layout::{ColorAxis, Layout, Panel, PanelColumn, Placement};
pub use trace::Trace;

use crate::domain::style::{palette_color, plotly_colorscale};
use crate::domain::{PanelView, PlotOptions};
use serde::Serialize;
use serde_json::json;

/// Running `[min, max]` over every value seen so far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    min: f64,
    max: f64,
}

impl Default for ColorRange {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl ColorRange {
    /// Widen the range to cover `values`; non-finite values are ignored
    pub fn include(&mut self, values: &[f64]) {
        for &v in values.iter().filter(|v| v.is_finite()) {
            self.min = self.min.min(v);
            self.max = self.max.max(v);
        }
    }

    /// `(min, max)` once at least one value has been seen
    pub fn bounds(&self) -> Option<(f64, f64)> {
        (self.min <= self.max).then_some((self.min, self.max))
    }

    pub fn span(&self) -> f64 {
        self.bounds().map_or(0.0, |(lo, hi)| hi - lo)
    }
}

/// A trace plus the panel it was added to
#[derive(Debug, Clone, PartialEq)]
pub struct FigureTrace {
    pub panel: Panel,
    pub dataset: usize,
    pub trace: Trace,
}

/// The six-panel figure
#[derive(Debug, Clone)]
pub struct Figure {
    view: PanelView,
    traces: Vec<FigureTrace>,
    layout: Layout,
    vds_range: ColorRange,
    vgs_range: ColorRange,
    label_colors: Vec<(String, String)>,
    datasets: usize,
    total_points: usize,
    cameras_linked: bool,
}

/// The JSON pair handed to `Plotly.newPlot`
#[derive(Serialize)]
struct PlotlyFigure<'a> {
    data: Vec<&'a Trace>,
    layout: &'a Layout,
}

impl Figure {
    /// Create an empty figure laid out for `view`
    pub fn new(title: &str, view: PanelView, colorscale: &str) -> Self {
        Self {
            view,
            traces: Vec::new(),
            layout: Layout::for_view(view, title, &plotly_colorscale(colorscale)),
            vds_range: ColorRange::default(),
            vgs_range: ColorRange::default(),
            label_colors: Vec::new(),
            datasets: 0,
            total_points: 0,
            cameras_linked: true,
        }
    }

    /// Create an empty figure from plotting options
    pub fn from_options(options: &PlotOptions) -> Self {
        let mut figure = Self::new(&options.title, options.view, &options.colorscale);
        figure.cameras_linked = options.link_3d;
        figure
    }

    pub fn view(&self) -> PanelView {
        self.view
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn traces(&self) -> &[FigureTrace] {
        &self.traces
    }

    pub fn title(&self) -> &str {
        self.layout.title().unwrap_or_default()
    }

    pub fn set_title(&mut self, title: &str) {
        self.layout.set_title(title);
    }

    /// Number of datasets added so far
    pub fn dataset_count(&self) -> usize {
        self.datasets
    }

    /// Points accumulated over every dataset added so far
    pub fn total_points(&self) -> usize {
        self.total_points
    }

    pub fn cameras_linked(&self) -> bool {
        self.cameras_linked
    }

    pub fn set_cameras_linked(&mut self, linked: bool) {
        self.cameras_linked = linked;
    }

    /// Register a new dataset, returning its 1-based ordinal
    pub(crate) fn register_dataset(&mut self, points: usize) -> usize {
        self.datasets += 1;
        self.total_points += points;
        self.datasets
    }

    /// Current range of a colour axis
    pub fn color_range(&self, axis: ColorAxis) -> Option<(f64, f64)> {
        match axis {
            ColorAxis::Vds => self.vds_range.bounds(),
            ColorAxis::Vgs => self.vgs_range.bounds(),
        }
    }

    /// Widen a colour axis to cover `values` and push the bounds to the layout
    ///
    /// Every 2D trace references its colour axis, so traces added earlier are
    /// rescaled together with the new ones.
    pub(crate) fn widen_color_range(&mut self, axis: ColorAxis, values: &[f64]) {
        let range = match axis {
            ColorAxis::Vds => &mut self.vds_range,
            ColorAxis::Vgs => &mut self.vgs_range,
        };
        range.include(values);

        if let Some((lo, hi)) = range.bounds() {
            self.layout
                .update(json!({ axis.id(): { "cmin": lo, "cmax": hi } }));
        }
    }

    /// Colour for `label`, assigning the next palette colour on first use
    pub(crate) fn label_color(&mut self, label: &str) -> String {
        if let Some((_, color)) = self.label_colors.iter().find(|(l, _)| l == label) {
            return color.clone();
        }
        let color = palette_color(self.label_colors.len()).to_string();
        self.label_colors.push((label.to_string(), color.clone()));
        color
    }

    pub(crate) fn push_trace(&mut self, panel: Panel, dataset: usize, trace: Trace) {
        self.traces.push(FigureTrace {
            panel,
            dataset,
            trace,
        });
    }

    /// Traces drawn on `panel`
    pub fn panel_traces(&self, panel: Panel) -> impl Iterator<Item = &Trace> {
        self.traces
            .iter()
            .filter(move |t| t.panel == panel)
            .map(|t| &t.trace)
    }

    /// Total points drawn on `panel`
    pub fn panel_point_count(&self, panel: Panel) -> usize {
        self.panel_traces(panel).map(Trace::len).sum()
    }

    /// Names of the traces that show a legend entry
    pub fn legend_entries(&self) -> Vec<&str> {
        self.traces
            .iter()
            .filter(|t| t.trace.show_legend())
            .map(|t| t.trace.name())
            .collect()
    }

    /// Serialize data and layout as the plotly.js figure JSON
    pub fn to_plotly_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&PlotlyFigure {
            data: self.traces.iter().map(|t| &t.trace).collect(),
            layout: &self.layout,
        })
    }
}
