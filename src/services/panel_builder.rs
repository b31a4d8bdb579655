//! Panel builder service
//!
//! Adds datasets to a figure: shapes each dataset, then turns the shaped
//! panels into traces and updates the figure's shared colour, opacity and
//! legend state.

use crate::domain::style::{is_cross_marker, plotly_symbol, CROSS_MARKER_SCALE_3D};
use crate::domain::{Dataset, PlotOptions, Render3d, DEFAULT_TITLE};
use crate::error::DomainError;
use crate::figure::trace::{ColorMappedMarker, Mesh3d, Scatter, Scatter3d, SolidMarker};
use crate::figure::{ColorAxis, Figure, Panel, PanelColumn, Placement, Trace};
use crate::services::panels::{shape_panels, PanelSeries, PanelSet};
use crate::services::sampling::adaptive_alpha;
use crate::services::triangulation::{delaunay, is_regular_grid};

use std::collections::HashSet;

/// Service that builds and overlays the six-panel figure
#[derive(Debug, Clone)]
pub struct PanelBuilder {
    options: PlotOptions,
}

/// Per-dataset trace styling resolved from options and figure state
struct DatasetStyle {
    ordinal: usize,
    label: String,
    alpha: f64,
    symbol: String,
    size: f64,
    solid_color: String,
}

impl PanelBuilder {
    /// Create a builder, validating the options
    ///
    /// # Errors
    /// Returns `DomainError` if the options are out of range
    pub fn new(options: PlotOptions) -> Result<Self, DomainError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Add `datasets` to `figure`, or to a fresh figure when `None`
    ///
    /// # Errors
    /// Returns the first `DomainError` raised while shaping a dataset
    pub fn build(&self, datasets: &[Dataset], figure: Option<Figure>) -> Result<Figure, DomainError> {
        let mut figure = figure.unwrap_or_else(|| Figure::from_options(&self.options));
        self.extend(&mut figure, datasets)?;
        Ok(figure)
    }

    /// Overlay `datasets` onto an existing figure
    ///
    /// Every dataset is shaped before the figure is touched, so an error
    /// leaves `figure` exactly as it was.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidValue` when the figure was laid out for a
    /// different view, else the first `DomainError` raised while shaping a
    /// dataset
    pub fn extend(&self, figure: &mut Figure, datasets: &[Dataset]) -> Result<(), DomainError> {
        if figure.view() != self.options.view {
            return Err(DomainError::InvalidValue(format!(
                "cannot overlay a '{}' view onto a figure laid out for '{}'",
                self.options.view,
                figure.view()
            )));
        }

        let shaped = datasets
            .iter()
            .map(|dataset| shape_panels(dataset, &self.options).map(|set| (dataset, set)))
            .collect::<Result<Vec<_>, _>>()?;

        figure.set_cameras_linked(self.options.link_3d);
        for (dataset, set) in shaped {
            self.add_shaped(figure, dataset, &set);
        }
        Ok(())
    }

    /// Append one already-shaped dataset to the figure
    pub fn add_shaped(&self, figure: &mut Figure, dataset: &Dataset, set: &PanelSet) {
        let style = self.resolve_style(figure, dataset, set);

        figure.widen_color_range(ColorAxis::Vds, &set.vgs_column_hidden);
        figure.widen_color_range(ColorAxis::Vgs, &set.vds_column_hidden);

        let mut legend_columns: HashSet<PanelColumn> = HashSet::new();
        for (panel, series) in set.iter() {
            let show_legend = legend_columns.insert(panel.column());
            let trace = if panel.is_3d() {
                self.trace_3d(panel, series, &style, show_legend)
            } else {
                self.trace_2d(panel, series, &style, show_legend)
            };
            figure.push_trace(panel, style.ordinal, trace);
        }

        if self.options.label.is_some() && figure.title() == DEFAULT_TITLE {
            figure.set_title(&format!("{} (last added: {})", DEFAULT_TITLE, style.label));
        }

        log::debug!(
            "Added dataset '{}' as #{} (alpha {:.3}, {} total points)",
            style.label,
            style.ordinal,
            style.alpha,
            figure.total_points()
        );
    }

    fn resolve_style(&self, figure: &mut Figure, dataset: &Dataset, set: &PanelSet) -> DatasetStyle {
        let ordinal = figure.register_dataset(set.points);

        let label = match &self.options.label {
            Some(label) => label.clone(),
            None if dataset.name().trim().is_empty() => format!("dataset {}", ordinal),
            None => dataset.name().to_string(),
        };

        let alpha = self
            .options
            .alpha
            .unwrap_or_else(|| adaptive_alpha(figure.total_points()));

        let solid_color = match &self.options.color {
            Some(color) => color.clone(),
            None => figure.label_color(&label),
        };

        DatasetStyle {
            ordinal,
            label,
            alpha,
            symbol: plotly_symbol(&self.options.marker),
            size: self.options.marker_size,
            solid_color,
        }
    }

    fn trace_2d(
        &self,
        panel: Panel,
        series: &PanelSeries,
        style: &DatasetStyle,
        show_legend: bool,
    ) -> Trace {
        let (x_name, hidden_name) = match panel.column() {
            PanelColumn::Vgs => ("Vgs", "Vds"),
            _ => ("Vds", "Vgs"),
        };
        let y_part = if panel.is_log() {
            "log10(Ids)=%{y:.3g}".to_string()
        } else {
            "Ids=%{y:.3e} A".to_string()
        };
        let hovertemplate = format!(
            "{x}=%{{x:.3g}} V<br>{y}<br>{h}=%{{marker.color:.3g}} V<extra>{label}</extra>",
            x = x_name,
            y = y_part,
            h = hidden_name,
            label = style.label
        );

        let (xaxis, yaxis) = match panel.placement() {
            Placement::Axes { x, y } => (x, y),
            Placement::Scene(_) => ("x", "y"),
        };
        let coloraxis = panel.color_axis().unwrap_or(ColorAxis::Vds).id();

        Trace::Scatter(Scatter {
            x: series.x.clone(),
            y: series.y.clone(),
            mode: "markers",
            marker: ColorMappedMarker {
                symbol: style.symbol.clone(),
                size: style.size,
                opacity: style.alpha,
                color: series.color.clone(),
                coloraxis: coloraxis.to_string(),
            },
            name: format!("{} (Ids-{})", style.label, x_name),
            legendgroup: style.label.clone(),
            showlegend: show_legend,
            hovertemplate,
            xaxis,
            yaxis,
        })
    }

    fn wants_surface(&self, series: &PanelSeries) -> bool {
        match self.options.render_3d {
            Render3d::Points => false,
            Render3d::Surface => true,
            Render3d::Auto => is_regular_grid(&series.x, &series.y),
        }
    }

    fn trace_3d(
        &self,
        panel: Panel,
        series: &PanelSeries,
        style: &DatasetStyle,
        show_legend: bool,
    ) -> Trace {
        let scene = match panel.placement() {
            Placement::Scene(scene) => scene,
            Placement::Axes { .. } => "scene",
        };

        if series.len() >= 3 && self.wants_surface(series) {
            let triangles = delaunay(&series.x, &series.y);
            if !triangles.is_empty() {
                let (i, (j, k)): (Vec<usize>, (Vec<usize>, Vec<usize>)) =
                    triangles.iter().map(|t| (t[0], (t[1], t[2]))).unzip();

                return Trace::Mesh3d(Mesh3d {
                    x: series.x.clone(),
                    y: series.y.clone(),
                    z: series.z.clone(),
                    i,
                    j,
                    k,
                    color: style.solid_color.clone(),
                    opacity: style.alpha,
                    name: style.label.clone(),
                    legendgroup: style.label.clone(),
                    showlegend: show_legend,
                    showscale: false,
                    scene,
                });
            }
            log::debug!(
                "No triangles for '{}' on {}; drawing points",
                style.label,
                panel
            );
        }

        let scale = if is_cross_marker(&self.options.marker) {
            CROSS_MARKER_SCALE_3D
        } else {
            1.0
        };
        let z_part = if panel.is_log() {
            "log10(Ids)=%{z:.3g}"
        } else {
            "Ids=%{z:.3e} A"
        };

        Trace::Scatter3d(Scatter3d {
            x: series.x.clone(),
            y: series.y.clone(),
            z: series.z.clone(),
            mode: "markers",
            marker: SolidMarker {
                symbol: style.symbol.clone(),
                size: style.size * scale,
                opacity: style.alpha,
                color: style.solid_color.clone(),
            },
            name: style.label.clone(),
            legendgroup: style.label.clone(),
            showlegend: show_legend,
            hovertemplate: format!(
                "Vgs=%{{x:.3g}} V<br>Vds=%{{y:.3g}} V<br>{}<extra>{}</extra>",
                z_part, style.label
            ),
            scene,
        })
    }
}

/// Build or extend a six-panel figure
///
/// Convenience wrapper around [`PanelBuilder`]: validates `options`, shapes
/// every dataset and appends the traces to `figure` (a new figure when
/// `None`).
///
/// # Errors
/// Returns `DomainError` for invalid options or a dataset that cannot be
/// shaped; the figure is then not modified
pub fn build_panels(
    datasets: &[Dataset],
    options: &PlotOptions,
    figure: Option<Figure>,
) -> Result<Figure, DomainError> {
    PanelBuilder::new(options.clone())?.build(datasets, figure)
}
