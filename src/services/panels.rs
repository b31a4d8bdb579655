//! Sweep-to-panel data shaping
//!
//! Turns one dataset into the series each of the six panels draws. Pure data
//! work: no figure state is read or written here.

use crate::domain::{Dataset, MixedPlacement, PlotOptions, SweepKind, SweepPoint};
use crate::error::DomainError;
use crate::figure::Panel;
use crate::services::sampling::downsample;

use std::collections::BTreeMap;

/// Geometry of one panel
///
/// 2D panels use `x`, `y` and the hidden-axis `color`; 3D panels use `x`
/// (Vgs), `y` (Vds) and `z` (current).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub color: Vec<f64>,
}

impl PanelSeries {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// The shaped panels of one dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelSet {
    panels: BTreeMap<Panel, PanelSeries>,
    /// Points kept after down-sampling, over all sweeps
    pub points: usize,
    /// Of those, points with a positive current
    pub positive_points: usize,
    /// Hidden Vds values of the Ids-Vgs column
    pub vgs_column_hidden: Vec<f64>,
    /// Hidden Vgs values of the Ids-Vds column
    pub vds_column_hidden: Vec<f64>,
}

impl PanelSet {
    pub fn get(&self, panel: Panel) -> Option<&PanelSeries> {
        self.panels.get(&panel)
    }

    /// Panels in grid order (log row first, left to right)
    pub fn iter(&self) -> impl Iterator<Item = (Panel, &PanelSeries)> {
        self.panels.iter().map(|(p, s)| (*p, s))
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    fn insert(&mut self, panel: Panel, series: PanelSeries) {
        if !series.is_empty() {
            self.panels.insert(panel, series);
        }
    }
}

/// Which columns a sweep of `kind` contributes to: (Ids-Vgs, Ids-Vds)
fn columns_for(kind: SweepKind, mixed: MixedPlacement) -> (bool, bool) {
    match kind {
        SweepKind::Gate => (true, false),
        SweepKind::Drain => (false, true),
        SweepKind::Mixed => match mixed {
            MixedPlacement::Both => (true, true),
            MixedPlacement::Gate => (true, false),
            MixedPlacement::Drain => (false, true),
        },
    }
}

/// 2D series: `x` from `sweep_axis`, colour from `hidden_axis`
fn shape_2d(
    points: &[SweepPoint],
    sweep_axis: fn(&SweepPoint) -> f64,
    hidden_axis: fn(&SweepPoint) -> f64,
    log: bool,
) -> PanelSeries {
    let mut series = PanelSeries::default();
    for p in points {
        let y = if log {
            match p.log_ids() {
                Some(y) => y,
                None => continue,
            }
        } else {
            p.ids
        };
        series.x.push(sweep_axis(p));
        series.y.push(y);
        series.color.push(hidden_axis(p));
    }
    series
}

fn shape_3d(points: &[SweepPoint], log: bool) -> PanelSeries {
    let mut series = PanelSeries::default();
    for p in points {
        let z = if log {
            match p.log_ids() {
                Some(z) => z,
                None => continue,
            }
        } else {
            p.ids
        };
        series.x.push(p.vgs);
        series.y.push(p.vds);
        series.z.push(z);
    }
    series
}

fn positive(points: &[SweepPoint]) -> usize {
    points.iter().filter(|p| p.ids > 0.0).count()
}

/// Shape `dataset` into panel series according to `options`
///
/// Each sweep is down-sampled on its own with seed `options.seed + index`, so
/// the same points appear in every panel that sweep feeds.
///
/// # Errors
/// - `DomainError::EmptySweepSet` if the dataset has no points, or the log
///   row is the only requested row and no current is positive
pub fn shape_panels(dataset: &Dataset, options: &PlotOptions) -> Result<PanelSet, DomainError> {
    dataset.validate()?;

    let mut vgs_column: Vec<SweepPoint> = Vec::new();
    let mut vds_column: Vec<SweepPoint> = Vec::new();
    let mut all: Vec<SweepPoint> = Vec::new();

    for (index, sweep) in dataset.sweeps().iter().enumerate() {
        let seed = options.seed.wrapping_add(index as u64);
        let sampled = downsample(sweep.points(), options.max_samples, seed);
        let (in_vgs, in_vds) = columns_for(sweep.kind(), options.mixed);

        if in_vgs {
            vgs_column.extend_from_slice(&sampled);
        }
        if in_vds {
            vds_column.extend_from_slice(&sampled);
        }
        all.extend_from_slice(&sampled);
    }

    let view = options.view;
    let axis = options.axis_mode;

    let positive_points = positive(&all);

    let requested_positive = [
        (view.shows_vgs(), &vgs_column),
        (view.shows_vds(), &vds_column),
        (view.shows_3d(), &all),
    ]
    .iter()
    .filter(|(shown, _)| *shown)
    .map(|(_, points)| positive(points))
    .sum::<usize>();

    let mut log_rows = axis.wants_log();
    if log_rows && requested_positive == 0 {
        if !axis.wants_linear() {
            return Err(DomainError::EmptySweepSet(format!(
                "dataset '{}' has no positive drain current to draw on a log axis",
                dataset.name()
            )));
        }
        log::warn!(
            "Dataset '{}' has no positive drain current; skipping log panels",
            dataset.name()
        );
        log_rows = false;
    }

    let mut set = PanelSet {
        points: all.len(),
        positive_points,
        ..PanelSet::default()
    };

    let vgs = |p: &SweepPoint| p.vgs;
    let vds = |p: &SweepPoint| p.vds;

    if view.shows_vgs() && !vgs_column.is_empty() {
        if log_rows {
            set.insert(Panel::LogVgs, shape_2d(&vgs_column, vgs, vds, true));
        }
        if axis.wants_linear() {
            set.insert(Panel::LinVgs, shape_2d(&vgs_column, vgs, vds, false));
        }
        set.vgs_column_hidden = vgs_column.iter().map(vds).collect();
    }

    if view.shows_vds() && !vds_column.is_empty() {
        if log_rows {
            set.insert(Panel::LogVds, shape_2d(&vds_column, vds, vgs, true));
        }
        if axis.wants_linear() {
            set.insert(Panel::LinVds, shape_2d(&vds_column, vds, vgs, false));
        }
        set.vds_column_hidden = vds_column.iter().map(vgs).collect();
    }

    if view.shows_3d() {
        if log_rows {
            set.insert(Panel::Log3d, shape_3d(&all, true));
        }
        if axis.wants_linear() {
            set.insert(Panel::Lin3d, shape_3d(&all, false));
        }
    }

    if set.is_empty() {
        log::warn!(
            "Dataset '{}' has no sweeps for the '{}' view",
            dataset.name(),
            view
        );
    }

    log::debug!(
        "Shaped dataset '{}': {} points ({} positive) into {} panels",
        dataset.name(),
        set.points,
        set.positive_points,
        set.panels.len()
    );

    Ok(set)
}
