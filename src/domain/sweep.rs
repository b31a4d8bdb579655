//! Sweep and dataset domain types
//!
//! A sweep is validated once, at construction. Everything downstream works
//! on finite, equal-length columns.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which terminal voltage was swept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SweepKind {
    /// Vgs swept, Vds held per curve (transfer characteristic)
    Gate,
    /// Vds swept, Vgs held per curve (output characteristic)
    Drain,
    /// Both voltages vary, e.g. a loaded drain
    #[default]
    Mixed,
}

impl SweepKind {
    /// Parse the short tags used in measurement scripts ("g", "d", "both")
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "g" | "gate" | "vgs" | "transfer" => Some(Self::Gate),
            "d" | "drain" | "vds" | "output" => Some(Self::Drain),
            "both" | "mixed" | "m" => Some(Self::Mixed),
            _ => None,
        }
    }
}

impl TryFrom<String> for SweepKind {
    type Error = DomainError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        Self::from_tag(&tag).ok_or_else(|| {
            DomainError::InvalidValue(format!(
                "unknown sweep kind '{}' (expected gate, drain or mixed)",
                tag
            ))
        })
    }
}

impl fmt::Display for SweepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gate => write!(f, "gate"),
            Self::Drain => write!(f, "drain"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

/// One measured operating point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Gate-source voltage in volts
    pub vgs: f64,
    /// Drain-source voltage in volts
    pub vds: f64,
    /// Drain current in amperes
    pub ids: f64,
}

impl SweepPoint {
    pub fn new(vgs: f64, vds: f64, ids: f64) -> Self {
        Self { vgs, vds, ids }
    }

    /// log10 of the current, or `None` when the current is not positive
    #[inline]
    pub fn log_ids(&self) -> Option<f64> {
        (self.ids > 0.0).then(|| (self.ids + LOG_EPSILON).log10())
    }
}

/// Offset added before the log transform
pub const LOG_EPSILON: f64 = 1e-12;

/// A single measurement pass
///
/// Construct through [`Sweep::new`] or [`Sweep::from_columns`]; both reject
/// non-finite values so panel shaping never sees NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sweep {
    kind: SweepKind,
    points: Vec<SweepPoint>,
    source: Option<String>,
}

impl Sweep {
    /// Create a sweep from points
    ///
    /// # Errors
    /// Returns `DomainError::MalformedSweep` if any value is NaN or infinite
    pub fn new(kind: SweepKind, points: Vec<SweepPoint>) -> Result<Self, DomainError> {
        if let Some((row, _)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.vgs.is_finite() && p.vds.is_finite() && p.ids.is_finite()))
        {
            return Err(DomainError::MalformedSweep(format!(
                "non-finite value at row {}",
                row + 1
            )));
        }

        Ok(Self {
            kind,
            points,
            source: None,
        })
    }

    /// Create a sweep from three parallel columns
    ///
    /// # Errors
    /// Returns `DomainError::MalformedSweep` if the columns differ in length
    /// or hold non-finite values
    pub fn from_columns(
        kind: SweepKind,
        vgs: &[f64],
        vds: &[f64],
        ids: &[f64],
    ) -> Result<Self, DomainError> {
        if vgs.len() != vds.len() || vgs.len() != ids.len() {
            return Err(DomainError::MalformedSweep(format!(
                "column lengths differ (vgs={}, vds={}, ids={})",
                vgs.len(),
                vds.len(),
                ids.len()
            )));
        }

        let points = vgs
            .iter()
            .zip(vds)
            .zip(ids)
            .map(|((&g, &d), &i)| SweepPoint::new(g, d, i))
            .collect();

        Self::new(kind, points)
    }

    /// Attach a description of where the sweep came from (file path etc.)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> SweepKind {
        self.kind
    }

    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points usable on a log-current axis
    pub fn positive_count(&self) -> usize {
        self.points.iter().filter(|p| p.ids > 0.0).count()
    }
}

/// The sweeps measured on one device under test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    name: String,
    sweeps: Vec<Sweep>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, sweeps: Vec<Sweep>) -> Self {
        Self {
            name: name.into(),
            sweeps,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sweeps(&self) -> &[Sweep] {
        &self.sweeps
    }

    /// Total points over all sweeps
    pub fn point_count(&self) -> usize {
        self.sweeps.iter().map(Sweep::len).sum()
    }

    /// Check that the dataset has something to plot
    ///
    /// # Errors
    /// Returns `DomainError::EmptySweepSet` if there are no sweeps or every
    /// sweep is empty
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.point_count() == 0 {
            return Err(DomainError::EmptySweepSet(format!(
                "dataset '{}' has no points",
                self.name
            )));
        }
        Ok(())
    }

    /// Summary statistics for display
    pub fn summary(&self) -> DatasetSummary {
        let mut summary = DatasetSummary {
            name: self.name.clone(),
            sweeps: self.sweeps.len(),
            points: self.point_count(),
            ..DatasetSummary::default()
        };

        for sweep in &self.sweeps {
            match sweep.kind() {
                SweepKind::Gate => summary.gate_sweeps += 1,
                SweepKind::Drain => summary.drain_sweeps += 1,
                SweepKind::Mixed => summary.mixed_sweeps += 1,
            }
            summary.positive_points += sweep.positive_count();
            for p in sweep.points() {
                summary.vgs = widen(summary.vgs, p.vgs);
                summary.vds = widen(summary.vds, p.vds);
                summary.ids = widen(summary.ids, p.ids);
            }
        }

        summary
    }
}

fn widen(range: Option<(f64, f64)>, v: f64) -> Option<(f64, f64)> {
    Some(match range {
        Some((lo, hi)) => (lo.min(v), hi.max(v)),
        None => (v, v),
    })
}

/// Per-dataset counts and value ranges
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub name: String,
    pub sweeps: usize,
    pub gate_sweeps: usize,
    pub drain_sweeps: usize,
    pub mixed_sweeps: usize,
    pub points: usize,
    pub positive_points: usize,
    pub vgs: Option<(f64, f64)>,
    pub vds: Option<(f64, f64)>,
    pub ids: Option<(f64, f64)>,
}
