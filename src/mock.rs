//! Mock implementations for testing
//!
//! Provides synthetic sweeps, a recording viewer and a failing dataset source
//! so services can be tested without files or a browser.

use crate::domain::{Dataset, Sweep, SweepKind, SweepPoint};
use crate::error::{AppError, DomainError, RenderError};
use crate::render::Viewer;
use crate::services::gallery::DatasetSource;

use std::cell::RefCell;
use std::path::{Path, PathBuf};

fn ramp(n: usize, start: f64, stop: f64) -> Vec<f64> {
    let step = if n > 1 {
        (stop - start) / (n - 1) as f64
    } else {
        0.0
    };
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Transfer sweep: Vgs ramps 0..1.5 V at Vds = 0.1 V, currents all positive
pub fn gate_sweep(n: usize) -> Sweep {
    let points = ramp(n, 0.0, 1.5)
        .into_iter()
        .map(|vgs| SweepPoint::new(vgs, 0.1, 1e-10 * (8.0 * vgs).exp()))
        .collect();
    Sweep::new(SweepKind::Gate, points)
        .unwrap()
        .with_source("mock-gate")
}

/// Output sweep: Vds ramps 0..1.5 V at Vgs = 1.2 V, currents all positive
pub fn drain_sweep(n: usize) -> Sweep {
    let points = ramp(n, 0.0, 1.5)
        .into_iter()
        .map(|vds| SweepPoint::new(1.2, vds, 1e-4 * (1.0 - (-3.0 * vds).exp()) + 1e-9))
        .collect();
    Sweep::new(SweepKind::Drain, points)
        .unwrap()
        .with_source("mock-drain")
}

/// Full `nx` x `ny` Vgs/Vds grid as one mixed sweep
pub fn grid_sweep(nx: usize, ny: usize) -> Sweep {
    let mut points = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let vgs = i as f64 * 0.5;
            let vds = j as f64 * 0.2;
            points.push(SweepPoint::new(vgs, vds, 1e-9 + 1e-6 * vgs * vds));
        }
    }
    Sweep::new(SweepKind::Mixed, points).unwrap()
}

/// Viewer that records every path it is asked to open
#[derive(Debug, Default)]
pub struct RecordingViewer {
    opened: RefCell<Vec<PathBuf>>,
}

impl RecordingViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }
}

impl Viewer for RecordingViewer {
    fn open(&self, path: &Path) -> Result<(), RenderError> {
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

/// Viewer that always fails to launch
#[derive(Debug, Default)]
pub struct BrokenViewer;

impl Viewer for BrokenViewer {
    fn open(&self, path: &Path) -> Result<(), RenderError> {
        Err(RenderError::Viewer {
            path: path.display().to_string(),
            reason: "no browser available".to_string(),
        })
    }
}

/// Dataset source whose load always fails
#[derive(Debug)]
pub struct FailingSource {
    name: String,
}

impl FailingSource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl DatasetSource for FailingSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Dataset, AppError> {
        Err(DomainError::MalformedSweep(format!("{}: row 3: expected 3 columns", self.name)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_sweeps() {
        let gate = gate_sweep(20);
        assert_eq!(gate.len(), 20);
        assert_eq!(gate.kind(), SweepKind::Gate);
        assert_eq!(gate.positive_count(), 20);
        assert_eq!(gate.points()[19].vgs, 1.5);

        let drain = drain_sweep(1);
        assert_eq!(drain.len(), 1);
        assert_eq!(drain.points()[0].vds, 0.0);

        assert_eq!(grid_sweep(5, 4).len(), 20);
    }

    #[test]
    fn test_recording_viewer() {
        let viewer = RecordingViewer::new();
        viewer.open(Path::new("/tmp/a.html")).unwrap();
        assert_eq!(viewer.opened(), vec![PathBuf::from("/tmp/a.html")]);
        assert!(BrokenViewer.open(Path::new("a.html")).is_err());
    }

    #[test]
    fn test_failing_source() {
        let source = FailingSource::new("broken");
        assert_eq!(source.name(), "broken");
        assert!(source.load().is_err());
    }
}
