//! Static PNG previews
//!
//! Draws the 3D scatter of a figure (log scene when present, else linear) as
//! a small bitmap for gallery indexes. No text is drawn, so no font backend
//! is needed.

use crate::domain::style::{named_rgb, FALLBACK_COLOR};
use crate::error::RenderError;
use crate::figure::{Figure, Panel, Trace};

use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

/// Default preview size in pixels
pub const PREVIEW_SIZE: (u32, u32) = (320, 240);

const POINT_RADIUS: i32 = 2;

/// One coloured point cloud
struct Cloud<'a> {
    x: &'a [f64],
    y: &'a [f64],
    z: &'a [f64],
    color: RGBColor,
}

fn rgb(name: &str) -> RGBColor {
    let (r, g, b) = named_rgb(name)
        .or_else(|| named_rgb(FALLBACK_COLOR))
        .unwrap_or((128, 128, 128));
    RGBColor(r, g, b)
}

fn scene_clouds(figure: &Figure) -> Vec<Cloud<'_>> {
    for panel in [Panel::Log3d, Panel::Lin3d] {
        let clouds: Vec<Cloud<'_>> = figure
            .panel_traces(panel)
            .filter_map(Trace::scene_points)
            .map(|(x, y, z, color)| Cloud {
                x,
                y,
                z,
                color: rgb(color),
            })
            .collect();
        if !clouds.is_empty() {
            return clouds;
        }
    }
    Vec::new()
}

/// `min..max` over `values`, padded when the span is zero
fn padded_range<'a>(values: impl Iterator<Item = &'a f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad)..(hi + pad)
}

fn preview_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Preview(e.to_string())
}

/// Render a PNG preview of `figure` to `path`
///
/// # Errors
/// Returns `RenderError::Preview` if the figure has no 3D points or drawing
/// fails, `RenderError::Write` if the parent directory cannot be created
pub fn render_preview(figure: &Figure, path: &Path, size: (u32, u32)) -> Result<(), RenderError> {
    let clouds = scene_clouds(figure);
    if clouds.is_empty() {
        return Err(RenderError::Preview(
            "figure has no 3D points to preview".to_string(),
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| RenderError::Write {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let x_range = padded_range(clouds.iter().flat_map(|c| c.x.iter()));
    let y_range = padded_range(clouds.iter().flat_map(|c| c.y.iter()));
    let z_range = padded_range(clouds.iter().flat_map(|c| c.z.iter()));

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(preview_error)?;

    // plotters draws its y axis vertically, so current goes on y
    let mut chart = ChartBuilder::on(&root)
        .margin(8)
        .build_cartesian_3d(x_range, z_range, y_range)
        .map_err(preview_error)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.7;
        pb.pitch = 0.35;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    for cloud in &clouds {
        let style = cloud.color.mix(0.7).filled();
        chart
            .draw_series(
                cloud
                    .x
                    .iter()
                    .zip(cloud.y)
                    .zip(cloud.z)
                    .map(|((&vgs, &vds), &current)| {
                        Circle::new((vgs, current, vds), POINT_RADIUS, style)
                    }),
            )
            .map_err(preview_error)?;
    }

    root.present().map_err(preview_error)?;
    log::info!("Wrote preview {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dataset, PanelView, PlotOptions};
    use crate::mock::{drain_sweep, gate_sweep};
    use crate::services::panel_builder::build_panels;
    use tempfile::TempDir;

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([1.0, 1.0].iter()), 0.5..1.5);
        assert_eq!(padded_range([f64::NAN].iter()), 0.0..1.0);
        let r = padded_range([0.0, 10.0].iter());
        assert_eq!(r, -0.5..10.5);
    }

    #[test]
    fn test_render_preview_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("thumbs/m1.png");
        let figure = build_panels(
            &[Dataset::new("M1", vec![gate_sweep(20), drain_sweep(20)])],
            &PlotOptions::default(),
            None,
        )
        .unwrap();

        render_preview(&figure, &path, PREVIEW_SIZE).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_preview_with_unknown_color() {
        let dir = TempDir::new().unwrap();
        let options = PlotOptions {
            color: Some("#aéaé".to_string()),
            ..PlotOptions::default()
        };
        let figure =
            build_panels(&[Dataset::new("M1", vec![gate_sweep(10)])], &options, None).unwrap();

        let path = dir.path().join("m1.png");
        render_preview(&figure, &path, PREVIEW_SIZE).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_preview_without_scenes_fails() {
        let dir = TempDir::new().unwrap();
        let options = PlotOptions {
            view: PanelView::Vgs,
            ..PlotOptions::default()
        };
        let figure =
            build_panels(&[Dataset::new("M1", vec![gate_sweep(5)])], &options, None).unwrap();

        let result = render_preview(&figure, &dir.path().join("m1.png"), PREVIEW_SIZE);
        assert!(matches!(result, Err(RenderError::Preview(_))));
    }
}
