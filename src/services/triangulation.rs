//! Planar triangulation of (Vgs, Vds) points for 3D surfaces
//!
//! Bowyer-Watson Delaunay triangulation over coordinates normalised to the
//! unit square, plus a regular-grid detector for the `auto` surface mode.

/// Coordinates closer than this (after normalisation) are one vertex
const MERGE_TOLERANCE: f64 = 1e-9;

/// Super-triangle half size in normalised units
const SUPER_SIZE: f64 = 1.0e4;

/// Above this many vertices triangulation time grows noticeably
pub const LARGE_SURFACE_POINTS: usize = 5000;

/// Whether `vertices` is enough to make triangulation slow
pub fn is_large_surface(vertices: usize) -> bool {
    vertices > LARGE_SURFACE_POINTS
}

#[derive(Debug, Clone, Copy)]
struct Tri {
    v: [usize; 3],
    cx: f64,
    cy: f64,
    r2: f64,
}

impl Tri {
    fn new(v: [usize; 3], pts: &[(f64, f64)]) -> Self {
        let (ax, ay) = pts[v[0]];
        let (bx, by) = pts[v[1]];
        let (cx, cy) = pts[v[2]];

        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d.abs() < f64::EPSILON * 1e-3 {
            // collinear: always replaced by the next insertion
            return Self {
                v,
                cx: 0.0,
                cy: 0.0,
                r2: f64::INFINITY,
            };
        }

        let a2 = ax * ax + ay * ay;
        let b2 = bx * bx + by * by;
        let c2 = cx * cx + cy * cy;
        let ux = (a2 * (by - cy) + b2 * (cy - ay) + c2 * (ay - by)) / d;
        let uy = (a2 * (cx - bx) + b2 * (ax - cx) + c2 * (bx - ax)) / d;
        let r2 = (ax - ux).powi(2) + (ay - uy).powi(2);

        Self {
            v,
            cx: ux,
            cy: uy,
            r2,
        }
    }

    fn circumcircle_contains(&self, (x, y): (f64, f64)) -> bool {
        let d2 = (x - self.cx).powi(2) + (y - self.cy).powi(2);
        d2 < self.r2
    }
}

/// Scale values to [0, 1]; `None` when they do not span a range
fn normalise(values: &[f64]) -> Option<Vec<f64>> {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 {
        return None;
    }
    Some(values.iter().map(|v| (v - lo) / span).collect())
}

/// Delaunay triangulation of the points `(xs[i], ys[i])`
///
/// Returns triangles as index triples into the input. Duplicate points are
/// merged onto their first occurrence. Fewer than three distinct points, or
/// points that are all collinear along an axis, produce no triangles.
///
/// Each insertion scans every triangle, so cost is quadratic in the vertex
/// count; set `max_samples` for large surfaces.
pub fn delaunay(xs: &[f64], ys: &[f64]) -> Vec<[usize; 3]> {
    let n = xs.len().min(ys.len());
    if n < 3 {
        return Vec::new();
    }

    let (Some(nx), Some(ny)) = (normalise(&xs[..n]), normalise(&ys[..n])) else {
        return Vec::new();
    };

    // Distinct vertices, remembering the original index of each
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        nx[a]
            .total_cmp(&nx[b])
            .then_with(|| ny[a].total_cmp(&ny[b]))
    });

    let mut original: Vec<usize> = Vec::with_capacity(n);
    let mut pts: Vec<(f64, f64)> = Vec::with_capacity(n + 3);
    for i in order {
        let p = (nx[i], ny[i]);
        if let Some(&last) = pts.last() {
            let (lx, ly): (f64, f64) = last;
            if (lx - p.0).abs() < MERGE_TOLERANCE && (ly - p.1).abs() < MERGE_TOLERANCE {
                continue;
            }
        }
        original.push(i);
        pts.push(p);
    }

    let vertex_count = pts.len();
    if vertex_count < 3 {
        return Vec::new();
    }
    if is_large_surface(vertex_count) {
        log::warn!(
            "Triangulating {} points; consider --max-samples for faster surfaces",
            vertex_count
        );
    }

    // Super triangle enclosing the unit square
    pts.push((-SUPER_SIZE, -SUPER_SIZE));
    pts.push((3.0 * SUPER_SIZE, -SUPER_SIZE));
    pts.push((-SUPER_SIZE, 3.0 * SUPER_SIZE));
    let mut tris = vec![Tri::new(
        [vertex_count, vertex_count + 1, vertex_count + 2],
        &pts,
    )];

    for p in 0..vertex_count {
        let point = pts[p];

        let (bad, keep): (Vec<Tri>, Vec<Tri>) = tris
            .into_iter()
            .partition(|t| t.circumcircle_contains(point));
        tris = keep;

        // Cavity boundary: edges used by exactly one bad triangle
        let mut edges: Vec<(usize, usize)> = Vec::with_capacity(bad.len() * 3);
        for t in &bad {
            for (a, b) in [(t.v[0], t.v[1]), (t.v[1], t.v[2]), (t.v[2], t.v[0])] {
                edges.push(if a < b { (a, b) } else { (b, a) });
            }
        }
        edges.sort_unstable();

        let mut i = 0;
        while i < edges.len() {
            let mut j = i + 1;
            while j < edges.len() && edges[j] == edges[i] {
                j += 1;
            }
            if j - i == 1 {
                let (a, b) = edges[i];
                tris.push(Tri::new([a, b, p], &pts));
            }
            i = j;
        }
    }

    tris.into_iter()
        .filter(|t| t.v.iter().all(|&v| v < vertex_count))
        .filter(|t| t.r2.is_finite() && twice_area(&pts, t.v) > MERGE_TOLERANCE * MERGE_TOLERANCE)
        .map(|t| [original[t.v[0]], original[t.v[1]], original[t.v[2]]])
        .collect()
}

fn twice_area(pts: &[(f64, f64)], [a, b, c]: [usize; 3]) -> f64 {
    let (ax, ay) = pts[a];
    let (bx, by) = pts[b];
    let (cx, cy) = pts[c];
    ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay)).abs()
}

/// Count distinct values, merging values within `tolerance`
fn distinct_count(values: &[f64], tolerance: f64) -> usize {
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut count = 0;
    let mut last: Option<f64> = None;
    for v in sorted {
        if last.map_or(true, |l| (v - l).abs() > tolerance) {
            count += 1;
            last = Some(v);
        }
    }
    count
}

/// Whether the points cover a full rectangular Vgs x Vds grid
///
/// True when the distinct x count times the distinct y count equals the
/// number of distinct points, with at least two values on each axis.
pub fn is_regular_grid(xs: &[f64], ys: &[f64]) -> bool {
    let n = xs.len().min(ys.len());
    let (Some(nx), Some(ny)) = (normalise(&xs[..n]), normalise(&ys[..n])) else {
        return false;
    };

    let cols = distinct_count(&nx, MERGE_TOLERANCE);
    let rows = distinct_count(&ny, MERGE_TOLERANCE);
    if cols < 2 || rows < 2 {
        return false;
    }

    let mut pairs: Vec<(f64, f64)> = nx.into_iter().zip(ny).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.total_cmp(&b.1)));
    pairs.dedup_by(|a, b| {
        (a.0 - b.0).abs() < MERGE_TOLERANCE && (a.1 - b.1).abs() < MERGE_TOLERANCE
    });

    cols * rows == pairs.len()
}
