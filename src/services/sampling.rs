//! Point down-sampling and adaptive marker opacity

use crate::domain::SweepPoint;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use std::borrow::Cow;

/// Opacity for sparse data
pub const ALPHA_SPARSE: f64 = 0.8;
/// Opacity for dense data
pub const ALPHA_DENSE: f64 = 0.1;
/// At or below this many points the sparse opacity applies
pub const ALPHA_SPARSE_POINTS: usize = 100;
/// At or above this many points the dense opacity applies
pub const ALPHA_DENSE_POINTS: usize = 1000;

/// Marker opacity for `n` accumulated points
///
/// 0.8 up to 100 points, 0.1 from 1000 points, linear in between.
/// Never increases with `n`.
pub fn adaptive_alpha(n: usize) -> f64 {
    let n = n.max(1);
    if n <= ALPHA_SPARSE_POINTS {
        ALPHA_SPARSE
    } else if n >= ALPHA_DENSE_POINTS {
        ALPHA_DENSE
    } else {
        let span = (ALPHA_DENSE_POINTS - ALPHA_SPARSE_POINTS) as f64;
        ALPHA_SPARSE - (n - ALPHA_SPARSE_POINTS) as f64 * ((ALPHA_SPARSE - ALPHA_DENSE) / span)
    }
}

/// Reduce `points` to at most `max_samples` entries
///
/// Draws a uniform subset without replacement from an RNG seeded with `seed`,
/// so the same input, limit and seed always select the same points. Selected
/// points keep their original order. Returns the input untouched when no
/// limit is set or the input already fits.
pub fn downsample(
    points: &[SweepPoint],
    max_samples: Option<usize>,
    seed: u64,
) -> Cow<'_, [SweepPoint]> {
    let Some(max) = max_samples else {
        return Cow::Borrowed(points);
    };

    if max >= points.len() {
        return Cow::Borrowed(points);
    }

    let keep = max.max(1);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = index::sample(&mut rng, points.len(), keep).into_vec();
    picked.sort_unstable();

    log::debug!(
        "Down-sampled {} points to {} (seed {})",
        points.len(),
        keep,
        seed
    );

    Cow::Owned(picked.into_iter().map(|i| points[i]).collect())
}
