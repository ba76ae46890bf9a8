use lazy_static::lazy_static;
use tracing::warn;

use crate::core::shared::{Dot, NdVector};

/// Number of bits of a normal index in the bitstream.
pub(crate) const NORMAL_INDEX_SLOT: usize = 17;

pub(crate) const NUM_SPHERE_POINTS: usize = 1 << NORMAL_INDEX_SLOT;

/// Half-width of the first window searched around the guessed index.
const INITIAL_WINDOW: usize = 1024;

lazy_static! {
    /// Points of the Fibonacci lattice on the unit sphere, ordered by decreasing 'y'.
    static ref FIBONACCI_SPHERE: Vec<NdVector<3, f64>> = fibonacci_sphere(NUM_SPHERE_POINTS);
}

fn fibonacci_sphere(n: usize) -> Vec<NdVector<3, f64>> {
    let golden_angle = std::f64::consts::PI * (3.0 - 5_f64.sqrt());
    (0..n)
        .map(|i| {
            let y = 1.0 - (i as f64 / (n - 1) as f64) * 2.0;
            let radius = (1.0 - y * y).sqrt();
            let theta = golden_angle * i as f64;
            NdVector::from([theta.cos() * radius, y, theta.sin() * radius])
        })
        .collect()
}

/// The unit direction stored under 'index'. Only the lowest 17 bits of 'index' are used.
pub(crate) fn direction(index: u64) -> NdVector<3, f64> {
    FIBONACCI_SPHERE[index as usize % NUM_SPHERE_POINTS]
}

/// Index of the lattice point closest to the direction of 'normal'.
pub(crate) fn nearest_index(normal: NdVector<3, f64>) -> u64 {
    let Some(normal) = normal.normalize() else {
        warn!("zero-length normal; storing the north pole instead");
        return 0;
    };
    let points = &*FIBONACCI_SPHERE;
    let last = (NUM_SPHERE_POINTS - 1) as f64;
    // index whose 'y' is closest to the one of the normal
    let index_of_y = |y: f64| ((1.0 - y) / 2.0 * last).clamp(0.0, last);

    let dist2 = |i: usize| {
        let d = points[i] - normal;
        d.dot(d)
    };
    let closest_in = |range: std::ops::RangeInclusive<usize>, mut best: (usize, f64)| {
        for i in range {
            let d = dist2(i);
            if d < best.1 {
                best = (i, d);
            }
        }
        best
    };

    let guess = index_of_y(normal.get(1)).round() as usize;
    let best = closest_in(
        guess.saturating_sub(INITIAL_WINDOW)..=(guess + INITIAL_WINDOW).min(NUM_SPHERE_POINTS - 1),
        (guess, dist2(guess)),
    );

    // any closer point differs in 'y' by less than the best distance so far
    let radius = best.1.sqrt();
    let lo = index_of_y(normal.get(1) + radius).floor() as usize;
    let hi = index_of_y(normal.get(1) - radius).ceil() as usize;
    closest_in(lo..=hi, best).0 as u64
}
