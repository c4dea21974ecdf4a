//! Closed-form uniform samplers for the ball and the cube.
//!
//! Both samplers draw every random number they need from the generator
//! first, in one sequential pass, then map the raw draws to coordinates on
//! rayon. The draw order therefore depends only on `n`.

use rayon::prelude::*;

use crate::batch::{norm, Point3, PointBatch};
use crate::error::ConfigError;
use crate::rng::CloudRng;
use crate::shape::{Ball, Cube};

/// Norm floor used when normalising Gaussian directions.
pub const DIRECTION_EPSILON: f64 = 1e-12;

/// Number of scalar coordinates in `rows` rows, `3 * rows`.
///
/// # Errors
///
/// Returns `ConfigError::CountTooLarge` if the product overflows `usize`.
///
/// ```
/// use cloud_core::sampling::coordinate_count;
///
/// assert_eq!(coordinate_count(4), Ok(12));
/// assert!(coordinate_count(usize::MAX / 3 + 1).is_err());
/// ```
pub fn coordinate_count(rows: usize) -> Result<usize, ConfigError> {
    rows.checked_mul(3).ok_or(ConfigError::CountTooLarge { rows })
}

/// Samples `n` points uniformly in volume inside `ball`.
///
/// Directions come from normalised standard Gaussian triples; the radius is
/// `R * u^(1/3)` so the radial CDF is `(r/R)^3`.
///
/// Draw sequence: `3n` normals, then `n` uniforms.
///
/// # Errors
///
/// Returns `ConfigError::CountTooLarge` before any draw if `3n` overflows.
///
/// # Examples
///
/// ```
/// use cloud_core::rng::CloudRng;
/// use cloud_core::sampling::sample_ball;
/// use cloud_core::shape::Ball;
///
/// let mut rng = CloudRng::from_seed(42);
/// let batch = sample_ball(1000, &Ball::new(10.0).unwrap(), &mut rng).unwrap();
/// assert_eq!(batch.len(), 1000);
/// ```
pub fn sample_ball(n: usize, ball: &Ball, rng: &mut CloudRng) -> Result<PointBatch, ConfigError> {
    let mut gaussians = vec![0.0; coordinate_count(n)?];
    let mut uniforms = vec![0.0; n];
    rng.fill_normal(&mut gaussians);
    rng.fill_uniform(&mut uniforms);

    let radius = ball.radius();
    let points: Vec<Point3> = gaussians
        .par_chunks_exact(3)
        .zip(uniforms.par_iter())
        .map(|(g, &u)| {
            let dir = [g[0], g[1], g[2]];
            let len = norm(&dir).max(DIRECTION_EPSILON);
            let r = radius * u.cbrt();
            [dir[0] / len * r, dir[1] / len * r, dir[2] / len * r]
        })
        .collect();

    Ok(PointBatch::from_vec(points))
}

/// Samples `n` points uniformly inside `cube`.
///
/// Each coordinate is independent and uniform in `[-side/2, side/2)`.
/// Draw sequence: `3n` uniforms, row-major.
///
/// # Errors
///
/// Returns `ConfigError::CountTooLarge` before any draw if `3n` overflows.
pub fn sample_cube(n: usize, cube: &Cube, rng: &mut CloudRng) -> Result<PointBatch, ConfigError> {
    coordinate_count(n)?;
    Ok(PointBatch::from_vec(draw_cube_rows(n, cube.half(), rng)))
}

/// Draws `n` rows uniform in `[-half, half)^3`, three uniforms per row.
///
/// Shared by the cube sampler and the rejection sampler's candidate rounds.
/// Callers bound `n` with [`coordinate_count`] first.
pub(crate) fn draw_cube_rows(n: usize, half: f64, rng: &mut CloudRng) -> Vec<Point3> {
    let mut rows: Vec<Point3> = (0..n)
        .map(|_| [rng.gen_uniform(), rng.gen_uniform(), rng.gen_uniform()])
        .collect();

    rows.par_iter_mut().for_each(|row| {
        for c in row.iter_mut() {
            *c = half * (2.0 * *c - 1.0);
        }
    });
    rows
}
