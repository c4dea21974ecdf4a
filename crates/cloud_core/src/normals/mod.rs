//! SDF-gradient normal estimation.
//!
//! For a point inside a shape, the estimated normal is the unit outward
//! gradient of the shape's SDF, i.e. the direction towards the nearest
//! bounding surface.
//!
//! | Shape | Rule |
//! |-------|------|
//! | Ball | `normalize(p)` |
//! | Cube | one-hot on the axis with largest `|p_i| - half`, signed by `p_i` |
//! | Cube with hole | cube rule if `sdf_box >= -sdf_cyl`, else `-normalize(radial)` |
//!
//! # Degenerate rows
//!
//! Rows whose gradient has (near-)zero length are the zero vector: the ball
//! centre, the cube centre and points on the hole axis.
//!
//! # Ties
//!
//! Where two or more cube faces are equidistant, the lowest axis index wins
//! (x before y before z). This only happens on measure-zero diagonal planes.

pub mod sdf;

use rayon::prelude::*;

use crate::batch::{norm, NormalBatch, Point3, PointBatch};
use crate::error::ConfigError;
use crate::shape::{CubeWithHole, ShapeParams};

use self::sdf::{box_offsets, sdf_box, sdf_cylinder};

/// Rows with gradient length at or below this are returned as the zero vector.
pub const NORMAL_EPSILON: f64 = 1e-12;

const ZERO: Point3 = [0.0, 0.0, 0.0];

/// Unit vector along `v`, or the zero vector if `‖v‖ <= NORMAL_EPSILON`.
#[inline]
pub fn safe_normalize(v: &Point3) -> Point3 {
    let len = norm(v);
    if len > NORMAL_EPSILON {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        ZERO
    }
}

/// Sign with `sign(0) = 0`.
#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Outward normal inside a ball.
#[inline]
pub fn ball_normal(p: &Point3) -> Point3 {
    safe_normalize(p)
}

/// Outward normal of the nearest cube face.
///
/// ```
/// use cloud_core::normals::cube_normal;
///
/// assert_eq!(cube_normal(&[1.0, -4.0, 2.0], 5.0), [0.0, -1.0, 0.0]);
/// // Tie between x and z: x wins.
/// assert_eq!(cube_normal(&[3.0, 0.0, 3.0], 5.0), [1.0, 0.0, 0.0]);
/// ```
pub fn cube_normal(p: &Point3, half: f64) -> Point3 {
    let q = box_offsets(p, half);
    let mut best = 0;
    for axis in 1..3 {
        if q[axis] > q[best] {
            best = axis;
        }
    }
    let mut n = ZERO;
    n[best] = sign(p[best]);
    n
}

/// Outward normal inside the cube-minus-cylinder solid.
///
/// Uses the cube face normal when the outer surface is at least as close as
/// the hole wall, otherwise the unit vector from the point towards the hole
/// axis within the plane orthogonal to it.
pub fn cube_hole_normal(p: &Point3, shape: &CubeWithHole) -> Point3 {
    let half = shape.half();
    let d_box = sdf_box(p, half);
    let d_cyl = sdf_cylinder(p, shape.axis(), shape.hole_radius());

    // `sdf_cube_hole = max(d_box, -d_cyl)`: follow whichever term is active.
    if d_box >= -d_cyl {
        return cube_normal(p, half);
    }

    let mut radial = ZERO;
    for i in shape.axis().plane_indices() {
        radial[i] = p[i];
    }
    let len = norm(&radial);
    if len > NORMAL_EPSILON {
        [-radial[0] / len, -radial[1] / len, -radial[2] / len]
    } else {
        ZERO
    }
}

/// Estimates one normal per point of `points` for the shape `params`.
///
/// Output row `i` corresponds to `points[i]`. Rows are computed in parallel.
///
/// # Errors
///
/// Returns `ConfigError` if `params` fails validation.
///
/// # Examples
///
/// ```
/// use cloud_core::normals::estimate_normals;
/// use cloud_core::shape::{Cube, ShapeParams};
/// use cloud_core::PointBatch;
///
/// let points = PointBatch::from_vec(vec![[4.9, 0.0, 0.0], [0.0, 0.0, -4.0]]);
/// let params = ShapeParams::Cube(Cube::new(10.0).unwrap());
/// let normals = estimate_normals(&points, &params).unwrap();
/// assert_eq!(normals.as_slice(), &[[1.0, 0.0, 0.0], [0.0, 0.0, -1.0]]);
/// ```
pub fn estimate_normals(
    points: &PointBatch,
    params: &ShapeParams,
) -> Result<NormalBatch, ConfigError> {
    params.validate()?;

    let rows = points.as_slice();
    let normals: Vec<Point3> = match params {
        ShapeParams::Ball(_) => rows.par_iter().map(ball_normal).collect(),
        ShapeParams::Cube(cube) => {
            let half = cube.half();
            rows.par_iter().map(|p| cube_normal(p, half)).collect()
        }
        ShapeParams::CubeWithHole(shape) => {
            rows.par_iter().map(|p| cube_hole_normal(p, shape)).collect()
        }
    };

    Ok(NormalBatch::from_vec(normals))
}
