//! Signed distance functions for the supported shapes.
//!
//! Negative inside, zero on the surface, positive outside. All arithmetic is
//! `f64`.

use crate::batch::{norm, Point3};
use crate::shape::{CubeWithHole, HoleAxis, ShapeParams};

/// Signed distance to a ball of radius `radius` at the origin.
#[inline]
pub fn sdf_ball(p: &Point3, radius: f64) -> f64 {
    norm(p) - radius
}

/// Per-axis face offsets `|p_i| - half`. For interior points all three are negative.
#[inline]
pub fn box_offsets(p: &Point3, half: f64) -> Point3 {
    [p[0].abs() - half, p[1].abs() - half, p[2].abs() - half]
}

/// Signed distance to the axis-aligned cube `[-half, half]^3`.
///
/// Exact both inside and outside; inside it reduces to `max_i(|p_i| - half)`.
pub fn sdf_box(p: &Point3, half: f64) -> f64 {
    let d = box_offsets(p, half);
    let outside = norm(&[d[0].max(0.0), d[1].max(0.0), d[2].max(0.0)]);
    let inside = d[0].max(d[1]).max(d[2]).min(0.0);
    outside + inside
}

/// Distance `ρ` from `p` to the axis line.
#[inline]
pub fn radial_distance(p: &Point3, axis: HoleAxis) -> f64 {
    axis.radial_distance_sq(p).sqrt()
}

/// Signed distance to the infinite cylinder of radius `radius` along `axis`: `ρ - radius`.
#[inline]
pub fn sdf_cylinder(p: &Point3, axis: HoleAxis, radius: f64) -> f64 {
    radial_distance(p, axis) - radius
}

/// Signed distance to the cube-minus-cylinder solid: `max(sdf_box, -sdf_cylinder)`.
pub fn sdf_cube_hole(p: &Point3, shape: &CubeWithHole) -> f64 {
    let d_box = sdf_box(p, shape.half());
    let d_cyl = sdf_cylinder(p, shape.axis(), shape.hole_radius());
    d_box.max(-d_cyl)
}

/// Signed distance from `p` to the surface of the shape described by `params`.
///
/// ```
/// use cloud_core::normals::sdf::signed_distance;
/// use cloud_core::shape::{Ball, ShapeParams};
///
/// let params = ShapeParams::Ball(Ball::new(2.0).unwrap());
/// assert_eq!(signed_distance(&[0.0, 0.0, 1.5], &params), -0.5);
/// ```
pub fn signed_distance(p: &Point3, params: &ShapeParams) -> f64 {
    match params {
        ShapeParams::Ball(ball) => sdf_ball(p, ball.radius()),
        ShapeParams::Cube(cube) => sdf_box(p, cube.half()),
        ShapeParams::CubeWithHole(shape) => sdf_cube_hole(p, shape),
    }
}
