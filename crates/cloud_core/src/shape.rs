//! Shape parameters for the three supported volumes.
//!
//! All shapes are centred at the origin and axis-aligned:
//!
//! - [`Ball`]: radius `R`
//! - [`Cube`]: side `S`, spanning `[-S/2, S/2]` on every axis
//! - [`CubeWithHole`]: a cube with an infinite cylinder of radius `r`
//!   removed along one coordinate axis
//!
//! [`ShapeParams`] wraps the three records for static dispatch.
//!
//! ## Example
//!
//! ```
//! use cloud_core::shape::{CubeWithHole, HoleAxis, ShapeKind, ShapeParams};
//!
//! let params = ShapeParams::CubeWithHole(CubeWithHole::new(10.0, 1.0, HoleAxis::Z).unwrap());
//! assert_eq!(params.kind(), ShapeKind::CubeHole);
//! assert!(params.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::batch::Point3;
use crate::error::ConfigError;

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name, value });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

/// Axis of symmetry of the cylindrical hole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HoleAxis {
    /// Cylinder along the x axis.
    X,
    /// Cylinder along the y axis.
    Y,
    /// Cylinder along the z axis.
    #[default]
    Z,
}

impl HoleAxis {
    /// The two coordinate indices orthogonal to the axis, in ascending order.
    #[inline]
    pub fn plane_indices(self) -> [usize; 2] {
        match self {
            HoleAxis::X => [1, 2],
            HoleAxis::Y => [0, 2],
            HoleAxis::Z => [0, 1],
        }
    }

    /// Squared distance from `p` to the axis line through the origin.
    #[inline]
    pub fn radial_distance_sq(self, p: &Point3) -> f64 {
        let [a, b] = self.plane_indices();
        p[a] * p[a] + p[b] * p[b]
    }

    /// Lower-case axis name.
    pub fn as_str(self) -> &'static str {
        match self {
            HoleAxis::X => "x",
            HoleAxis::Y => "y",
            HoleAxis::Z => "z",
        }
    }
}

impl fmt::Display for HoleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HoleAxis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(HoleAxis::X),
            "y" => Ok(HoleAxis::Y),
            "z" => Ok(HoleAxis::Z),
            _ => Err(ConfigError::UnknownAxis(s.to_string())),
        }
    }
}

/// Discriminant of [`ShapeParams`], used by callers that pick a shape by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShapeKind {
    /// Solid ball.
    Ball,
    /// Solid cube.
    Cube,
    /// Cube minus a centred through-cylinder.
    CubeHole,
}

impl ShapeKind {
    /// Canonical name (`ball`, `cube`, `cube_hole`).
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Ball => "ball",
            ShapeKind::Cube => "cube",
            ShapeKind::CubeHole => "cube_hole",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ball" | "sphere" => Ok(ShapeKind::Ball),
            "cube" => Ok(ShapeKind::Cube),
            "cube_hole" | "cube-hole" => Ok(ShapeKind::CubeHole),
            _ => Err(ConfigError::UnknownShape(s.to_string())),
        }
    }
}

/// Solid ball of the given radius, centred at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
    radius: f64,
}

impl Ball {
    /// Creates a validated ball.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `radius` is not finite or not positive.
    pub fn new(radius: f64) -> Result<Self, ConfigError> {
        check_positive("radius", radius)?;
        Ok(Self { radius })
    }

    /// Ball radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Axis-aligned cube centred at the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
    side: f64,
}

impl Cube {
    /// Creates a validated cube.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `side` is not finite or not positive.
    pub fn new(side: f64) -> Result<Self, ConfigError> {
        check_positive("side", side)?;
        Ok(Self { side })
    }

    /// Side length.
    #[inline]
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Half the side length; every coordinate lies in `[-half, half]`.
    #[inline]
    pub fn half(&self) -> f64 {
        self.side / 2.0
    }
}

/// Cube with a centred through-cylinder removed.
///
/// The cylinder is infinite along `axis`; inside the cube it is clipped by
/// the two faces orthogonal to that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeWithHole {
    side: f64,
    hole_radius: f64,
    axis: HoleAxis,
}

impl CubeWithHole {
    /// Creates a validated cube-with-hole.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `side` or `hole_radius` is not finite or not positive
    /// - `hole_radius >= side / 2`
    pub fn new(side: f64, hole_radius: f64, axis: HoleAxis) -> Result<Self, ConfigError> {
        check_positive("side", side)?;
        check_positive("hole_radius", hole_radius)?;
        if hole_radius >= side / 2.0 {
            return Err(ConfigError::HoleTooLarge { hole_radius, side });
        }
        Ok(Self {
            side,
            hole_radius,
            axis,
        })
    }

    /// Side length of the outer cube.
    #[inline]
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Half the side length.
    #[inline]
    pub fn half(&self) -> f64 {
        self.side / 2.0
    }

    /// Radius of the removed cylinder.
    #[inline]
    pub fn hole_radius(&self) -> f64 {
        self.hole_radius
    }

    /// Axis of the removed cylinder.
    #[inline]
    pub fn axis(&self) -> HoleAxis {
        self.axis
    }

    /// Returns `true` if `p` lies outside the hole (`ρ² >= r²`, exact comparison).
    #[inline]
    pub fn keeps(&self, p: &Point3) -> bool {
        self.axis.radial_distance_sq(p) >= self.hole_radius * self.hole_radius
    }
}

/// Static dispatch enum over the supported shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeParams {
    /// Solid ball.
    Ball(Ball),
    /// Solid cube.
    Cube(Cube),
    /// Cube minus a through-cylinder.
    CubeWithHole(CubeWithHole),
}

impl ShapeParams {
    /// Builds parameters for `kind`, reading only the fields that shape uses.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the fields relevant to `kind` are invalid.
    pub fn from_kind(
        kind: ShapeKind,
        radius: f64,
        side: f64,
        hole_radius: f64,
        axis: HoleAxis,
    ) -> Result<Self, ConfigError> {
        match kind {
            ShapeKind::Ball => Ball::new(radius).map(ShapeParams::Ball),
            ShapeKind::Cube => Cube::new(side).map(ShapeParams::Cube),
            ShapeKind::CubeHole => {
                CubeWithHole::new(side, hole_radius, axis).map(ShapeParams::CubeWithHole)
            }
        }
    }

    /// Returns the shape discriminant.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeParams::Ball(_) => ShapeKind::Ball,
            ShapeParams::Cube(_) => ShapeKind::Cube,
            ShapeParams::CubeWithHole(_) => ShapeKind::CubeHole,
        }
    }

    /// Re-checks the invariants of the wrapped record.
    ///
    /// Records built through their constructors always pass; this guards
    /// values assembled elsewhere before sampling starts.
    ///
    /// # Errors
    ///
    /// Returns the same `ConfigError` the record's constructor would.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ShapeParams::Ball(b) => Ball::new(b.radius).map(|_| ()),
            ShapeParams::Cube(c) => Cube::new(c.side).map(|_| ()),
            ShapeParams::CubeWithHole(h) => {
                CubeWithHole::new(h.side, h.hole_radius, h.axis).map(|_| ())
            }
        }
    }

    /// Short descriptive label, e.g. `cube_hole_s10_r1_z`.
    pub fn label(&self) -> String {
        match self {
            ShapeParams::Ball(b) => format!("ball_r{}", b.radius),
            ShapeParams::Cube(c) => format!("cube_s{}", c.side),
            ShapeParams::CubeWithHole(h) => {
                format!("cube_hole_s{}_r{}_{}", h.side, h.hole_radius, h.axis)
            }
        }
    }
}
