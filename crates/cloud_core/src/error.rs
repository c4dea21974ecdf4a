//! Error types for shape configuration and sampling.
//!
//! This module provides:
//! - `ConfigError`: invalid shape parameters or point counts, rejected before any draw
//! - `SamplingError`: misuse of the step-wise rejection sampler

use thiserror::Error;

/// Configuration error for shape parameters and point counts.
///
/// Raised during construction or validation. A request that fails
/// validation performs no sampling at all.
///
/// # Examples
/// ```
/// use cloud_core::ConfigError;
///
/// let err = ConfigError::NonPositive { name: "radius", value: -1.0 };
/// assert!(err.to_string().contains("radius"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// A length parameter that must be strictly positive was not.
    #[error("Invalid parameter '{name}': {value} must be positive")]
    NonPositive {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A parameter was NaN or infinite.
    #[error("Invalid parameter '{name}': {value} is not finite")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The hole is at least as wide as the cube.
    #[error(
        "Invalid hole radius {hole_radius}: must be less than side/2 = {half}",
        half = .side / 2.0
    )]
    HoleTooLarge {
        /// Requested hole radius.
        hole_radius: f64,
        /// Cube side length.
        side: f64,
    },

    /// Axis name other than x, y or z.
    #[error("Unrecognised axis '{0}': expected one of x, y, z")]
    UnknownAxis(String),

    /// Shape name other than ball, cube or cube_hole.
    #[error("Unrecognised shape '{0}': expected one of ball, cube, cube_hole")]
    UnknownShape(String),

    /// The coordinate buffer for the requested row count would overflow `usize`.
    #[error("Point count {rows} is too large: 3 x {rows} coordinates overflow usize")]
    CountTooLarge {
        /// Requested row count.
        rows: usize,
    },
}

/// Runtime error raised by the step-wise rejection sampler.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SamplingError {
    /// `finish` was called before the target count was reached.
    #[error("Sampler not finished: {accepted} of {target} points accepted")]
    Incomplete {
        /// Points accepted so far.
        accepted: usize,
        /// Requested point count.
        target: usize,
    },
}
