//! Volume samplers.
//!
//! - [`sample_ball`], [`sample_cube`]: closed-form uniform samplers
//! - [`RejectionSampler`]: adaptive-batch rejection sampling for the
//!   cube-with-hole volume
//! - [`generate`]: validated entry point dispatching on [`ShapeParams`]
//!
//! # Reproducibility
//!
//! Every sampler draws from the caller's [`CloudRng`] sequentially. Two calls
//! with the same seed, shape, parameters and count return bit-identical
//! batches.
//!
//! ```rust
//! use cloud_core::rng::CloudRng;
//! use cloud_core::sampling::generate;
//! use cloud_core::shape::{Ball, ShapeParams};
//!
//! let params = ShapeParams::Ball(Ball::new(10.0).unwrap());
//!
//! let a = generate(1000, &params, &mut CloudRng::from_seed(42)).unwrap();
//! let b = generate(1000, &params, &mut CloudRng::from_seed(42)).unwrap();
//! assert_eq!(a, b);
//! ```

mod rejection;
mod uniform;

use tracing::debug;

use crate::batch::PointBatch;
use crate::error::ConfigError;
use crate::rng::CloudRng;
use crate::shape::ShapeParams;

pub use rejection::{
    keep_ratio, sample_cube_with_hole, RejectionProgress, RejectionSampler, SamplerState,
    KEEP_RATIO_FLOOR, MIN_BATCH_SIZE,
};
pub use uniform::{coordinate_count, sample_ball, sample_cube, DIRECTION_EPSILON};

/// Samples `n` points uniformly inside the shape described by `params`.
///
/// Parameters and the point count are validated before the first draw; on
/// error the generator is left untouched.
///
/// # Errors
///
/// Returns `ConfigError` if `params` fails validation, or
/// `ConfigError::CountTooLarge` if `n` rows cannot be buffered.
pub fn generate(
    n: usize,
    params: &ShapeParams,
    rng: &mut CloudRng,
) -> Result<PointBatch, ConfigError> {
    params.validate()?;
    coordinate_count(n)?;
    debug!(shape = %params.kind(), n, seed = rng.seed(), "generating point batch");

    match params {
        ShapeParams::Ball(ball) => sample_ball(n, ball, rng),
        ShapeParams::Cube(cube) => sample_cube(n, cube, rng),
        ShapeParams::CubeWithHole(shape) => sample_cube_with_hole(n, shape, rng),
    }
}
