//! Adaptive-batch rejection sampler for the cube-minus-cylinder volume.
//!
//! Candidates are drawn from the cube distribution in rounds. Each round is
//! sized from the number of points still missing and the expected kept
//! fraction, so the number of rounds stays close to one in practice.
//!
//! # State machine
//!
//! ```text
//! Accumulating { remaining } --step()--> Accumulating { remaining' < remaining }
//!                                   \--> Done   (accepted >= target)
//! Done --finish()--> PointBatch (truncated to exactly `target` rows)
//! ```
//!
//! A caller that wants to stop early simply stops calling [`RejectionSampler::step`].
//!
//! # Example
//!
//! ```
//! use cloud_core::rng::CloudRng;
//! use cloud_core::sampling::{RejectionSampler, SamplerState};
//! use cloud_core::shape::{CubeWithHole, HoleAxis};
//!
//! let shape = CubeWithHole::new(10.0, 1.0, HoleAxis::Z).unwrap();
//! let mut rng = CloudRng::from_seed(42);
//! let mut sampler = RejectionSampler::new(5000, shape).unwrap();
//!
//! while let SamplerState::Accumulating { .. } = sampler.step(&mut rng) {}
//!
//! let batch = sampler.finish().unwrap();
//! assert_eq!(batch.len(), 5000);
//! ```

use std::f64::consts::PI;

use rayon::prelude::*;
use tracing::{debug, trace};

use super::uniform::{coordinate_count, draw_cube_rows};
use crate::batch::{Point3, PointBatch};
use crate::error::{ConfigError, SamplingError};
use crate::rng::CloudRng;
use crate::shape::CubeWithHole;

/// Smallest candidate round, avoiding many tiny rounds near the end.
pub const MIN_BATCH_SIZE: usize = 10_000;

/// Lower bound on the kept fraction used for batch sizing.
pub const KEEP_RATIO_FLOOR: f64 = 1e-6;

/// Theoretical fraction of the cube volume outside the hole,
/// `1 - π r² S / S³`, floored at [`KEEP_RATIO_FLOOR`].
///
/// ```
/// use cloud_core::sampling::keep_ratio;
/// use cloud_core::shape::{CubeWithHole, HoleAxis};
///
/// let shape = CubeWithHole::new(10.0, 1.0, HoleAxis::Z).unwrap();
/// let ratio = keep_ratio(&shape);
/// assert!((ratio - (1.0 - std::f64::consts::PI / 100.0)).abs() < 1e-12);
/// ```
pub fn keep_ratio(shape: &CubeWithHole) -> f64 {
    let side = shape.side();
    let r = shape.hole_radius();
    let cylinder_volume = PI * r * r * side;
    let cube_volume = side * side * side;
    (1.0 - cylinder_volume / cube_volume).max(KEEP_RATIO_FLOOR)
}

/// Current state of a [`RejectionSampler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplerState {
    /// More points are needed.
    Accumulating {
        /// Points still missing.
        remaining: usize,
    },
    /// At least `target` points have been accepted.
    Done,
}

/// Snapshot of sampler progress, for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectionProgress {
    /// Points accepted so far (may exceed `target` before truncation).
    pub accepted: usize,
    /// Requested point count.
    pub target: usize,
    /// Candidate rounds completed.
    pub rounds: usize,
    /// Total candidates drawn across all rounds.
    pub candidates_drawn: usize,
}

impl RejectionProgress {
    /// Completion in `[0, 1]`; an empty target counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.target == 0 {
            1.0
        } else {
            (self.accepted.min(self.target)) as f64 / self.target as f64
        }
    }
}

/// Step-wise rejection sampler for [`CubeWithHole`].
///
/// Accepted points are kept in acceptance order; [`finish`](Self::finish)
/// truncates to the first `target` of them. Per-round filtering runs on
/// rayon but never reorders rows.
#[derive(Clone, Debug)]
pub struct RejectionSampler {
    shape: CubeWithHole,
    target: usize,
    keep_ratio: f64,
    accepted: PointBatch,
    rounds: usize,
    candidates_drawn: usize,
}

impl RejectionSampler {
    /// Creates a sampler for `target` points inside `shape`.
    ///
    /// No random numbers are drawn until the first [`step`](Self::step).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CountTooLarge` if the first candidate round,
    /// the largest one, would need more than `usize::MAX` coordinates.
    pub fn new(target: usize, shape: CubeWithHole) -> Result<Self, ConfigError> {
        let sampler = Self {
            shape,
            target,
            keep_ratio: keep_ratio(&shape),
            accepted: PointBatch::default(),
            rounds: 0,
            candidates_drawn: 0,
        };
        coordinate_count(sampler.next_batch_size())?;
        Ok(sampler)
    }

    /// Kept fraction used for batch sizing.
    pub fn keep_ratio(&self) -> f64 {
        self.keep_ratio
    }

    /// Current state.
    pub fn state(&self) -> SamplerState {
        let accepted = self.accepted.len();
        if accepted >= self.target {
            SamplerState::Done
        } else {
            SamplerState::Accumulating {
                remaining: self.target - accepted,
            }
        }
    }

    /// Progress snapshot.
    pub fn progress(&self) -> RejectionProgress {
        RejectionProgress {
            accepted: self.accepted.len(),
            target: self.target,
            rounds: self.rounds,
            candidates_drawn: self.candidates_drawn,
        }
    }

    /// Size of the next candidate round: `max(MIN_BATCH_SIZE, ceil(remaining / keep_ratio))`.
    ///
    /// Never grows between rounds. Returns 0 once the sampler is done.
    pub fn next_batch_size(&self) -> usize {
        match self.state() {
            SamplerState::Done => 0,
            SamplerState::Accumulating { remaining } => {
                let wanted = (remaining as f64 / self.keep_ratio).ceil();
                // Float-to-int `as` saturates, so a floored ratio cannot wrap.
                (wanted as usize).max(MIN_BATCH_SIZE)
            }
        }
    }

    /// Runs one candidate round and returns the new state.
    ///
    /// Does nothing once the sampler is [`SamplerState::Done`].
    pub fn step(&mut self, rng: &mut CloudRng) -> SamplerState {
        let batch = self.next_batch_size();
        if batch == 0 {
            return SamplerState::Done;
        }

        let candidates = draw_cube_rows(batch, self.shape.half(), rng);
        let shape = self.shape;
        let kept: Vec<Point3> = candidates
            .into_par_iter()
            .filter(|p| shape.keeps(p))
            .collect();

        self.rounds += 1;
        self.candidates_drawn += batch;
        self.accepted.extend_from_slice(&kept);

        trace!(
            round = self.rounds,
            batch,
            kept = kept.len(),
            accepted = self.accepted.len(),
            "rejection round complete"
        );

        self.state()
    }

    /// Consumes the sampler, returning exactly `target` points.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::Incomplete` if called before the sampler is done.
    pub fn finish(self) -> Result<PointBatch, SamplingError> {
        match self.state() {
            SamplerState::Done => Ok(self.into_batch()),
            SamplerState::Accumulating { .. } => Err(SamplingError::Incomplete {
                accepted: self.accepted.len(),
                target: self.target,
            }),
        }
    }

    /// Steps until done and returns the truncated batch.
    pub fn run(mut self, rng: &mut CloudRng) -> PointBatch {
        while let SamplerState::Accumulating { .. } = self.step(rng) {}
        self.into_batch()
    }

    fn into_batch(mut self) -> PointBatch {
        self.accepted.truncate(self.target);
        debug!(
            requested = self.target,
            rounds = self.rounds,
            candidates = self.candidates_drawn,
            "rejection sampling finished"
        );
        self.accepted
    }
}

/// Samples `n` points uniformly inside `shape` by running a [`RejectionSampler`].
///
/// # Errors
///
/// Returns `ConfigError::CountTooLarge` before any draw if `n` is too large
/// to size the candidate rounds.
pub fn sample_cube_with_hole(
    n: usize,
    shape: &CubeWithHole,
    rng: &mut CloudRng,
) -> Result<PointBatch, ConfigError> {
    Ok(RejectionSampler::new(n, *shape)?.run(rng))
}
