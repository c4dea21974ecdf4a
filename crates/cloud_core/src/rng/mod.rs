//! # Random Source
//!
//! Seeded random number generation for the volume samplers.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: the generator is always constructed from an explicit seed;
//!   there is no process-wide generator
//! - **Single writer**: samplers take `&mut CloudRng`, so draws happen in one
//!   well-defined sequence even when later per-row work runs on rayon
//! - **Efficiency**: zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use cloud_core::rng::CloudRng;
//!
//! let mut rng = CloudRng::from_seed(42);
//!
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//!
//! let mut buffer = vec![0.0; 300];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::CloudRng;

#[cfg(test)]
mod tests;
