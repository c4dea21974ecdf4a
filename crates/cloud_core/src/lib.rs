//! # cloud_core
//!
//! Synthetic point clouds sampled uniformly inside simple solids, with
//! optional per-point normals derived from each solid's signed distance field.
//!
//! ## Shapes
//!
//! - **Ball** of radius `R`
//! - **Cube** of side `S`, spanning `[-S/2, S/2]^3`
//! - **Cube with hole**: the cube minus a centred infinite cylinder of radius
//!   `r < S/2` along the x, y or z axis
//!
//! ## Data flow
//!
//! ```text
//! CloudRng ──> sampling::generate ──> PointBatch ──> normals::estimate_normals ──> NormalBatch
//! ```
//!
//! All computation is `f64`. Narrowing to an output precision is left to the
//! caller (see the `cloud_io` crate).
//!
//! ## Usage Example
//!
//! ```rust
//! use cloud_core::normals::estimate_normals;
//! use cloud_core::rng::CloudRng;
//! use cloud_core::sampling::generate;
//! use cloud_core::shape::{CubeWithHole, HoleAxis, ShapeParams};
//!
//! let params = ShapeParams::CubeWithHole(CubeWithHole::new(10.0, 1.0, HoleAxis::Z)?);
//! let mut rng = CloudRng::from_seed(42);
//!
//! let points = generate(5000, &params, &mut rng)?;
//! let normals = estimate_normals(&points, &params)?;
//!
//! assert_eq!(points.len(), 5000);
//! assert_eq!(normals.len(), 5000);
//! # Ok::<(), cloud_core::ConfigError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod batch;
pub mod error;
pub mod normals;
pub mod rng;
pub mod sampling;
pub mod shape;

pub use batch::{Bounds, LengthStats, NormalBatch, Point3, PointBatch};
pub use error::{ConfigError, SamplingError};
