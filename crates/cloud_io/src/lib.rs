//! # cloud_io
//!
//! Serialisation of point batches produced by `cloud_core`.
//!
//! - [`precision`]: `f64` to `f16`/`f32`/`f64` narrowing, applied after all geometry
//! - [`xyz`], [`ply`], [`npy`]: stream writers over any `std::io::Write`
//! - [`npz`]: compressed multi-array archives over `Write + Seek`
//! - [`save`]: file-level output with explicit [`OutputFormat`] selection
//!
//! ```no_run
//! use std::path::Path;
//!
//! use cloud_core::rng::CloudRng;
//! use cloud_core::sampling::generate;
//! use cloud_core::shape::{Cube, ShapeParams};
//! use cloud_io::{save_cloud, OutputFormat, Precision};
//!
//! let params = ShapeParams::Cube(Cube::new(10.0).unwrap());
//! let points = generate(1000, &params, &mut CloudRng::from_seed(42)).unwrap();
//! let saved =
//!     save_cloud(Path::new("cube"), OutputFormat::Ply, Precision::F32, &points, None).unwrap();
//! assert_eq!(saved.main, Path::new("cube.ply"));
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod npy;
pub mod npz;
pub mod ply;
pub mod precision;
pub mod save;
pub mod xyz;

pub use error::{IoError, Result};
pub use precision::{narrow, OutputScalar, Precision};
pub use save::{main_path, save_cloud, OutputFormat, SavedPaths};
