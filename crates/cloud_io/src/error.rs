//! Error types for point cloud output.

use thiserror::Error;

/// Output error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying file system or writer failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Normals were supplied but do not line up with the points.
    #[error("Normal count {normals} does not match point count {points}")]
    LengthMismatch {
        /// Number of points.
        points: usize,
        /// Number of normals.
        normals: usize,
    },

    /// Unrecognised output format name.
    #[error("Unknown output format '{0}': expected one of ply, xyz, npy")]
    UnknownFormat(String),

    /// Unrecognised precision name.
    #[error("Unknown dtype '{0}': expected float16, float32 or float64")]
    UnknownPrecision(String),

    /// The format has no scalar type for the requested precision.
    #[error("{format} output does not support dtype {dtype}")]
    UnsupportedPrecision {
        /// Output format name.
        format: &'static str,
        /// Requested dtype name.
        dtype: &'static str,
    },

    /// Failure while building an `.npz` archive.
    #[error("NPZ archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result alias for output operations.
pub type Result<T> = std::result::Result<T, IoError>;
