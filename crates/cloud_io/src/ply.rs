//! Binary little-endian PLY output.
//!
//! Writes an ASCII header followed by one packed record per vertex:
//! `x y z` and, when normals are present, `nx ny nz`.

use std::io::Write;

use crate::error::{IoError, Result};
use crate::precision::OutputScalar;

/// Writes the PLY header for `count` vertices with `scalar` properties.
fn write_header<W: Write>(
    writer: &mut W,
    scalar: &str,
    count: usize,
    with_normals: bool,
) -> Result<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format binary_little_endian 1.0")?;
    writeln!(writer, "element vertex {}", count)?;
    for name in ["x", "y", "z"] {
        writeln!(writer, "property {} {}", scalar, name)?;
    }
    if with_normals {
        for name in ["nx", "ny", "nz"] {
            writeln!(writer, "property {} {}", scalar, name)?;
        }
    }
    writeln!(writer, "end_header")?;
    Ok(())
}

/// Writes points (and optional normals) as a binary PLY vertex cloud.
///
/// # Errors
///
/// Returns `IoError::UnsupportedPrecision` if PLY has no property type for
/// `T`, `IoError::LengthMismatch` if `normals` has a different length than
/// `points`, or `IoError::Io` on write failure.
pub fn write_ply<T: OutputScalar, W: Write>(
    writer: &mut W,
    points: &[[T; 3]],
    normals: Option<&[[T; 3]]>,
) -> Result<()> {
    if let Some(normals) = normals {
        if normals.len() != points.len() {
            return Err(IoError::LengthMismatch {
                points: points.len(),
                normals: normals.len(),
            });
        }
    }

    let scalar = T::PLY_TYPE.ok_or(IoError::UnsupportedPrecision {
        format: "PLY",
        dtype: T::NAME,
    })?;
    write_header(writer, scalar, points.len(), normals.is_some())?;

    for (i, p) in points.iter().enumerate() {
        for &c in p {
            c.write_le(writer)?;
        }
        if let Some(normals) = normals {
            for &c in &normals[i] {
                c.write_le(writer)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
