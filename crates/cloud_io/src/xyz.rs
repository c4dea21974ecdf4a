//! Plain-text XYZ / XYZN output.
//!
//! One row per point, space separated, six decimals: `x y z` or, with
//! normals, `x y z nx ny nz`.

use std::io::Write;

use crate::error::{IoError, Result};
use crate::precision::OutputScalar;

/// Writes points (and optional normals) as text rows.
///
/// # Errors
///
/// Returns `IoError::LengthMismatch` if `normals` has a different length
/// than `points`, or `IoError::Io` on write failure.
pub fn write_xyz<T: OutputScalar, W: Write>(
    writer: &mut W,
    points: &[[T; 3]],
    normals: Option<&[[T; 3]]>,
) -> Result<()> {
    match normals {
        None => {
            for p in points {
                writeln!(writer, "{:.6} {:.6} {:.6}", p[0], p[1], p[2])?;
            }
        }
        Some(normals) => {
            if normals.len() != points.len() {
                return Err(IoError::LengthMismatch {
                    points: points.len(),
                    normals: normals.len(),
                });
            }
            for (p, n) in points.iter().zip(normals) {
                writeln!(
                    writer,
                    "{:.6} {:.6} {:.6} {:.6} {:.6} {:.6}",
                    p[0], p[1], p[2], n[0], n[1], n[2]
                )?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_only() {
        let mut out = Vec::new();
        write_xyz(&mut out, &[[1.0f64, -0.5, 2.25]], None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1.000000 -0.500000 2.250000\n");
    }

    #[test]
    fn test_with_normals() {
        let mut out = Vec::new();
        let points = [[0.0f32, 1.0, 2.0], [3.0, 4.0, 5.0]];
        let normals = [[1.0f32, 0.0, 0.0], [0.0, 0.0, -1.0]];
        write_xyz(&mut out, &points, Some(&normals[..])).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "3.000000 4.000000 5.000000 0.000000 0.000000 -1.000000");
    }

    #[test]
    fn test_length_mismatch() {
        let mut out = Vec::new();
        let points = [[0.0f64; 3]; 2];
        let normals = [[0.0f64; 3]; 1];
        let result = write_xyz(&mut out, &points, Some(&normals[..]));
        assert!(matches!(
            result,
            Err(IoError::LengthMismatch {
                points: 2,
                normals: 1
            })
        ));
        assert!(out.is_empty());
    }
}
