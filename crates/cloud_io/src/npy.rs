//! NumPy `.npy` (format version 1.0) output for N × 3 arrays.

use std::io::Write;

use crate::error::Result;
use crate::precision::OutputScalar;

const MAGIC: &[u8] = b"\x93NUMPY";
const ALIGNMENT: usize = 64;

/// Builds the padded header dictionary for a C-ordered `(rows, 3)` array.
fn header<T: OutputScalar>(rows: usize) -> String {
    let mut dict = format!(
        "{{'descr': '{}', 'fortran_order': False, 'shape': ({}, 3), }}",
        T::NPY_DESCR,
        rows
    );
    // magic (6) + version (2) + header length (2) + dict + '\n' must be a multiple of 64.
    let unpadded = MAGIC.len() + 2 + 2 + dict.len() + 1;
    let padding = (ALIGNMENT - unpadded % ALIGNMENT) % ALIGNMENT;
    dict.extend(std::iter::repeat(' ').take(padding));
    dict.push('\n');
    dict
}

/// Writes `rows` as a `.npy` array of shape `(N, 3)`.
///
/// # Errors
///
/// Returns `IoError::Io` on write failure.
pub fn write_npy<T: OutputScalar, W: Write>(writer: &mut W, rows: &[[T; 3]]) -> Result<()> {
    let header = header::<T>(rows.len());
    writer.write_all(MAGIC)?;
    writer.write_all(&[1, 0])?;
    writer.write_all(&(header.len() as u16).to_le_bytes())?;
    writer.write_all(header.as_bytes())?;

    for row in rows {
        for &c in row {
            c.write_le(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}
