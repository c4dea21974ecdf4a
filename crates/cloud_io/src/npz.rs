//! NumPy `.npz` archives: one deflate-compressed `.npy` member per named array.
//!
//! Matches the layout of `numpy.savez_compressed`, so
//! `np.load(path)["points"]` reads the `points.npy` member.

use std::io::{Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::npy::write_npy;
use crate::precision::OutputScalar;

/// Writes `arrays` as `<name>.npy` members of a compressed archive.
///
/// # Errors
///
/// Returns `IoError::Zip` if the archive cannot be built, or `IoError::Io`
/// on write failure.
pub fn write_npz<T: OutputScalar, W: Write + Seek>(
    writer: W,
    arrays: &[(&str, &[[T; 3]])],
) -> Result<()> {
    let mut zip = ZipWriter::new(writer);

    for &(name, rows) in arrays {
        let payload = (rows.len() as u64)
            .saturating_mul(3 * std::mem::size_of::<T>() as u64);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .large_file(payload >= u64::from(u32::MAX));
        zip.start_file(format!("{}.npy", name), options)?;
        write_npy(&mut zip, rows)?;
    }

    let mut inner = zip.finish()?;
    inner.flush()?;
    Ok(())
}
