//! File-level output: format selection, path resolution and precision dispatch.
//!
//! The output backend is an explicit [`OutputFormat`] chosen by the caller.
//!
//! | Format | Main file                  | Auxiliary file  |
//! |--------|----------------------------|-----------------|
//! | `Ply`  | `<base>.ply`               | none            |
//! | `Xyz`  | `<base>.xyz` / `.xyzn`     | `.npy` / `.npz` |
//! | `Npy`  | `<base>.npy` / `.npz`      | none            |
//!
//! The second name in each pair is used when normals are stored; PLY keeps
//! normals inline.
//!
//! `.npz` archives hold `points` and `normals` members. PLY has no 16-bit
//! float type; `float16` PLY output stores the rounded values as `float`.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use cloud_core::{NormalBatch, PointBatch};
use half::f16;
use tracing::{debug, info};

use crate::error::{IoError, Result};
use crate::npy::write_npy;
use crate::npz::write_npz;
use crate::ply::write_ply;
use crate::precision::{narrow, OutputScalar, Precision};
use crate::xyz::write_xyz;

/// Output file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Binary little-endian PLY.
    #[default]
    Ply,
    /// Text XYZ / XYZN with a NumPy companion.
    Xyz,
    /// NumPy `.npy` / `.npz` only.
    Npy,
}

impl OutputFormat {
    /// Canonical format name.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Ply => "ply",
            OutputFormat::Xyz => "xyz",
            OutputFormat::Npy => "npy",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = IoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ply" => Ok(OutputFormat::Ply),
            "xyz" | "xyzn" => Ok(OutputFormat::Xyz),
            "npy" | "npz" => Ok(OutputFormat::Npy),
            _ => Err(IoError::UnknownFormat(s.to_string())),
        }
    }
}

/// Files written by [`save_cloud`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedPaths {
    /// Primary output file.
    pub main: PathBuf,
    /// Companion files, in write order.
    pub aux: Vec<PathBuf>,
}

/// Returns `base` with `.ext` appended unless it already ends in `.ext`
/// (case-insensitive).
pub(crate) fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let has_ext = base
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext));
    if has_ext {
        base.to_path_buf()
    } else {
        let mut name = base.as_os_str().to_os_string();
        name.push(".");
        name.push(ext);
        PathBuf::from(name)
    }
}

/// `base` without a trailing `.ext` (case-insensitive).
fn strip_extension(base: &Path, ext: &str) -> PathBuf {
    match base.extension().and_then(|e| e.to_str()) {
        Some(e) if e.eq_ignore_ascii_case(ext) => base.with_extension(""),
        _ => base.to_path_buf(),
    }
}

/// Path of the primary file [`save_cloud`] writes for `base`.
pub fn main_path(base: &Path, format: OutputFormat, with_normals: bool) -> PathBuf {
    match (format, with_normals) {
        (OutputFormat::Ply, _) => with_extension(base, "ply"),
        (OutputFormat::Xyz, false) => with_extension(base, "xyz"),
        (OutputFormat::Xyz, true) => with_extension(base, "xyzn"),
        (OutputFormat::Npy, _) => {
            let stem = strip_extension(&strip_extension(base, "npy"), "npz");
            with_extension(&stem, if with_normals { "npz" } else { "npy" })
        }
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes `points` (and optional `normals`) under `base` in `format` at `precision`.
///
/// # Errors
///
/// Returns `IoError::LengthMismatch` if the normals are not index-aligned
/// with the points, or `IoError::Io` / `IoError::Zip` if any file cannot be
/// written.
pub fn save_cloud(
    base: &Path,
    format: OutputFormat,
    precision: Precision,
    points: &PointBatch,
    normals: Option<&NormalBatch>,
) -> Result<SavedPaths> {
    if let Some(normals) = normals {
        if normals.len() != points.len() {
            return Err(IoError::LengthMismatch {
                points: points.len(),
                normals: normals.len(),
            });
        }
    }

    let pts = points.as_slice();
    let nrm = normals.map(NormalBatch::as_slice);
    let saved = match (precision, format) {
        (Precision::F16, OutputFormat::Ply) => {
            debug!("PLY has no half type; writing float16-rounded values as float");
            let pts = Precision::F16.quantize(pts);
            let nrm = nrm.map(|n| Precision::F16.quantize(n));
            save_rows::<f32>(base, format, &pts, nrm.as_deref())?
        }
        (Precision::F16, _) => save_rows::<f16>(base, format, pts, nrm)?,
        (Precision::F32, _) => save_rows::<f32>(base, format, pts, nrm)?,
        (Precision::F64, _) => save_rows::<f64>(base, format, pts, nrm)?,
    };

    info!(
        format = %format,
        dtype = precision.as_str(),
        main = %saved.main.display(),
        aux = saved.aux.len(),
        "point cloud saved"
    );
    Ok(saved)
}

fn save_rows<T: OutputScalar>(
    base: &Path,
    format: OutputFormat,
    points: &[[f64; 3]],
    normals: Option<&[[f64; 3]]>,
) -> Result<SavedPaths> {
    let pts: Vec<[T; 3]> = narrow(points);
    let nrm: Option<Vec<[T; 3]>> = normals.map(narrow);
    let nrm = nrm.as_deref();

    match format {
        OutputFormat::Ply => {
            let main = main_path(base, format, nrm.is_some());
            write_ply(&mut create(&main)?, &pts, nrm)?;
            Ok(SavedPaths { main, aux: vec![] })
        }
        OutputFormat::Xyz => {
            let main = main_path(base, format, nrm.is_some());
            write_xyz(&mut create(&main)?, &pts, nrm)?;

            let stem = main.with_extension("");
            let aux = write_numpy(&stem, &pts, nrm)?;
            Ok(SavedPaths {
                main,
                aux: vec![aux],
            })
        }
        OutputFormat::Npy => {
            let stem = strip_extension(&strip_extension(base, "npy"), "npz");
            let main = write_numpy(&stem, &pts, nrm)?;
            Ok(SavedPaths { main, aux: vec![] })
        }
    }
}

/// `<stem>.npy` for points alone, `<stem>.npz` with `points` and `normals`.
fn write_numpy<T: OutputScalar>(
    stem: &Path,
    points: &[[T; 3]],
    normals: Option<&[[T; 3]]>,
) -> Result<PathBuf> {
    match normals {
        None => {
            let path = with_extension(stem, "npy");
            write_npy(&mut create(&path)?, points)?;
            Ok(path)
        }
        Some(normals) => {
            let path = with_extension(stem, "npz");
            write_npz(create(&path)?, &[("points", points), ("normals", normals)])?;
            Ok(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("PLY".parse::<OutputFormat>().unwrap(), OutputFormat::Ply);
        assert_eq!("xyzn".parse::<OutputFormat>().unwrap(), OutputFormat::Xyz);
        assert_eq!("npz".parse::<OutputFormat>().unwrap(), OutputFormat::Npy);
        assert!("las".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_with_extension() {
        assert_eq!(
            with_extension(Path::new("out/ball"), "ply"),
            PathBuf::from("out/ball.ply")
        );
        assert_eq!(
            with_extension(Path::new("ball.PLY"), "ply"),
            PathBuf::from("ball.PLY")
        );
        assert_eq!(
            with_extension(Path::new("ball.v2"), "ply"),
            PathBuf::from("ball.v2.ply")
        );
    }

    #[test]
    fn test_main_path() {
        let base = Path::new("out/cube");
        assert_eq!(main_path(base, OutputFormat::Ply, true), PathBuf::from("out/cube.ply"));
        assert_eq!(main_path(base, OutputFormat::Xyz, true), PathBuf::from("out/cube.xyzn"));
        assert_eq!(main_path(base, OutputFormat::Npy, false), PathBuf::from("out/cube.npy"));
        assert_eq!(
            main_path(Path::new("cube.npy"), OutputFormat::Npy, true),
            PathBuf::from("cube.npz")
        );
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension(Path::new("cube.NPY"), "npy"), PathBuf::from("cube"));
        assert_eq!(strip_extension(Path::new("cube.v2"), "npy"), PathBuf::from("cube.v2"));
    }
}
