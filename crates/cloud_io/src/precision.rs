//! Output precision and narrowing.
//!
//! The core works in `f64` throughout. Narrowing to the output precision
//! happens here, after sampling and normal estimation are complete.

use std::fmt::Display;
use std::io::{self, Write};
use std::str::FromStr;

use cloud_core::Point3;
use half::f16;
use num_traits::Float;

use crate::error::IoError;

/// Scalar type that can be written to the supported output formats.
pub trait OutputScalar: Float + Display + Send + Sync {
    /// Canonical dtype name.
    const NAME: &'static str;
    /// PLY property type name, or `None` if PLY has no matching type.
    const PLY_TYPE: Option<&'static str>;
    /// NumPy dtype descriptor (`<f2`, `<f4` or `<f8`).
    const NPY_DESCR: &'static str;

    /// Writes the value as little-endian bytes.
    fn write_le<W: Write>(self, writer: &mut W) -> io::Result<()>;
}

impl OutputScalar for f16 {
    const NAME: &'static str = "float16";
    const PLY_TYPE: Option<&'static str> = None;
    const NPY_DESCR: &'static str = "<f2";

    #[inline]
    fn write_le<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_le_bytes())
    }
}

impl OutputScalar for f32 {
    const NAME: &'static str = "float32";
    const PLY_TYPE: Option<&'static str> = Some("float");
    const NPY_DESCR: &'static str = "<f4";

    #[inline]
    fn write_le<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_le_bytes())
    }
}

impl OutputScalar for f64 {
    const NAME: &'static str = "float64";
    const PLY_TYPE: Option<&'static str> = Some("double");
    const NPY_DESCR: &'static str = "<f8";

    #[inline]
    fn write_le<W: Write>(self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_le_bytes())
    }
}

/// Output precision selected by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 16-bit floats. PLY has no half type, so PLY output stores the
    /// rounded values as 32-bit floats.
    F16,
    /// 32-bit floats.
    #[default]
    F32,
    /// 64-bit floats (no narrowing).
    F64,
}

impl Precision {
    /// Canonical dtype name.
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::F16 => f16::NAME,
            Precision::F32 => f32::NAME,
            Precision::F64 => f64::NAME,
        }
    }

    /// Rounds `f64` rows to this precision and widens them back.
    ///
    /// The result holds exactly the values a writer at this precision stores.
    ///
    /// ```
    /// use cloud_io::Precision;
    ///
    /// let rows = Precision::F16.quantize(&[[0.1, 2049.0, -1.0]]);
    /// assert_eq!(rows[0][1], 2048.0);
    /// assert_eq!(rows[0][2], -1.0);
    /// ```
    pub fn quantize(self, rows: &[Point3]) -> Vec<Point3> {
        match self {
            Precision::F16 => widen(&narrow::<f16>(rows)),
            Precision::F32 => widen(&narrow::<f32>(rows)),
            Precision::F64 => rows.to_vec(),
        }
    }
}

impl FromStr for Precision {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float16" | "f16" => Ok(Precision::F16),
            "float32" | "f32" => Ok(Precision::F32),
            "float64" | "f64" => Ok(Precision::F64),
            _ => Err(IoError::UnknownPrecision(s.to_string())),
        }
    }
}

/// Narrows `f64` rows to `T`.
pub fn narrow<T: OutputScalar>(rows: &[Point3]) -> Vec<[T; 3]> {
    rows.iter()
        .map(|r| [narrow_scalar(r[0]), narrow_scalar(r[1]), narrow_scalar(r[2])])
        .collect()
}

/// Widens rows of `T` back to `f64`. Exact for every supported `T`.
pub(crate) fn widen<T: OutputScalar>(rows: &[[T; 3]]) -> Vec<Point3> {
    rows.iter()
        .map(|r| [widen_scalar(r[0]), widen_scalar(r[1]), widen_scalar(r[2])])
        .collect()
}

#[inline]
fn narrow_scalar<T: OutputScalar>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

#[inline]
fn widen_scalar<T: OutputScalar>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}
