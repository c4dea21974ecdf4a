//! Point and normal batches.
//!
//! Rows are stored as `[f64; 3]` in a contiguous `Vec`, so a batch of N
//! points is a single N × 3 buffer. A [`NormalBatch`] is index-aligned with
//! the [`PointBatch`] it was estimated from.

/// A single 3D coordinate or direction.
pub type Point3 = [f64; 3];

/// Per-axis coordinate range of a batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Component-wise minimum.
    pub min: Point3,
    /// Component-wise maximum.
    pub max: Point3,
}

/// Summary of normal vector lengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LengthStats {
    /// Shortest normal (0 when degenerate rows are present).
    pub min: f64,
    /// Longest normal.
    pub max: f64,
    /// Mean length.
    pub mean: f64,
}

/// Ordered batch of sampled points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointBatch {
    points: Vec<Point3>,
}

impl PointBatch {
    /// Wraps an existing row buffer.
    pub fn from_vec(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the batch holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Rows as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Point3] {
        &self.points
    }

    /// Iterates over the rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.points.iter()
    }

    pub(crate) fn extend_from_slice(&mut self, rows: &[Point3]) {
        self.points.extend_from_slice(rows);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.points.truncate(len);
    }

    /// Component-wise coordinate range, or `None` for an empty batch.
    ///
    /// ```
    /// use cloud_core::PointBatch;
    ///
    /// let batch = PointBatch::from_vec(vec![[1.0, -2.0, 0.0], [-1.0, 3.0, 0.5]]);
    /// let bounds = batch.bounds().unwrap();
    /// assert_eq!(bounds.min, [-1.0, -2.0, 0.0]);
    /// assert_eq!(bounds.max, [1.0, 3.0, 0.5]);
    /// ```
    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.points.first()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for p in &self.points[1..] {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }
}

impl<'a> IntoIterator for &'a PointBatch {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Per-point unit normals, index-aligned with a [`PointBatch`].
///
/// Degenerate rows hold the zero vector.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalBatch {
    normals: Vec<Point3>,
}

impl NormalBatch {
    /// Wraps an existing row buffer.
    pub fn from_vec(normals: Vec<Point3>) -> Self {
        Self { normals }
    }

    /// Number of normals.
    #[inline]
    pub fn len(&self) -> usize {
        self.normals.len()
    }

    /// Returns `true` if the batch holds no normals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }

    /// Rows as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Point3] {
        &self.normals
    }

    /// Iterates over the rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point3> {
        self.normals.iter()
    }

    /// Min/max/mean of the Euclidean lengths, or `None` for an empty batch.
    pub fn length_stats(&self) -> Option<LengthStats> {
        if self.normals.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for n in &self.normals {
            let len = norm(n);
            min = min.min(len);
            max = max.max(len);
            sum += len;
        }
        Some(LengthStats {
            min,
            max,
            mean: sum / self.normals.len() as f64,
        })
    }
}

impl<'a> IntoIterator for &'a NormalBatch {
    type Item = &'a Point3;
    type IntoIter = std::slice::Iter<'a, Point3>;

    fn into_iter(self) -> Self::IntoIter {
        self.normals.iter()
    }
}

/// Euclidean length of a 3-vector.
#[inline]
pub fn norm(v: &Point3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
