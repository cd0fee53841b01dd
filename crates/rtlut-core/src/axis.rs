//! Table axes.
//!
//! An [`Axis`] is one strictly ascending coordinate sequence, e.g. the
//! wavelengths or solar zenith angles a radiative-transfer table was
//! simulated at. Its main job is [bracketing](Axis::bracket): locating the
//! two grid nodes around a query coordinate and the weight between them.

use crate::{LutError, LutResult};

/// Result of bracketing a coordinate on an axis.
///
/// `lo` and `hi` are grid indices, `t` is the weight of `hi`:
/// `x ≈ (1 - t) * values[lo] + t * values[hi]`.
///
/// When `lo == hi` the coordinate sits exactly on a node (or was clamped to
/// a boundary) and no interpolation happens along this axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Lower grid index.
    pub lo: usize,
    /// Upper grid index (`lo` or `lo + 1`).
    pub hi: usize,
    /// Weight of the upper node, in `[0, 1]`.
    pub t: f64,
}

impl Bracket {
    #[inline]
    fn exact(index: usize) -> Self {
        Self { lo: index, hi: index, t: 0.0 }
    }

    /// Returns true if no interpolation is needed along this axis.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.lo == self.hi
    }

    /// Returns the bracket as a `(lo, hi, t)` tuple.
    #[inline]
    pub fn into_tuple(self) -> (usize, usize, f64) {
        (self.lo, self.hi, self.t)
    }
}

/// An immutable, strictly ascending coordinate sequence.
///
/// # Example
///
/// ```rust
/// use rtlut_core::Axis;
///
/// let axis = Axis::new(&[0.0, 10.0, 20.0]).unwrap();
/// assert_eq!(axis.bracket(15.0), (1, 2, 0.5));
/// assert_eq!(axis.bracket(10.0), (1, 1, 0.0));
/// assert_eq!(axis.bracket(-5.0), (0, 0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    values: Vec<f64>,
}

impl Axis {
    /// Creates an axis from a slice of coordinates.
    ///
    /// # Errors
    ///
    /// [`LutError::InvalidAxis`] if `values` is empty, contains NaN, or is
    /// not strictly ascending.
    pub fn new(values: &[f64]) -> LutResult<Self> {
        Self::from_vec(values.to_vec())
    }

    /// Creates an axis taking ownership of `values`.
    pub fn from_vec(values: Vec<f64>) -> LutResult<Self> {
        if values.is_empty() {
            return Err(LutError::InvalidAxis {
                reason: "axis must have at least one value".into(),
            });
        }
        if let Some(i) = values.iter().position(|v| v.is_nan()) {
            return Err(LutError::InvalidAxis {
                reason: format!("value at index {i} is NaN"),
            });
        }
        if let Some(i) = values.windows(2).position(|w| w[0] >= w[1]) {
            return Err(LutError::InvalidAxis {
                reason: format!(
                    "values not strictly ascending at index {}: {} >= {}",
                    i + 1,
                    values[i],
                    values[i + 1]
                ),
            });
        }
        Ok(Self { values })
    }

    /// Creates an axis from single-precision coordinates, as stored in
    /// binary LUT files.
    pub fn from_f32(values: &[f32]) -> LutResult<Self> {
        Self::from_vec(values.iter().map(|&v| v as f64).collect())
    }

    /// Returns the number of grid nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; an axis has at least one node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest coordinate.
    #[inline]
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// Largest coordinate.
    #[inline]
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Grid coordinates in ascending order.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns `(lo, hi, t)` for coordinate `x`.
    ///
    /// See [`Axis::locate`] for the rules.
    #[inline]
    pub fn bracket(&self, x: f64) -> (usize, usize, f64) {
        self.locate(x).into_tuple()
    }

    /// Brackets coordinate `x`.
    ///
    /// - `x <= min`: `(0, 0, 0.0)`, no extrapolation
    /// - `x >= max`: `(last, last, 0.0)`
    /// - `x` equal to a node: `(i, i, 0.0)`, so stored values come back untouched
    /// - otherwise `(i, i + 1, t)` with `values[i] < x < values[i + 1]`
    ///
    /// A NaN coordinate returns `(0, 0, NaN)`.
    pub fn locate(&self, x: f64) -> Bracket {
        let last = self.values.len() - 1;
        if x.is_nan() {
            return Bracket { lo: 0, hi: 0, t: f64::NAN };
        }
        if x <= self.values[0] {
            return Bracket::exact(0);
        }
        if x >= self.values[last] {
            return Bracket::exact(last);
        }

        // First index with values[idx] > x; x > values[0] so idx >= 1.
        let idx = self.values.partition_point(|&v| v <= x);
        let lo = idx - 1;
        let x0 = self.values[lo];
        if x == x0 {
            return Bracket::exact(lo);
        }
        let x1 = self.values[idx];
        Bracket { lo, hi: idx, t: (x - x0) / (x1 - x0) }
    }

    /// Returns the index of the node nearest to `x`, clamped to the axis.
    pub fn nearest(&self, x: f64) -> usize {
        let b = self.locate(x);
        if b.t > 0.5 { b.hi } else { b.lo }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> Axis {
        Axis::new(&[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap()
    }

    #[test]
    fn test_from_f32() {
        let a = Axis::from_f32(&[0.5, 1.25, 10.0]).unwrap();
        assert_eq!(a.values(), &[0.5, 1.25, 10.0]);
        assert!(Axis::from_f32(&[]).is_err());
        assert!(Axis::from_f32(&[1.0, f32::NAN]).is_err());
        assert!(Axis::from_f32(&[2.0, 1.0]).is_err());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(Axis::new(&[]), Err(LutError::InvalidAxis { .. })));
    }

    #[test]
    fn test_rejects_unsorted() {
        assert!(Axis::new(&[0.0, 2.0, 1.0]).is_err());
        assert!(Axis::new(&[0.0, 1.0, 1.0]).is_err());
        assert!(Axis::new(&[0.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_accessors() {
        let a = axis();
        assert_eq!(a.len(), 5);
        assert_eq!(a.min(), 0.0);
        assert_eq!(a.max(), 4.0);
        assert_eq!(a.values()[2], 2.0);
    }

    #[test]
    fn test_exact_nodes() {
        let a = axis();
        for i in 0..a.len() {
            assert_eq!(a.bracket(i as f64), (i, i, 0.0));
        }
    }

    #[test]
    fn test_clamp() {
        let a = axis();
        assert_eq!(a.bracket(-1.0), (0, 0, 0.0));
        assert_eq!(a.bracket(1e9), (4, 4, 0.0));
        assert_eq!(a.bracket(f64::NEG_INFINITY), (0, 0, 0.0));
    }

    #[test]
    fn test_interior() {
        let a = Axis::new(&[0.0, 10.0, 30.0]).unwrap();
        let (lo, hi, t) = a.bracket(20.0);
        assert_eq!((lo, hi), (1, 2));
        assert!((t - 0.5).abs() < 1e-12);

        let (lo, hi, t) = a.bracket(2.5);
        assert_eq!((lo, hi), (0, 1));
        assert!((t - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_single_node() {
        let a = Axis::new(&[5.0]).unwrap();
        assert_eq!(a.bracket(0.0), (0, 0, 0.0));
        assert_eq!(a.bracket(5.0), (0, 0, 0.0));
        assert_eq!(a.bracket(9.0), (0, 0, 0.0));
    }

    #[test]
    fn test_nan() {
        let b = axis().locate(f64::NAN);
        assert!(b.t.is_nan());
    }

    #[test]
    fn test_nearest() {
        let a = axis();
        assert_eq!(a.nearest(1.4), 1);
        assert_eq!(a.nearest(1.6), 2);
        assert_eq!(a.nearest(-3.0), 0);
    }
}
