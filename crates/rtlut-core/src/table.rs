//! N-dimensional lookup table with multilinear interpolation.
//!
//! A [`Table`] pairs an ordered list of [`Axis`] objects with a flat value
//! array. Values are row-major with the **last** axis varying fastest:
//!
//! ```text
//! idx = i[n-1] + len[n-1] * (i[n-2] + len[n-2] * ( ... (i[1] + len[1] * i[0]) ... ))
//! ```
//!
//! Queries bracket every coordinate on its axis and sum the `2^m` corners of
//! the enclosing hypercell, where `m` counts the axes that actually need
//! interpolation. Axes hit exactly (or clamped) contribute a single node, so a
//! query on grid coordinates returns the stored value with no arithmetic.

use smallvec::SmallVec;

use crate::{Axis, LutError, LutResult};

/// Upper bound on table dimensions; corner enumeration uses a bit mask.
pub const MAX_DIMENSIONS: usize = 32;

/// Dimension counts up to this size keep per-query state on the stack.
const INLINE_DIMS: usize = 8;

/// An immutable N-dimensional lookup table.
///
/// Tables are `Send + Sync` and hold no interior mutability, so one instance
/// can serve any number of worker threads by plain shared reference or `Arc`.
///
/// # Example
///
/// ```rust
/// use rtlut_core::{Axis, Table};
///
/// let x = Axis::new(&[0.0, 1.0]).unwrap();
/// let y = Axis::new(&[0.0, 10.0, 20.0]).unwrap();
/// // x slowest, y fastest
/// let table = Table::new(vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0], vec![x, y]).unwrap();
///
/// assert_eq!(table.get_value(&[1.0, 10.0]).unwrap(), 11.0);
/// assert_eq!(table.get_value(&[0.5, 15.0]).unwrap(), 6.5);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    values: Vec<f64>,
    axes: Vec<Axis>,
    strides: Vec<usize>,
}

impl Table {
    /// Creates a table from a flat value array and its axes.
    ///
    /// # Errors
    ///
    /// - [`LutError::SizeMismatch`] if `values.len()` is not the product of
    ///   the axis lengths
    /// - [`LutError::InvalidAxis`] if no axes are given or there are more
    ///   than [`MAX_DIMENSIONS`]
    pub fn new(values: Vec<f64>, axes: Vec<Axis>) -> LutResult<Self> {
        if axes.is_empty() {
            return Err(LutError::InvalidAxis {
                reason: "table needs at least one axis".into(),
            });
        }
        if axes.len() > MAX_DIMENSIONS {
            return Err(LutError::InvalidAxis {
                reason: format!("{} dimensions exceed the limit of {MAX_DIMENSIONS}", axes.len()),
            });
        }

        let expected = axes
            .iter()
            .try_fold(1usize, |acc, a| acc.checked_mul(a.len()))
            .unwrap_or(usize::MAX);
        if values.len() != expected {
            return Err(LutError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }

        let strides = strides_for(&axes);
        Ok(Self { values, axes, strides })
    }

    /// Creates a one-dimensional table from parallel coordinate/value arrays.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rtlut_core::Table;
    ///
    /// let t = Table::from_curve(&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 2.0, 5.0, 10.0, 22.0]).unwrap();
    /// assert_eq!(t.get_value_1d(2.5).unwrap(), 7.5);
    /// ```
    pub fn from_curve(xs: &[f64], ys: &[f64]) -> LutResult<Self> {
        if xs.len() != ys.len() {
            return Err(LutError::SizeMismatch {
                expected: xs.len(),
                actual: ys.len(),
            });
        }
        Self::new(ys.to_vec(), vec![Axis::new(xs)?])
    }

    /// Number of axes.
    #[inline]
    pub fn dimension_count(&self) -> usize {
        self.axes.len()
    }

    /// Returns axis `index` (construction order).
    pub fn dimension(&self, index: usize) -> LutResult<&Axis> {
        self.axes.get(index).ok_or(LutError::IndexOutOfRange {
            index,
            count: self.axes.len(),
        })
    }

    /// All axes in construction order.
    #[inline]
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Axis lengths in construction order.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(Axis::len).collect()
    }

    /// The flat value array, last axis fastest.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Flat offset of a grid multi-index, or `None` if any index is out of range.
    pub fn flat_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.axes.len() {
            return None;
        }
        let mut idx = 0;
        for ((&i, axis), &stride) in indices.iter().zip(&self.axes).zip(&self.strides) {
            if i >= axis.len() {
                return None;
            }
            idx += i * stride;
        }
        Some(idx)
    }

    /// Stored value at a grid multi-index.
    pub fn value_at(&self, indices: &[usize]) -> LutResult<f64> {
        if indices.len() != self.axes.len() {
            return Err(LutError::ArityMismatch {
                expected: self.axes.len(),
                actual: indices.len(),
            });
        }
        for (&index, axis) in indices.iter().zip(&self.axes) {
            if index >= axis.len() {
                return Err(LutError::IndexOutOfRange {
                    index,
                    count: axis.len(),
                });
            }
        }
        let idx = indices
            .iter()
            .zip(&self.strides)
            .map(|(&i, &s)| i * s)
            .sum::<usize>();
        Ok(self.values[idx])
    }

    /// Interpolates the table at `coord`, one component per axis.
    ///
    /// Coordinates outside an axis are clamped to its boundary node. A NaN
    /// component yields NaN.
    ///
    /// # Errors
    ///
    /// [`LutError::ArityMismatch`] if `coord.len() != dimension_count()`.
    #[inline]
    pub fn get_value(&self, coord: &[f64]) -> LutResult<f64> {
        self.check_arity(coord.len())?;
        Ok(self.interpolate(coord))
    }

    /// Two-point linear interpolation on a one-dimensional table.
    ///
    /// # Errors
    ///
    /// [`LutError::ArityMismatch`] if the table is not one-dimensional.
    #[inline]
    pub fn get_value_1d(&self, x: f64) -> LutResult<f64> {
        self.check_arity(1)?;
        let b = self.axes[0].locate(x);
        if b.t.is_nan() {
            return Ok(f64::NAN);
        }
        if b.is_exact() {
            return Ok(self.values[b.lo]);
        }
        Ok((1.0 - b.t) * self.values[b.lo] + b.t * self.values[b.hi])
    }

    #[inline]
    pub(crate) fn check_arity(&self, actual: usize) -> LutResult<()> {
        if actual != self.axes.len() {
            return Err(LutError::ArityMismatch {
                expected: self.axes.len(),
                actual,
            });
        }
        Ok(())
    }

    /// Multilinear interpolation; arity already checked.
    pub(crate) fn interpolate(&self, coord: &[f64]) -> f64 {
        let mut base = 0usize;
        // (stride, t) for every axis that falls between two nodes
        let mut active: SmallVec<[(usize, f64); INLINE_DIMS]> = SmallVec::new();

        for ((axis, &x), &stride) in self.axes.iter().zip(coord).zip(&self.strides) {
            let b = axis.locate(x);
            if b.t.is_nan() {
                return f64::NAN;
            }
            base += b.lo * stride;
            if !b.is_exact() {
                active.push((stride, b.t));
            }
        }

        if active.is_empty() {
            return self.values[base];
        }

        let mut sum = 0.0;
        for mask in 0..(1usize << active.len()) {
            let mut weight = 1.0;
            let mut idx = base;
            for (k, &(stride, t)) in active.iter().enumerate() {
                if mask & (1 << k) != 0 {
                    weight *= t;
                    idx += stride;
                } else {
                    weight *= 1.0 - t;
                }
            }
            sum += weight * self.values[idx];
        }
        sum
    }
}

/// Row-major strides with the last axis fastest.
fn strides_for(axes: &[Axis]) -> Vec<usize> {
    let mut strides = vec![1usize; axes.len()];
    for k in (0..axes.len().saturating_sub(1)).rev() {
        strides[k] = strides[k + 1] * axes[k + 1].len();
    }
    strides
}
