//! Query facade for pixel-processing code.
//!
//! [`Lookup`] is what retrieval code holds on to: a shared [`Table`] plus the
//! axis names it was declared with. It adds nothing to the numerics; it only
//! keeps callers away from the table's storage and lets them address axes by
//! name where positional indexing would be fragile.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::{Axis, LutError, LutResult, Table};

/// A shared, named view of a lookup table.
///
/// Cloning is cheap (one `Arc` increment), so each worker can own a handle.
///
/// # Example
///
/// ```rust
/// use rtlut_core::{Lookup, Table};
///
/// let table = Table::from_curve(&[0.0, 10.0], &[1.0, 3.0]).unwrap();
/// let lut = Lookup::with_names(table, ["hue"]).unwrap();
///
/// assert_eq!(lut.value(&[5.0]).unwrap(), 2.0);
/// assert_eq!(lut.value_named(&[("hue", 5.0)]).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Lookup {
    table: Arc<Table>,
    names: Arc<[String]>,
}

impl Lookup {
    /// Wraps a table; axes are named `dim0`, `dim1`, ...
    pub fn new(table: Table) -> Self {
        let names = (0..table.dimension_count()).map(|i| format!("dim{i}")).collect();
        Self {
            table: Arc::new(table),
            names,
        }
    }

    /// Wraps a table with one name per axis, in axis order.
    ///
    /// # Errors
    ///
    /// [`LutError::ArityMismatch`] if the name count differs from the
    /// dimension count, [`LutError::InvalidAxis`] if a name repeats.
    pub fn with_names<I, S>(table: Table, names: I) -> LutResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Arc<[String]> = names.into_iter().map(Into::into).collect();
        table.check_arity(names.len())?;
        if let Some(dup) = names.iter().enumerate().find_map(|(i, n)| names[..i].contains(n).then_some(n)) {
            return Err(LutError::InvalidAxis {
                reason: format!("duplicate axis name '{dup}'"),
            });
        }
        Ok(Self {
            table: Arc::new(table),
            names,
        })
    }

    /// Number of axes.
    #[inline]
    pub fn dimension_count(&self) -> usize {
        self.table.dimension_count()
    }

    /// Axis `index` in declaration order.
    #[inline]
    pub fn dimension(&self, index: usize) -> LutResult<&Axis> {
        self.table.dimension(index)
    }

    /// Grid coordinates of axis `index`.
    pub fn grid(&self, index: usize) -> LutResult<&[f64]> {
        self.table.dimension(index).map(Axis::values)
    }

    /// Axis names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of the axis called `name`.
    pub fn axis_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Interpolated value at a positional coordinate.
    #[inline]
    pub fn value(&self, coord: &[f64]) -> LutResult<f64> {
        self.table.get_value(coord)
    }

    /// Interpolated value with every axis given by name, in any order.
    ///
    /// # Errors
    ///
    /// - [`LutError::UnknownAxis`] for a name the table does not have
    /// - [`LutError::ArityMismatch`] if an axis is missing or given twice
    pub fn value_named(&self, coords: &[(&str, f64)]) -> LutResult<f64> {
        let n = self.dimension_count();
        let mut coord: SmallVec<[f64; 8]> = SmallVec::from_elem(f64::NAN, n);
        let mut seen: SmallVec<[bool; 8]> = SmallVec::from_elem(false, n);

        for &(name, x) in coords {
            let idx = self.axis_index(name).ok_or_else(|| LutError::UnknownAxis {
                name: name.to_string(),
            })?;
            if seen[idx] {
                return Err(LutError::ArityMismatch {
                    expected: n,
                    actual: coords.len(),
                });
            }
            seen[idx] = true;
            coord[idx] = x;
        }
        if seen.iter().any(|s| !s) {
            return Err(LutError::ArityMismatch {
                expected: n,
                actual: coords.len(),
            });
        }
        Ok(self.table.interpolate(&coord))
    }

    /// The underlying table.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// A new handle to the underlying table.
    pub fn shared_table(&self) -> Arc<Table> {
        Arc::clone(&self.table)
    }
}
