//! Two-column text curves.
//!
//! Small 1-D relations (hue angle to dominant wavelength and the like) ship
//! as text resources rather than binary tables:
//!
//! ```text
//! # hue angle; dominant wavelength
//! hue;lambda
//! 0.0;610.0
//! 24.21;587.93
//! ```
//!
//! Fields may be separated by `;`, `,` or whitespace. Blank lines and `#`
//! comments are skipped, as is one non-numeric header line before the data.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rtlut_core::Table;
use tracing::debug;

use crate::{IoError, IoResult};

/// Reads a curve file into a one-dimensional [`Table`].
pub fn read_curve_csv(path: impl AsRef<Path>) -> IoResult<Table> {
    let file = File::open(path.as_ref())?;
    parse_curve_csv(BufReader::new(file))
}

/// Parses a curve from a reader. Column 0 is x, column 1 is y.
pub fn parse_curve_csv<R: BufRead>(reader: R) -> IoResult<Table> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut header_allowed = true;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        let line_no = i + 1;

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line
            .split(|c: char| c == ';' || c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty());
        let (Some(a), Some(b)) = (fields.next(), fields.next()) else {
            return Err(IoError::Parse {
                line: line_no,
                reason: "expected two columns".into(),
            });
        };

        match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => {
                xs.push(x);
                ys.push(y);
                header_allowed = false;
            }
            _ if header_allowed => {
                header_allowed = false;
            }
            _ => {
                return Err(IoError::Parse {
                    line: line_no,
                    reason: format!("not a number pair: '{line}'"),
                });
            }
        }
    }

    if xs.is_empty() {
        return Err(IoError::Parse {
            line: 0,
            reason: "no data rows".into(),
        });
    }
    debug!(rows = xs.len(), "parsed curve");
    Ok(Table::from_curve(&xs, &ys)?)
}

/// A 1-D curve lookup with an optional lower input bound.
///
/// Inputs below the bound yield NaN instead of the clamped first value, the
/// way hue angles below zero have no dominant wavelength.
///
/// # Example
///
/// ```rust
/// use rtlut_core::Table;
/// use rtlut_io::CurveLookup;
///
/// let table = Table::from_curve(&[0.0, 10.0], &[610.0, 600.0]).unwrap();
/// let curve = CurveLookup::new(table).unwrap().with_min_input(0.0);
/// assert_eq!(curve.value(5.0), 605.0);
/// assert!(curve.value(-5.0).is_nan());
/// ```
#[derive(Debug, Clone)]
pub struct CurveLookup {
    table: Table,
    min_input: Option<f64>,
}

impl CurveLookup {
    /// Wraps a one-dimensional table.
    ///
    /// # Errors
    ///
    /// [`IoError::Lut`] with an arity mismatch if the table has more than one axis.
    pub fn new(table: Table) -> IoResult<Self> {
        if table.dimension_count() != 1 {
            return Err(IoError::Lut(rtlut_core::LutError::ArityMismatch {
                expected: 1,
                actual: table.dimension_count(),
            }));
        }
        Ok(Self { table, min_input: None })
    }

    /// Loads a curve file.
    pub fn from_file(path: impl AsRef<Path>) -> IoResult<Self> {
        Self::new(read_curve_csv(path)?)
    }

    /// Inputs below `min` return NaN.
    pub fn with_min_input(mut self, min: f64) -> Self {
        self.min_input = Some(min);
        self
    }

    /// Interpolated value at `x`; clamped above the last node.
    pub fn value(&self, x: f64) -> f64 {
        if self.min_input.is_some_and(|min| x < min) {
            return f64::NAN;
        }
        self.table.get_value_1d(x).unwrap_or(f64::NAN)
    }

    /// The underlying table.
    pub fn table(&self) -> &Table {
        &self.table
    }
}
