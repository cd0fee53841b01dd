//! # rtlut-core
//!
//! N-dimensional lookup tables for radiative-transfer retrievals.
//!
//! Atmospheric correction and aerosol retrieval replace expensive physical
//! simulations with tables of precomputed values indexed by wavelength,
//! aerosol load, elevation, geometry and so on. This crate holds those tables
//! and answers point queries by piecewise multilinear interpolation.
//!
//! # Types
//!
//! - [`Axis`] - ascending coordinate sequence with bracketing
//! - [`Table`] - flat value array plus axes, multilinear interpolation
//! - [`Lookup`] - shared, named query facade
//!
//! # Usage
//!
//! ```rust
//! use rtlut_core::{Axis, Table};
//!
//! let wvl = Axis::new(&[412.0, 442.0, 490.0]).unwrap();
//! let aot = Axis::new(&[0.0, 0.5]).unwrap();
//! let table = Table::new(vec![0.1, 0.3, 0.2, 0.4, 0.3, 0.5], vec![wvl, aot]).unwrap();
//!
//! // grid point: stored value
//! assert_eq!(table.get_value(&[442.0, 0.5]).unwrap(), 0.4);
//! // between nodes: interpolated
//! let v = table.get_value(&[427.0, 0.25]).unwrap();
//! assert!((v - 0.25).abs() < 1e-12);
//! ```
//!
//! # Domain
//!
//! Coordinates outside an axis are clamped to its first or last node; there
//! is no extrapolation. Coordinates equal to a node bypass interpolation on
//! that axis, so grid queries reproduce stored values exactly.
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error handling
//! - [`smallvec`] - Stack-allocated per-query state
//! - [`rayon`] - Parallel batch queries
//!
//! # Used By
//!
//! - `rtlut-io` - Binary LUT decoding
//! - `rtlut-cli` - Command-line queries

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod axis;
mod batch;
mod error;
mod lookup;
mod table;

pub use axis::{Axis, Bracket};
pub use error::{LutError, LutResult};
pub use lookup::Lookup;
pub use table::{MAX_DIMENSIONS, Table};
