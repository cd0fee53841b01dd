//! # rtlut-io
//!
//! Reading and writing lookup tables for [`rtlut_core`].
//!
//! The radiative-transfer tables this crate targets are bare streams of
//! 32-bit words with no header. Their structure lives in a [`LutLayout`]:
//! which axis vectors the stream holds and in what order, which axes the
//! caller supplies, how the value block is nested, and what trails it.
//!
//! # Formats
//!
//! - Binary LUT streams ([`decode`], [`read_lut`], [`encode`], [`write_lut`])
//! - Two-column text curves ([`read_curve_csv`], [`CurveLookup`])
//!
//! # Usage
//!
//! ```rust,no_run
//! use rtlut_io::{LutLayout, read_lut};
//!
//! let layout = LutLayout::preset("meris-aot-kx")?;
//! let lut = read_lut("MERIS_LUT_MOMO_ContinentalI_80_SDR_noG_Kx-AOD_v2.bin", &layout)?;
//! assert_eq!(lut.dimension_count(), 7);
//! let kx = lut.value(&[412.0, 0.1, 0.0, 45.0, 30.0, 10.0, 1.0])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Preprocessing
//!
//! Axes may declare a [`AxisTransform`], applied to the stored coordinates
//! before the axis is built. The aerosol tables store surface pressure and
//! are queried by elevation ([`pressure_to_elevation`]).
//!
//! # Dependencies
//!
//! - [`byteorder`] - Endian-aware word I/O
//! - [`serde`] / [`serde_yaml`] - Layout descriptors
//! - [`tracing`] - Decode diagnostics
//! - [`thiserror`] - Error handling

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod curve;
mod decoder;
mod elevation;
mod encoder;
mod error;
mod layout;
mod stream;

pub use curve::{CurveLookup, parse_curve_csv, read_curve_csv};
pub use decoder::{decode, decode_bytes, decode_table, read_lut};
pub use elevation::{
    AxisTransform, PRESSURE_SENTINEL, SEA_LEVEL_PRESSURE, elevation_to_pressure, pressure_to_elevation,
};
pub use encoder::{encode, encode_to_vec, write_lut};
pub use error::{IoError, IoResult};
pub use layout::{AxisSpec, LutLayout, PRESETS, Trailing};
pub use stream::{ByteOrder, LengthPrefix};
