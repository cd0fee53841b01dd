//! Surface pressure to elevation conversion.
//!
//! Aerosol tables are simulated at surface pressures, while retrievals look
//! them up by terrain height. The barometric formula below converts a
//! pressure node (hPa) to geopotential height (km) before the axis is built:
//!
//! ```text
//! h = 0.001 * (1 - (p / 1013.25)^(1 / 5.25588)) / 2.25577e-5
//! ```
//!
//! The value `-1` marks a placeholder node and passes through unchanged.

use serde::{Deserialize, Serialize};

/// Standard sea-level pressure in hPa.
pub const SEA_LEVEL_PRESSURE: f64 = 1013.25;

/// Pressure node that is never converted.
pub const PRESSURE_SENTINEL: f64 = -1.0;

const EXPONENT: f64 = 5.25588;
const LAPSE: f64 = 2.25577e-5;

/// Converts surface pressure (hPa) to elevation above sea level (km).
///
/// # Example
///
/// ```rust
/// use rtlut_io::pressure_to_elevation;
///
/// assert_eq!(pressure_to_elevation(1013.25), 0.0);
/// assert_eq!(pressure_to_elevation(-1.0), -1.0);
/// ```
#[inline]
pub fn pressure_to_elevation(pressure: f64) -> f64 {
    if pressure == PRESSURE_SENTINEL {
        return pressure;
    }
    0.001 * (1.0 - (pressure / SEA_LEVEL_PRESSURE).powf(1.0 / EXPONENT)) / LAPSE
}

/// Converts elevation (km) back to surface pressure (hPa).
///
/// Inverse of [`pressure_to_elevation`]; the sentinel maps to itself.
#[inline]
pub fn elevation_to_pressure(elevation: f64) -> f64 {
    if elevation == PRESSURE_SENTINEL {
        return elevation;
    }
    SEA_LEVEL_PRESSURE * (1.0 - 1000.0 * LAPSE * elevation).powf(EXPONENT)
}

/// Preprocessing applied to a stream axis before it becomes an [`rtlut_core::Axis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisTransform {
    /// Surface pressure (hPa) to elevation (km).
    PressureToElevation,
}

impl AxisTransform {
    /// Applies the transform to one stored coordinate.
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            AxisTransform::PressureToElevation => pressure_to_elevation(value),
        }
    }

    /// Maps a table coordinate back to its stored form.
    #[inline]
    pub fn invert(self, value: f64) -> f64 {
        match self {
            AxisTransform::PressureToElevation => elevation_to_pressure(value),
        }
    }
}
