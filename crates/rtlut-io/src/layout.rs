//! LUT layout descriptors.
//!
//! The legacy binary tables carry no self-description: the reader has to
//! know which axis vectors come first, which axes are implied by the caller,
//! how the value block is nested and what trails it. A [`LutLayout`] spells
//! that out, either in code or as YAML:
//!
//! ```yaml
//! name: meris-aot
//! byte_order: little
//! axes:                      # query order, dimension 0 first
//!   - name: wavelength
//!     values: [412.0, 442.0] # supplied here, not in the stream
//!   - name: aot
//!   - name: elevation
//!     transform: pressure_to_elevation
//!   - name: azimuth
//!     reversed: true         # stored high-to-low in the value block
//! stream_order: [azimuth, elevation, aot]
//! trailing:
//!   - count: 2
//! ```
//!
//! Axes without `values` are read from the stream as length-prefixed `f32`
//! vectors, in `stream_order`. The value block follows, nested in
//! `storage_order` (outermost first, defaults to query order).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::elevation::AxisTransform;
use crate::stream::{ByteOrder, LengthPrefix};
use crate::{IoError, IoResult};

const MERIS_AOT: &str = include_str!("../layouts/meris_aot.yaml");
const MERIS_AOT_KX: &str = include_str!("../layouts/meris_aot_kx.yaml");

/// Names of the built-in layouts.
pub const PRESETS: &[&str] = &["meris-aot", "meris-aot-kx"];

/// One table axis as declared by a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisSpec {
    /// Axis name, unique within the layout.
    pub name: String,
    /// Coordinates supplied by the layout. `None` means read from the stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    /// Value block stores this axis from last node to first.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reversed: bool,
    /// Conversion applied to stream coordinates before the axis is built.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<AxisTransform>,
}

impl AxisSpec {
    /// An axis read from the stream.
    pub fn stream(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: None,
            reversed: false,
            transform: None,
        }
    }

    /// An axis whose coordinates the layout supplies.
    pub fn external(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            values: Some(values),
            ..Self::stream(name)
        }
    }

    /// Marks the axis as stored in reverse in the value block.
    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Sets the stream coordinate transform.
    pub fn with_transform(mut self, transform: AxisTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// True if the axis vector is read from the stream.
    #[inline]
    pub fn is_stream(&self) -> bool {
        self.values.is_none()
    }
}

/// A vector after the value block that is read and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Trailing {
    /// Vector carries its own length prefix.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub prefixed: bool,
    /// Fixed number of bare values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Trailing {
    /// A length-prefixed trailing vector.
    pub fn prefixed() -> Self {
        Self { prefixed: true, count: None }
    }

    /// `count` bare values.
    pub fn count(count: usize) -> Self {
        Self { prefixed: false, count: Some(count) }
    }
}

/// Complete description of one binary LUT encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LutLayout {
    /// Layout name, used in logs and by the CLI.
    pub name: String,
    /// Byte order of the whole stream.
    #[serde(default)]
    pub byte_order: ByteOrder,
    /// Integer type of length prefixes.
    #[serde(default)]
    pub length_prefix: LengthPrefix,
    /// Axes in query order.
    pub axes: Vec<AxisSpec>,
    /// Stream axes in file order. Empty: stream axes in query order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stream_order: Vec<String>,
    /// Value block nesting, outermost first. Empty: query order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage_order: Vec<String>,
    /// Vectors after the value block.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trailing: Vec<Trailing>,
}

/// Index form of a validated layout.
#[derive(Debug, Clone)]
pub(crate) struct Plan {
    /// Query indices of stream axes, in file order.
    pub stream: Vec<usize>,
    /// Query indices outermost to innermost in the value block.
    pub storage: Vec<usize>,
}

impl LutLayout {
    /// Creates a layout with default byte order and prefixes.
    pub fn new(name: impl Into<String>, axes: Vec<AxisSpec>) -> Self {
        Self {
            name: name.into(),
            byte_order: ByteOrder::default(),
            length_prefix: LengthPrefix::default(),
            axes,
            stream_order: Vec::new(),
            storage_order: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// Sets the file order of the stream axes.
    pub fn with_stream_order<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stream_order = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the value block nesting.
    pub fn with_storage_order<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.storage_order = names.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a trailing vector.
    pub fn with_trailing(mut self, trailing: Trailing) -> Self {
        self.trailing.push(trailing);
        self
    }

    /// Sets the byte order.
    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Returns a built-in layout by name (see [`PRESETS`]).
    pub fn preset(name: &str) -> IoResult<Self> {
        let yaml = match name {
            "meris-aot" => MERIS_AOT,
            "meris-aot-kx" => MERIS_AOT_KX,
            _ => {
                return Err(IoError::InvalidLayout(format!(
                    "unknown preset '{name}' (available: {})",
                    PRESETS.join(", ")
                )));
            }
        };
        Self::from_yaml_str(yaml)
    }

    /// Parses and validates a YAML layout.
    pub fn from_yaml_str(yaml: &str) -> IoResult<Self> {
        let layout: Self = serde_yaml::from_str(yaml)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Loads a YAML layout file.
    pub fn from_file(path: impl AsRef<Path>) -> IoResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Serializes the layout to YAML.
    pub fn to_yaml(&self) -> IoResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Axis names in query order.
    pub fn axis_names(&self) -> Vec<&str> {
        self.axes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Checks internal consistency.
    ///
    /// # Errors
    ///
    /// [`IoError::InvalidLayout`] when names repeat, orders are not
    /// permutations, or an axis declaration is contradictory.
    pub fn validate(&self) -> IoResult<()> {
        self.plan().map(|_| ())
    }

    fn index_of(&self, name: &str) -> IoResult<usize> {
        self.axes
            .iter()
            .position(|a| a.name == name)
            .ok_or_else(|| IoError::InvalidLayout(format!("unknown axis '{name}'")))
    }

    pub(crate) fn plan(&self) -> IoResult<Plan> {
        let invalid = |msg: String| Err(IoError::InvalidLayout(format!("{}: {msg}", self.name)));

        if self.axes.is_empty() {
            return invalid("no axes".into());
        }
        let mut names = HashSet::new();
        for axis in &self.axes {
            if !names.insert(axis.name.as_str()) {
                return invalid(format!("duplicate axis '{}'", axis.name));
            }
            if let Some(values) = &axis.values {
                if values.is_empty() {
                    return invalid(format!("axis '{}' has no values", axis.name));
                }
                if axis.transform.is_some() {
                    return invalid(format!("transform on supplied axis '{}'", axis.name));
                }
            }
        }
        for t in &self.trailing {
            if t.prefixed == t.count.is_some() {
                return invalid("trailing vector needs exactly one of 'prefixed' or 'count'".into());
            }
        }

        let stream = if self.stream_order.is_empty() {
            (0..self.axes.len()).filter(|&i| self.axes[i].is_stream()).collect()
        } else {
            let mut order = Vec::with_capacity(self.stream_order.len());
            for name in &self.stream_order {
                let idx = self.index_of(name)?;
                if !self.axes[idx].is_stream() {
                    return invalid(format!("'{name}' in stream_order has supplied values"));
                }
                if order.contains(&idx) {
                    return invalid(format!("'{name}' repeated in stream_order"));
                }
                order.push(idx);
            }
            let stream_count = self.axes.iter().filter(|a| a.is_stream()).count();
            if order.len() != stream_count {
                return invalid("stream_order must list every stream axis".into());
            }
            order
        };

        let storage = if self.storage_order.is_empty() {
            (0..self.axes.len()).collect()
        } else {
            let mut order = Vec::with_capacity(self.axes.len());
            for name in &self.storage_order {
                let idx = self.index_of(name)?;
                if order.contains(&idx) {
                    return invalid(format!("'{name}' repeated in storage_order"));
                }
                order.push(idx);
            }
            if order.len() != self.axes.len() {
                return invalid("storage_order must list every axis".into());
            }
            order
        };

        debug!(layout = %self.name, ?stream, ?storage, "layout plan");
        Ok(Plan { stream, storage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> LutLayout {
        LutLayout::new(
            "small",
            vec![
                AxisSpec::external("band", vec![1.0, 2.0]),
                AxisSpec::stream("aot"),
                AxisSpec::stream("azimuth").reversed(),
            ],
        )
    }

    #[test]
    fn test_default_plan() {
        let plan = small().plan().unwrap();
        assert_eq!(plan.stream, vec![1, 2]);
        assert_eq!(plan.storage, vec![0, 1, 2]);
    }

    #[test]
    fn test_explicit_orders() {
        let layout = small()
            .with_stream_order(["azimuth", "aot"])
            .with_storage_order(["aot", "band", "azimuth"]);
        let plan = layout.plan().unwrap();
        assert_eq!(plan.stream, vec![2, 1]);
        assert_eq!(plan.storage, vec![1, 0, 2]);
    }

    #[test]
    fn test_invalid_orders() {
        assert!(small().with_stream_order(["aot"]).validate().is_err());
        assert!(small().with_stream_order(["aot", "band"]).validate().is_err());
        assert!(small().with_storage_order(["aot", "band"]).validate().is_err());
        assert!(small().with_storage_order(["aot", "aot", "band"]).validate().is_err());
        assert!(small().with_storage_order(["aot", "vza", "band"]).validate().is_err());
    }

    #[test]
    fn test_invalid_axes() {
        let dup = LutLayout::new("dup", vec![AxisSpec::stream("a"), AxisSpec::stream("a")]);
        assert!(dup.validate().is_err());

        let empty = LutLayout::new("empty", vec![AxisSpec::external("a", vec![])]);
        assert!(empty.validate().is_err());

        let bad = LutLayout::new(
            "bad",
            vec![AxisSpec::external("a", vec![1.0]).with_transform(AxisTransform::PressureToElevation)],
        );
        assert!(bad.validate().is_err());

        let trailing = small().with_trailing(Trailing::default());
        assert!(trailing.validate().is_err());
    }

    #[test]
    fn test_presets() {
        for name in PRESETS {
            let layout = LutLayout::preset(name).unwrap();
            assert_eq!(layout.name, *name);
            assert_eq!(layout.axes.len(), 7);
        }
        assert!(LutLayout::preset("nope").is_err());

        let aot = LutLayout::preset("meris-aot").unwrap();
        assert_eq!(
            aot.axis_names(),
            vec!["wavelength", "aot", "elevation", "azimuth", "sza", "vza", "parameter"]
        );
        assert!(aot.axes[3].reversed);
        assert_eq!(aot.axes[2].transform, Some(AxisTransform::PressureToElevation));
        assert_eq!(aot.trailing, vec![Trailing::count(15)]);
        assert_eq!(aot.plan().unwrap().stream, vec![5, 4, 3, 2, 1]);

        let kx = LutLayout::preset("meris-aot-kx").unwrap();
        assert!(kx.axes.iter().all(|a| !a.reversed && a.transform.is_none()));
        assert_eq!(kx.axes[6].values.as_deref(), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let layout = small().with_trailing(Trailing::prefixed());
        let yaml = layout.to_yaml().unwrap();
        let back = LutLayout::from_yaml_str(&yaml).unwrap();
        assert_eq!(layout, back);
    }

    #[test]
    fn test_yaml_unknown_field() {
        let yaml = "name: x\naxes:\n  - name: a\n    colour: red\n";
        assert!(matches!(LutLayout::from_yaml_str(yaml), Err(IoError::Yaml(_))));
    }
}
