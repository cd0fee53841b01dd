//! CLI command implementations

pub mod curve;
pub mod grid;
pub mod info;
pub mod query;

use anyhow::{Context, Result, bail};
use rtlut_core::Lookup;
use rtlut_io::{LutLayout, PRESETS};
use std::path::Path;
use tracing::debug;

/// Resolves a layout argument: a preset name, otherwise a YAML file path.
pub fn load_layout(arg: &str) -> Result<LutLayout> {
    if PRESETS.contains(&arg) {
        debug!(preset = arg, "using built-in layout");
        return LutLayout::preset(arg).with_context(|| format!("Failed to load preset: {arg}"));
    }
    let path = Path::new(arg);
    if !path.exists() {
        bail!("'{}' is neither a preset ({}) nor a layout file", arg, PRESETS.join(", "));
    }
    LutLayout::from_file(path).with_context(|| format!("Failed to load layout: {}", path.display()))
}

/// Decode a LUT file
pub fn load_lut(path: &Path, layout: &LutLayout) -> Result<Lookup> {
    rtlut_io::read_lut(path, layout).with_context(|| format!("Failed to decode: {}", path.display()))
}

/// Resolve an axis argument given as index or name.
pub fn resolve_axis(lut: &Lookup, axis: &str) -> Result<usize> {
    if let Ok(index) = axis.parse::<usize>() {
        if index < lut.dimension_count() {
            return Ok(index);
        }
        bail!("axis index {} out of range (0..{})", index, lut.dimension_count());
    }
    lut.axis_index(axis)
        .with_context(|| format!("no axis named '{}' (axes: {})", axis, lut.names().join(", ")))
}

/// One parsed `--at` argument.
#[derive(Debug, PartialEq)]
pub enum Point {
    /// Values in axis order
    Positional(Vec<f64>),
    /// name=value pairs in any order
    Named(Vec<(String, f64)>),
}

/// Parse `v0,v1,..` or `name=v,name=v,..`.
pub fn parse_point(text: &str) -> Result<Point> {
    let fields: Vec<&str> = text.split(',').map(str::trim).filter(|f| !f.is_empty()).collect();
    if fields.is_empty() {
        bail!("empty query point");
    }

    if fields.iter().any(|f| f.contains('=')) {
        let mut pairs = Vec::with_capacity(fields.len());
        for field in fields {
            let (name, value) = field
                .split_once('=')
                .with_context(|| format!("expected name=value, got '{field}'"))?;
            let value: f64 = value
                .trim()
                .parse()
                .with_context(|| format!("invalid number for '{}': '{}'", name.trim(), value.trim()))?;
            pairs.push((name.trim().to_string(), value));
        }
        return Ok(Point::Named(pairs));
    }

    let values = fields
        .iter()
        .map(|f| f.parse::<f64>().with_context(|| format!("invalid number: '{f}'")))
        .collect::<Result<Vec<_>>>()?;
    Ok(Point::Positional(values))
}
