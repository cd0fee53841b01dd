//! LUT query command.
//!
//! Positional points are evaluated as one batch (in parallel for large
//! batches); named points go through the axis-name lookup.

use crate::QueryArgs;
use crate::commands::Point;
use anyhow::{Context, Result, bail};
use tracing::debug;

/// Runs the query command.
pub fn run(args: QueryArgs, verbose: bool) -> Result<()> {
    let layout = super::load_layout(&args.layout)?;
    let lut = super::load_lut(&args.input, &layout)?;
    let dims = lut.dimension_count();

    let points = args
        .at
        .iter()
        .map(|s| super::parse_point(s))
        .collect::<Result<Vec<_>>>()?;

    let mut flat = Vec::new();
    for point in &points {
        if let Point::Positional(values) = point {
            if values.len() != dims {
                bail!(
                    "query point has {} values, LUT has {} axes ({})",
                    values.len(),
                    dims,
                    lut.names().join(", ")
                );
            }
            flat.extend_from_slice(values);
        }
    }
    debug!(points = points.len(), positional = flat.len() / dims, "evaluating");
    let mut batch = lut.table().par_get_values(&flat)?.into_iter();

    for (text, point) in args.at.iter().zip(&points) {
        let value = match point {
            Point::Positional(_) => batch.next().context("batch result missing")?,
            Point::Named(pairs) => {
                let named: Vec<(&str, f64)> = pairs.iter().map(|(n, v)| (n.as_str(), *v)).collect();
                lut.value_named(&named).with_context(|| format!("Failed to query: {text}"))?
            }
        };
        if verbose {
            println!("{text} -> {value}");
        } else {
            println!("{value}");
        }
    }
    Ok(())
}
