//! LUT info command.
//!
//! Prints every axis with its length and range, plus value statistics.

use crate::InfoArgs;
use anyhow::Result;
use rtlut_core::Lookup;
use std::fs;
use tracing::info;

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let layout = super::load_layout(&args.layout)?;

    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let lut = super::load_lut(path, &layout)?;
        info!(path = %path.display(), dims = lut.dimension_count(), "decoded");

        println!("{}", path.display());
        println!("  Layout:     {}", layout.name);
        println!("  File size:  {} bytes", file_size);
        print_axes(&lut, verbose)?;
        print_stats(&lut);

        if args.input.len() > 1 {
            println!();
        }
    }

    if args.yaml {
        println!("{}", layout.to_yaml()?);
    }
    Ok(())
}

fn print_axes(lut: &Lookup, verbose: bool) -> Result<()> {
    println!("  Dimensions: {}", lut.dimension_count());
    for (i, name) in lut.names().iter().enumerate() {
        let axis = lut.dimension(i)?;
        println!(
            "    [{}] {:<12} {:>4} nodes  {} .. {}",
            i,
            name,
            axis.len(),
            axis.min(),
            axis.max()
        );
        if verbose {
            println!("        {:?}", axis.values());
        }
    }
    Ok(())
}

/// Value count, min, max and mean of the stored block.
fn print_stats(lut: &Lookup) {
    let values = lut.table().values();
    let (min, max, avg) = compute_stats(values);
    println!("  Values:     {}", values.len());
    println!("  Min value:  {:.6}", min);
    println!("  Max value:  {:.6}", max);
    println!("  Avg value:  {:.6}", avg);
}

fn compute_stats(values: &[f64]) -> (f64, f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    (min, max, sum / values.len().max(1) as f64)
}
