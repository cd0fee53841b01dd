//! Text curve lookup command.

use crate::CurveArgs;
use anyhow::{Context, Result};
use rtlut_io::CurveLookup;

/// Prints the curve value for every `--x`.
pub fn run(args: CurveArgs, verbose: bool) -> Result<()> {
    let mut curve = CurveLookup::from_file(&args.input)
        .with_context(|| format!("Failed to load curve: {}", args.input.display()))?;
    if let Some(min) = args.min_input {
        curve = curve.with_min_input(min);
    }

    if verbose {
        let axis = &curve.table().axes()[0];
        println!("# {} nodes, x in {} .. {}", axis.len(), axis.min(), axis.max());
    }
    for x in &args.x {
        let y = curve.value(*x);
        if verbose {
            println!("{x} -> {y}");
        } else {
            println!("{y}");
        }
    }
    Ok(())
}
