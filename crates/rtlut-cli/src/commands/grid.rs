//! Axis grid command.

use crate::GridArgs;
use anyhow::Result;

/// Prints the nodes of one axis, one per line.
pub fn run(args: GridArgs, verbose: bool) -> Result<()> {
    let layout = super::load_layout(&args.layout)?;
    let lut = super::load_lut(&args.input, &layout)?;
    let index = super::resolve_axis(&lut, &args.axis)?;

    if verbose {
        println!("# {} ({} nodes)", lut.names()[index], lut.grid(index)?.len());
    }
    for v in lut.grid(index)? {
        println!("{v}");
    }
    Ok(())
}
