//! Binary LUT encoder.
//!
//! Writes a [`Table`] in the encoding a [`LutLayout`] describes, so that
//! [`decode`](crate::decode) reads it back. Values are narrowed to `f32`,
//! stream axes pass through the inverse of their transform, and reversed
//! axes are written last node first.
//!
//! Trailing vectors carry no table data: fixed-count ones are written as
//! zeros, prefixed ones as empty vectors.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rtlut_core::Table;
use tracing::debug;

use crate::decoder::StorageWalk;
use crate::layout::LutLayout;
use crate::stream::{write_f32, write_length};
use crate::{IoError, IoResult};

/// Writes `table` to `writer` in `layout`'s encoding.
///
/// # Errors
///
/// [`IoError::InvalidLayout`] if the table's dimensions do not match the
/// layout, or a supplied axis differs from the layout's values.
pub fn encode<W: Write>(mut writer: W, layout: &LutLayout, table: &Table) -> IoResult<()> {
    let plan = layout.plan()?;
    let order = layout.byte_order;

    if table.dimension_count() != layout.axes.len() {
        return Err(IoError::InvalidLayout(format!(
            "{}: layout has {} axes, table has {}",
            layout.name,
            layout.axes.len(),
            table.dimension_count()
        )));
    }
    for (spec, axis) in layout.axes.iter().zip(table.axes()) {
        if let Some(values) = &spec.values {
            if values.as_slice() != axis.values() {
                return Err(IoError::InvalidLayout(format!(
                    "{}: table axis '{}' differs from layout values",
                    layout.name, spec.name
                )));
            }
        }
    }

    for &q in &plan.stream {
        let spec = &layout.axes[q];
        let axis = table.axes()[q].values();
        write_length(&mut writer, axis.len(), layout.length_prefix, order, &spec.name)?;
        for &v in axis {
            let stored = match spec.transform {
                Some(t) => t.invert(v),
                None => v,
            };
            write_f32(&mut writer, stored as f32, order)?;
        }
    }

    let values = table.values();
    let walk = StorageWalk::new(&table.shape(), &layout.axes, &plan.storage);
    for idx in walk {
        write_f32(&mut writer, values[idx] as f32, order)?;
    }

    for (i, trailing) in layout.trailing.iter().enumerate() {
        match trailing.count {
            Some(n) => {
                for _ in 0..n {
                    write_f32(&mut writer, 0.0, order)?;
                }
            }
            None => {
                write_length(&mut writer, 0, layout.length_prefix, order, &format!("trailing vector {i}"))?;
            }
        }
    }

    debug!(layout = %layout.name, values = values.len(), "encoded LUT");
    Ok(())
}

/// Encodes `table` into a new byte vector.
pub fn encode_to_vec(layout: &LutLayout, table: &Table) -> IoResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(table.values().len() * 4 + 256);
    encode(&mut buf, layout, table)?;
    Ok(buf)
}

/// Writes `table` to a file.
pub fn write_lut(path: impl AsRef<Path>, layout: &LutLayout, table: &Table) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    encode(&mut writer, layout, table)?;
    writer.flush()?;
    Ok(())
}
