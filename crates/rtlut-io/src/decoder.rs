//! Binary LUT decoder.
//!
//! Reads the legacy stream described by a [`LutLayout`]:
//!
//! 1. one length-prefixed `f32` vector per stream axis, in `stream_order`
//! 2. the packed `f32` value block, nested in `storage_order`, with
//!    `reversed` axes stored last node first
//! 3. trailing vectors, read and dropped
//!
//! The value block is re-laid into the row-major, last-axis-fastest order of
//! [`Table`], and reversed axes are flipped back, so callers only ever see
//! ascending axes.

use std::fs;
use std::io::Read;
use std::path::Path;

use rtlut_core::{Axis, Lookup, LutError, Table};
use tracing::{debug, trace, warn};

use crate::elevation::PRESSURE_SENTINEL;
use crate::layout::{AxisSpec, LutLayout, Plan};
use crate::stream::{CountingReader, read_f32_vec, read_length, skip_f32};
use crate::{IoError, IoResult};

/// Reads a LUT file into a named [`Lookup`].
///
/// The whole file is read first, so stream length checks apply.
///
/// # Example
///
/// ```rust,no_run
/// use rtlut_io::{LutLayout, read_lut};
///
/// let layout = LutLayout::preset("meris-aot").unwrap();
/// let lut = read_lut("MERIS_LUT_MOMO_ContinentalI_80_SDR_noG_v2.bin", &layout).unwrap();
/// let v = lut.value_named(&[
///     ("wavelength", 412.0), ("aot", 0.1), ("elevation", 0.0), ("azimuth", 90.0),
///     ("sza", 30.0), ("vza", 10.0), ("parameter", 1.0),
/// ]).unwrap();
/// ```
pub fn read_lut(path: impl AsRef<Path>, layout: &LutLayout) -> IoResult<Lookup> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), layout = %layout.name, "reading LUT");
    decode_bytes(&bytes, layout)
}

/// Decodes an in-memory LUT.
///
/// With the total length known, a stream whose size disagrees with the
/// declared axis lengths fails with [`IoError::AxisLengthMismatch`].
pub fn decode_bytes(bytes: &[u8], layout: &LutLayout) -> IoResult<Lookup> {
    let table = decode_inner(bytes, layout, Some(bytes.len() as u64))?;
    named(table, layout)
}

/// Decodes a LUT from any reader. Reading stops after the last trailing vector.
pub fn decode<R: Read>(reader: R, layout: &LutLayout) -> IoResult<Lookup> {
    let table = decode_inner(reader, layout, None)?;
    named(table, layout)
}

/// Decodes a LUT from any reader into a bare [`Table`].
pub fn decode_table<R: Read>(reader: R, layout: &LutLayout) -> IoResult<Table> {
    decode_inner(reader, layout, None)
}

fn named(table: Table, layout: &LutLayout) -> IoResult<Lookup> {
    Ok(Lookup::with_names(table, layout.axis_names())?)
}

fn decode_inner<R: Read>(reader: R, layout: &LutLayout, stream_len: Option<u64>) -> IoResult<Table> {
    let plan = layout.plan()?;
    let order = layout.byte_order;
    let mut reader = CountingReader::new(reader);

    let mut raw: Vec<Option<Vec<f32>>> = vec![None; layout.axes.len()];
    for &q in &plan.stream {
        let name = &layout.axes[q].name;
        let len = read_length(&mut reader, layout.length_prefix, order, name)?;
        if let Some(total) = stream_len {
            if reader.position() + len as u64 * 4 > total {
                return Err(IoError::TruncatedStream {
                    context: format!("{name} ({len} values)"),
                });
            }
        }
        let values = read_f32_vec(&mut reader, len, order, name)?;
        debug!(axis = %name, len, "read axis vector");
        raw[q] = Some(values);
    }

    let axes = layout
        .axes
        .iter()
        .zip(raw)
        .map(|(spec, raw)| build_axis(spec, raw))
        .collect::<IoResult<Vec<_>>>()?;
    let shape: Vec<usize> = axes.iter().map(Axis::len).collect();
    let count = shape
        .iter()
        .try_fold(1usize, |acc, &len| acc.checked_mul(len))
        .ok_or_else(|| IoError::InvalidLayout(format!("{}: value count overflows", layout.name)))?;

    let block_end = u64::try_from(count)
        .ok()
        .and_then(|c| c.checked_mul(4))
        .and_then(|bytes| reader.position().checked_add(bytes));
    match (block_end, stream_len) {
        (Some(end), Some(total)) if end > total => {
            return Err(IoError::AxisLengthMismatch {
                expected: end,
                actual: total,
            });
        }
        (None, Some(total)) => {
            return Err(IoError::AxisLengthMismatch {
                expected: u64::MAX,
                actual: total,
            });
        }
        (None, None) => {
            return Err(IoError::InvalidLayout(format!(
                "{}: value block of {count} values exceeds the addressable stream size",
                layout.name
            )));
        }
        _ => {}
    }
    debug!(?shape, count, "reading value block");
    let block = read_f32_vec(&mut reader, count, order, "value block")?;
    let values = scatter(&block, &shape, &layout.axes, &plan);

    for (i, trailing) in layout.trailing.iter().enumerate() {
        let context = format!("trailing vector {i}");
        let len = match trailing.count {
            Some(n) => n,
            None => read_length(&mut reader, layout.length_prefix, order, &context)?,
        };
        skip_f32(&mut reader, len, &context)?;
        trace!(len, "skipped {context}");
    }

    if let Some(total) = stream_len {
        if reader.position() != total {
            warn!(
                consumed = reader.position(),
                total,
                layout = %layout.name,
                "bytes left after last vector"
            );
            return Err(IoError::AxisLengthMismatch {
                expected: reader.position(),
                actual: total,
            });
        }
    }

    Ok(Table::new(values, axes)?)
}

fn build_axis(spec: &AxisSpec, raw: Option<Vec<f32>>) -> IoResult<Axis> {
    let axis = match (&spec.values, raw, spec.transform) {
        (Some(values), _, _) => Axis::new(values),
        (None, Some(raw), Some(transform)) => Axis::from_vec(
            raw.iter()
                .map(|&v| {
                    let v = v as f64;
                    if v == PRESSURE_SENTINEL {
                        warn!(axis = %spec.name, "sentinel node left unconverted");
                    }
                    transform.apply(v)
                })
                .collect(),
        ),
        (None, Some(raw), None) => Axis::from_f32(&raw),
        (None, None, _) => {
            return Err(IoError::InvalidLayout(format!("axis '{}' was never read", spec.name)));
        }
    };

    axis.map_err(|e| match e {
        LutError::InvalidAxis { reason } => IoError::Lut(LutError::InvalidAxis {
            reason: format!("{}: {reason}", spec.name),
        }),
        other => IoError::Lut(other),
    })
}

/// Moves the storage-ordered block into table order.
fn scatter(block: &[f32], shape: &[usize], specs: &[AxisSpec], plan: &Plan) -> Vec<f64> {
    let walk = StorageWalk::new(shape, specs, &plan.storage);
    if walk.is_identity() {
        return block.iter().map(|&v| v as f64).collect();
    }
    let mut values = vec![0.0; block.len()];
    for (&v, dest) in block.iter().zip(walk) {
        values[dest] = v as f64;
    }
    values
}

/// Table offsets in value-block order.
///
/// An odometer over the storage nesting; each step adds the table stride of
/// the axis that moved, negated for reversed axes.
pub(crate) struct StorageWalk {
    lens: Vec<usize>,
    steps: Vec<isize>,
    counters: Vec<usize>,
    dest: isize,
    remaining: usize,
    identity: bool,
}

impl StorageWalk {
    pub(crate) fn new(shape: &[usize], specs: &[AxisSpec], storage: &[usize]) -> Self {
        let n = shape.len();
        let mut strides = vec![1usize; n];
        for k in (0..n.saturating_sub(1)).rev() {
            strides[k] = strides[k + 1] * shape[k + 1];
        }

        let mut lens = Vec::with_capacity(n);
        let mut steps = Vec::with_capacity(n);
        let mut dest = 0isize;
        for &q in storage {
            let stride = strides[q] as isize;
            lens.push(shape[q]);
            if specs[q].reversed {
                steps.push(-stride);
                dest += (shape[q] as isize - 1) * stride;
            } else {
                steps.push(stride);
            }
        }

        let identity = storage.iter().enumerate().all(|(s, &q)| s == q && !specs[q].reversed);
        Self {
            lens,
            steps,
            counters: vec![0; n],
            dest,
            remaining: shape.iter().product(),
            identity,
        }
    }

    /// True if storage order already matches table order.
    pub(crate) fn is_identity(&self) -> bool {
        self.identity
    }
}

impl Iterator for StorageWalk {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.dest as usize;

        for s in (0..self.lens.len()).rev() {
            self.counters[s] += 1;
            if self.counters[s] < self.lens[s] {
                self.dest += self.steps[s];
                break;
            }
            self.counters[s] = 0;
            self.dest -= self.steps[s] * (self.lens[s] as isize - 1);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StorageWalk {}
