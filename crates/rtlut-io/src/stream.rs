//! Low-level stream primitives for the legacy LUT encoding.
//!
//! The format is a bare sequence of 32-bit words: length prefixes
//! (`i32` or `u32`) and IEEE-754 `f32` values, all in one byte order.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::{IoError, IoResult};

/// Values read per chunk; bounds allocation when a length prefix is corrupt.
const CHUNK: usize = 64 * 1024;

/// Byte order of every word in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Little-endian. The legacy tables use this.
    #[default]
    Little,
    /// Big-endian.
    Big,
}

/// Integer type of vector length prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPrefix {
    /// Signed 32-bit; negative values are rejected.
    #[default]
    I32,
    /// Unsigned 32-bit.
    U32,
}

/// Reader wrapper that counts consumed bytes.
pub(crate) struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R: Read> CountingReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, count: 0 }
    }

    pub(crate) fn position(&self) -> u64 {
        self.count
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

/// Reads one vector length prefix.
pub(crate) fn read_length<R: Read>(
    reader: &mut R,
    prefix: LengthPrefix,
    order: ByteOrder,
    context: &str,
) -> IoResult<usize> {
    let raw: i64 = match (prefix, order) {
        (LengthPrefix::I32, ByteOrder::Little) => reader.read_i32::<LittleEndian>().map(i64::from),
        (LengthPrefix::I32, ByteOrder::Big) => reader.read_i32::<BigEndian>().map(i64::from),
        (LengthPrefix::U32, ByteOrder::Little) => reader.read_u32::<LittleEndian>().map(i64::from),
        (LengthPrefix::U32, ByteOrder::Big) => reader.read_u32::<BigEndian>().map(i64::from),
    }
    .map_err(|e| IoError::from_read(e, format!("length of {context}")))?;

    usize::try_from(raw).map_err(|_| IoError::InvalidLength {
        context: context.to_string(),
        length: raw,
    })
}

/// Reads `len` values into a new vector.
pub(crate) fn read_f32_vec<R: Read>(
    reader: &mut R,
    len: usize,
    order: ByteOrder,
    context: &str,
) -> IoResult<Vec<f32>> {
    let mut out = Vec::with_capacity(len.min(CHUNK));
    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(CHUNK);
        let start = out.len();
        out.resize(start + n, 0.0);
        read_f32_into(reader, &mut out[start..], order)
            .map_err(|e| IoError::from_read(e, context.to_string()))?;
        remaining -= n;
    }
    Ok(out)
}

fn read_f32_into<R: Read>(reader: &mut R, buf: &mut [f32], order: ByteOrder) -> io::Result<()> {
    match order {
        ByteOrder::Little => reader.read_f32_into::<LittleEndian>(buf),
        ByteOrder::Big => reader.read_f32_into::<BigEndian>(buf),
    }
}

/// Reads and discards `len` values.
pub(crate) fn skip_f32<R: Read>(reader: &mut R, len: usize, context: &str) -> IoResult<()> {
    let bytes = len as u64 * 4;
    let copied = io::copy(&mut reader.by_ref().take(bytes), &mut io::sink())?;
    if copied != bytes {
        return Err(IoError::TruncatedStream {
            context: context.to_string(),
        });
    }
    Ok(())
}

/// Writes one vector length prefix.
pub(crate) fn write_length<W: Write>(
    writer: &mut W,
    len: usize,
    prefix: LengthPrefix,
    order: ByteOrder,
    context: &str,
) -> IoResult<()> {
    let invalid = || IoError::InvalidLength {
        context: context.to_string(),
        length: len as i64,
    };
    match prefix {
        LengthPrefix::I32 => {
            let v = i32::try_from(len).map_err(|_| invalid())?;
            match order {
                ByteOrder::Little => writer.write_i32::<LittleEndian>(v)?,
                ByteOrder::Big => writer.write_i32::<BigEndian>(v)?,
            }
        }
        LengthPrefix::U32 => {
            let v = u32::try_from(len).map_err(|_| invalid())?;
            match order {
                ByteOrder::Little => writer.write_u32::<LittleEndian>(v)?,
                ByteOrder::Big => writer.write_u32::<BigEndian>(v)?,
            }
        }
    }
    Ok(())
}

/// Writes one value.
#[inline]
pub(crate) fn write_f32<W: Write>(writer: &mut W, value: f32, order: ByteOrder) -> IoResult<()> {
    match order {
        ByteOrder::Little => writer.write_f32::<LittleEndian>(value)?,
        ByteOrder::Big => writer.write_f32::<BigEndian>(value)?,
    }
    Ok(())
}
