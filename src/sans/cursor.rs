//! Bounds-checked reads from a byte slice.

use thiserror::Error;

/// A read would run past the end of the payload.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Reading {width} bytes at offset {offset} overruns the {len}-byte payload.")]
pub struct OutOfRange {
    /// Offset the read started at.
    pub offset: usize,
    /// Number of bytes requested.
    pub width: usize,
    /// Length of the payload.
    pub len: usize,
}

/// A read position in an immutable payload.
///
/// The offset only moves forward, and only by successful reads. A failed read
/// leaves it untouched.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Start reading at the beginning of a payload.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::at(bytes, 0)
    }

    /// Start reading at an offset into a payload.
    pub fn at(bytes: &'a [u8], offset: usize) -> Self {
        Self { bytes, offset }
    }

    /// Offset of the next byte to be read.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    /// Take an exact number of bytes, advancing the offset.
    pub fn take<const N: usize>(&mut self) -> Result<[u8; N], OutOfRange> {
        let end = self.offset.saturating_add(N);

        let Some(bytes) = self.bytes.get(self.offset..end) else {
            return Err(OutOfRange {
                offset: self.offset,
                width: N,
                len: self.bytes.len(),
            });
        };

        let mut r = [0; N];
        r.copy_from_slice(bytes);
        self.offset = end;

        Ok(r)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, OutOfRange> {
        self.take().map(|[b]| b)
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16, OutOfRange> {
        self.take().map(u16::from_be_bytes)
    }
}
