//! Bounded, cursor-addressed byte buffer.
//!
//! [`ByteStream`] is the leaf abstraction every codec in this crate reads
//! from and writes to. Unlike a `Vec<u8>` writer it has a fixed capacity:
//! any read, write, or seek that would leave `0..=capacity` fails with
//! [`Error::OutOfBounds`] or [`Error::InvalidSeek`] instead of growing or
//! overrunning the buffer.
//!
//! # Example
//!
//! ```rust
//! use id3tag::format::stream::ByteStream;
//! use std::io::SeekFrom;
//!
//! let mut stream = ByteStream::new(4);
//! stream.write(b"ID3")?;
//! assert!(stream.write(b"xx").is_err());
//!
//! stream.seek(SeekFrom::Start(0))?;
//! assert_eq!(stream.read(3)?, b"ID3");
//! # Ok::<(), id3tag::Error>(())
//! ```

use std::io::SeekFrom;

use crate::{Error, Result};

/// A fixed-capacity byte buffer with a read/write cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteStream {
    buf: Vec<u8>,
    /// High-water mark of written bytes.
    len: usize,
    cursor: usize,
}

impl ByteStream {
    /// Creates a zero-filled stream with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity],
            len: 0,
            cursor: 0,
        }
    }

    /// Wraps existing bytes. Capacity and used length equal `bytes.len()`.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let buf = bytes.into();
        let len = buf.len();
        Self {
            buf,
            len,
            cursor: 0,
        }
    }

    /// Returns the fixed capacity of the stream.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Returns the number of bytes written so far (high-water mark).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if nothing has been written to the stream.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Returns the number of bytes between the cursor and the capacity.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.cursor
    }

    /// Returns the written prefix of the buffer.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Consumes the stream and returns the whole buffer, including any
    /// unwritten (zero) tail.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    fn check(&self, requested: usize) -> Result<usize> {
        match self.cursor.checked_add(requested) {
            Some(end) if end <= self.buf.len() => Ok(end),
            _ => Err(Error::out_of_bounds(self.cursor, requested, self.buf.len())),
        }
    }

    /// Returns the next `n` bytes and advances the cursor.
    pub fn read(&mut self, n: usize) -> Result<&[u8]> {
        let end = self.check(n)?;
        let start = self.cursor;
        self.cursor = end;
        Ok(&self.buf[start..end])
    }

    /// Reads exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read(N)?);
        Ok(out)
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a big-endian 16-bit integer.
    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Reads a big-endian 32-bit integer.
    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Reads everything from the cursor to the capacity.
    pub fn read_to_end(&mut self) -> &[u8] {
        let start = self.cursor;
        self.cursor = self.buf.len();
        &self.buf[start..]
    }

    /// Copies `bytes` at the cursor and advances it.
    ///
    /// Nothing is written if the bytes do not fit.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.check(bytes.len())?;
        self.buf[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
        self.len = self.len.max(end);
        Ok(())
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write(&[value])
    }

    /// Writes a big-endian 32-bit integer.
    pub fn write_u32_be(&mut self, value: u32) -> Result<()> {
        self.write(&value.to_be_bytes())
    }

    /// Advances the cursor by `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.cursor = self.check(n)?;
        Ok(())
    }

    /// Repositions the cursor.
    ///
    /// `SeekFrom::End` is relative to the capacity. The resulting position
    /// must lie in `0..=capacity`. Returns the new position.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let capacity = self.buf.len();
        let target: i128 = match pos {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::Current(delta) => self.cursor as i128 + delta as i128,
            SeekFrom::End(delta) => capacity as i128 + delta as i128,
        };
        if target < 0 || target > capacity as i128 {
            return Err(Error::InvalidSeek { target, capacity });
        }
        self.cursor = target as usize;
        Ok(self.cursor as u64)
    }
}
