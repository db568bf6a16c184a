use std::ops::Range;

use super::error::{FileError, FileResult};
use super::INT_SIZE;

/// Fixed-size in-memory image of one block.
///
/// Values are encoded big-endian so the on-disk layout does not depend on the
/// host. Byte arrays and strings carry a 4-byte length prefix.
///
/// Strings are stored as their raw bytes and `max_length` counts bytes, so the
/// supported domain is single-byte text. Multi-byte characters are copied
/// verbatim but no character-level guarantees are made for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    buffer: Vec<u8>,
}

impl Page {
    /// Create a zero-filled page of `block_size` bytes
    pub fn new(block_size: usize) -> Self {
        Self {
            buffer: vec![0u8; block_size],
        }
    }

    /// Wrap an existing buffer without copying it.
    /// The buffer should be exactly one block long for the manager that will
    /// read or write this page.
    pub fn from_bytes(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    /// Give the underlying buffer back to the caller
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Number of bytes a string occupies once stored, including its length prefix
    pub fn max_length(s: &str) -> usize {
        INT_SIZE + s.len()
    }

    pub fn block_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn contents(&self) -> &[u8] {
        &self.buffer
    }

    pub fn contents_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    pub fn get_int(&self, offset: usize) -> FileResult<i32> {
        let range = self.range(offset, INT_SIZE)?;
        let mut bytes = [0u8; INT_SIZE];
        bytes.copy_from_slice(&self.buffer[range]);
        Ok(i32::from_be_bytes(bytes))
    }

    pub fn set_int(&mut self, offset: usize, n: i32) -> FileResult<()> {
        let range = self.range(offset, INT_SIZE)?;
        self.buffer[range].copy_from_slice(&n.to_be_bytes());
        Ok(())
    }

    /// Read a length-prefixed byte array. The result is a copy, so later
    /// writes to the page do not affect it.
    pub fn get_bytes(&self, offset: usize) -> FileResult<Vec<u8>> {
        let declared = self.get_int(offset)?;
        let data_start = offset + INT_SIZE;
        let len = usize::try_from(declared).map_err(|_| FileError::Bounds {
            offset: data_start,
            len: 0,
            block_size: self.buffer.len(),
        })?;

        let range = self.range(data_start, len)?;
        Ok(self.buffer[range].to_vec())
    }

    /// Write `data` behind a 4-byte length prefix. Nothing is written unless
    /// the whole encoding fits inside the page.
    pub fn set_bytes(&mut self, offset: usize, data: &[u8]) -> FileResult<()> {
        let total = INT_SIZE
            .checked_add(data.len())
            .ok_or_else(|| self.bounds_error(offset, data.len()))?;
        self.range(offset, total)?;
        let len = i32::try_from(data.len()).map_err(|_| self.bounds_error(offset, total))?;

        self.set_int(offset, len)?;
        let data_start = offset + INT_SIZE;
        self.buffer[data_start..data_start + data.len()].copy_from_slice(data);
        Ok(())
    }

    pub fn get_string(&self, offset: usize) -> FileResult<String> {
        let bytes = self.get_bytes(offset)?;
        Ok(String::from_utf8(bytes)?)
    }

    pub fn set_string(&mut self, offset: usize, s: &str) -> FileResult<()> {
        self.set_bytes(offset, s.as_bytes())
    }

    /// Byte range `[offset, offset + len)` if it lies entirely inside the page
    fn range(&self, offset: usize, len: usize) -> FileResult<Range<usize>> {
        match offset.checked_add(len) {
            Some(end) if end <= self.buffer.len() => Ok(offset..end),
            _ => Err(self.bounds_error(offset, len)),
        }
    }

    fn bounds_error(&self, offset: usize, len: usize) -> FileError {
        FileError::Bounds {
            offset,
            len,
            block_size: self.buffer.len(),
        }
    }
}
