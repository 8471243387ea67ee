//! # Source Byte Adapter
//!
//! Presents a caller-supplied byte buffer as a seekable media source for the
//! decode pipeline.

use bytes::Bytes;
use std::io::{Read, Seek, SeekFrom};
use symphonia::core::io::MediaSource;

/// Seekable, randomly-addressable view over an immutable byte buffer.
///
/// Reads past the end of the buffer return fewer bytes than requested
/// (possibly zero), never an error. Seeking past the end is permitted;
/// subsequent reads simply return zero bytes. Both behaviors match what
/// container readers expect from a finite source.
pub struct ByteSource {
    data: Bytes,
    pos: u64,
}

impl ByteSource {
    /// Wrap a byte buffer. The buffer is owned by the adapter from here on.
    pub fn new(data: Bytes) -> Self {
        Self { data, pos: 0 }
    }

    /// Total length of the underlying buffer in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read position in bytes. May exceed `len()` after a seek.
    pub fn position(&self) -> u64 {
        self.pos
    }
}

impl Read for ByteSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let start = self.pos.min(self.len()) as usize;
        let remaining = self.data.len() - start;
        let count = remaining.min(buf.len());

        buf[..count].copy_from_slice(&self.data[start..start + count]);
        self.pos += count as u64;
        Ok(count)
    }
}

impl Seek for ByteSource {
    fn seek(&mut self, from: SeekFrom) -> std::io::Result<u64> {
        let target = match from {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => self.len().checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        };

        match target {
            Some(pos) => {
                self.pos = pos;
                Ok(pos)
            }
            None => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "seek before start of buffer",
            )),
        }
    }
}

impl MediaSource for ByteSource {
    fn is_seekable(&self) -> bool {
        true
    }

    fn byte_len(&self) -> Option<u64> {
        Some(self.len())
    }
}
