//! # Position Translator
//!
//! Stateless arithmetic between destination byte offsets (canonical f32
//! representation) and source byte offsets (the decoder's native
//! representation), preserving block alignment.

/// Byte sizes of one whole sample frame on each side of the conversion.
///
/// Both translation directions use truncating integer division, so a
/// requested destination position always rounds down to the nearest whole
/// source frame before the decoder is seeked. The stream therefore never
/// plays a partial sample frame, and translating an aligned destination
/// offset to source bytes and back reproduces it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    /// Bytes per frame in the decoder's native representation.
    pub source_block: u64,
    /// Bytes per frame in the canonical f32 representation.
    pub dest_block: u64,
}

impl BlockLayout {
    /// Layout for a native format of `source_bits` bits per sample across
    /// `channels` interleaved channels. Bit depths that are not a whole
    /// number of bytes round up to their storage size.
    pub fn new(source_bits: u16, channels: u16) -> Self {
        let source_bytes = u64::from(source_bits).div_ceil(8);
        Self {
            source_block: source_bytes * u64::from(channels),
            dest_block: 4 * u64::from(channels),
        }
    }

    /// Destination byte offset → source byte offset, rounded down to a
    /// whole frame.
    pub fn dest_to_source(&self, dest_bytes: u64) -> u64 {
        self.source_block * (dest_bytes / self.dest_block)
    }

    /// Source byte offset → destination byte offset, rounded down to a
    /// whole frame.
    pub fn source_to_dest(&self, source_bytes: u64) -> u64 {
        self.dest_block * (source_bytes / self.source_block)
    }

    /// Frame index for a source byte offset.
    pub fn source_to_frame(&self, source_bytes: u64) -> u64 {
        source_bytes / self.source_block
    }
}
