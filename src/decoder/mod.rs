//! # Decoder Dispatch
//!
//! Selects a decoding capability for a raw byte buffer and exposes it as a
//! stream of native-format samples plus a format descriptor.
//!
//! Dispatch is driven by the file-name hint: a recognized extension seeds
//! symphonia's probe, an unrecognized or absent one falls back to content
//! probing across every registered container reader. The decode stage
//! normalizes any non-PCM native format (e.g. MS ADPCM inside WAV) to
//! linear PCM, so downstream conversion only ever handles PCM or IEEE
//! float input.

pub(crate) mod convert;
pub(crate) mod decoded;
pub(crate) mod dispatch;

pub use decoded::DecodedStream;

use serde::{Deserialize, Serialize};

/// Codec variants the dispatch can select. A closed set: one variant is
/// chosen per stream at open time and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// Linear PCM or ADPCM in a RIFF/WAVE container
    Wav,
    /// MPEG-1/2 Audio Layer III
    Mp3,
    /// Free Lossless Audio Codec
    Flac,
    /// Ogg Vorbis
    Vorbis,
    /// Codec not recognized
    Unknown,
}

impl Codec {
    /// Returns `true` if decoding this codec loses no information.
    pub fn is_lossless(&self) -> bool {
        matches!(self, Codec::Wav | Codec::Flac)
    }

    /// Returns `true` if this codec is lossy.
    pub fn is_lossy(&self) -> bool {
        matches!(self, Codec::Mp3 | Codec::Vorbis)
    }
}

/// Format descriptor for an open stream.
///
/// `source_bits` is the bit depth of the decoder's native representation
/// after PCM normalization; the destination representation is always
/// 32-bit float. Channel count passes through unchanged (no up/down-mix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSpec {
    /// Sample rate in Hz (e.g. 44100, 48000)
    pub sample_rate: u32,
    /// Number of interleaved channels (1 = mono, 2 = stereo, ...)
    pub channels: u16,
    /// Bits per sample in the native representation
    pub source_bits: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_classification() {
        assert!(Codec::Wav.is_lossless());
        assert!(Codec::Flac.is_lossless());
        assert!(Codec::Mp3.is_lossy());
        assert!(Codec::Vorbis.is_lossy());
        assert!(!Codec::Unknown.is_lossless());
        assert!(!Codec::Unknown.is_lossy());
    }
}
