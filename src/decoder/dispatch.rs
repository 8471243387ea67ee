//! Extension hints, codec detection and feature-gate validation.

use crate::decoder::Codec;
use crate::error::{Result, StreamError};
use std::path::Path;
use symphonia::core::codecs::{CodecParameters, CodecType};
use symphonia::core::probe::Hint;
use tracing::debug;

/// Create a probe hint from a file-name hint.
///
/// The extension, when present, guides symphonia's probe toward the right
/// container reader. Without one the probe tries every registered reader,
/// which is the generic fallback for unrecognized names.
pub(crate) fn hint_for_name(name: &str) -> Hint {
    let mut hint = Hint::new();

    match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        Some(extension) => {
            debug!(extension, "dispatching on file extension");
            hint.with_extension(&extension.to_ascii_lowercase());
        }
        None => debug!(name, "no extension, probing content"),
    }

    hint
}

/// Map symphonia's codec identity onto the closed dispatch set.
pub(crate) fn detect_codec(codec_type: CodecType) -> Codec {
    use symphonia::core::codecs::*;

    if codec_type == CODEC_TYPE_MP3 {
        Codec::Mp3
    } else if codec_type == CODEC_TYPE_FLAC {
        Codec::Flac
    } else if codec_type == CODEC_TYPE_VORBIS {
        Codec::Vorbis
    } else if is_linear_pcm(codec_type)
        || codec_type == CODEC_TYPE_ADPCM_MS
        || codec_type == CODEC_TYPE_ADPCM_IMA_WAV
    {
        Codec::Wav
    } else {
        Codec::Unknown
    }
}

/// Returns `true` for uncompressed integer PCM and IEEE float variants.
pub(crate) fn is_linear_pcm(codec_type: CodecType) -> bool {
    use symphonia::core::codecs::*;

    matches!(
        codec_type,
        CODEC_TYPE_PCM_U8
            | CODEC_TYPE_PCM_S8
            | CODEC_TYPE_PCM_S16LE
            | CODEC_TYPE_PCM_S16BE
            | CODEC_TYPE_PCM_S24LE
            | CODEC_TYPE_PCM_S24BE
            | CODEC_TYPE_PCM_S32LE
            | CODEC_TYPE_PCM_S32BE
            | CODEC_TYPE_PCM_F32LE
            | CODEC_TYPE_PCM_F32BE
            | CODEC_TYPE_PCM_F64LE
            | CODEC_TYPE_PCM_F64BE
    )
}

/// Bit depth of the native representation the conversion stage will see.
///
/// Linear PCM keeps its container-reported depth. Everything else is
/// re-encoded to 16-bit PCM by its decoder, so that is the depth the
/// position arithmetic must use.
pub(crate) fn native_bits(params: &CodecParameters) -> u16 {
    if is_linear_pcm(params.codec) {
        params.bits_per_sample.map(|b| b as u16).unwrap_or(16)
    } else {
        16
    }
}

/// Check that the required decoder is enabled at compile time.
pub(crate) fn validate_codec_support(codec: &Codec) -> Result<()> {
    match codec {
        Codec::Wav => {
            #[cfg(not(feature = "decoder-wav"))]
            return Err(StreamError::UnsupportedCodec(
                "WAV decoder not enabled. Enable 'decoder-wav' feature".to_string(),
            ));
            #[cfg(feature = "decoder-wav")]
            Ok(())
        }
        Codec::Mp3 => {
            #[cfg(not(feature = "decoder-mp3"))]
            return Err(StreamError::UnsupportedCodec(
                "MP3 decoder not enabled. Enable 'decoder-mp3' feature".to_string(),
            ));
            #[cfg(feature = "decoder-mp3")]
            Ok(())
        }
        Codec::Flac => {
            #[cfg(not(feature = "decoder-flac"))]
            return Err(StreamError::UnsupportedCodec(
                "FLAC decoder not enabled. Enable 'decoder-flac' feature".to_string(),
            ));
            #[cfg(feature = "decoder-flac")]
            Ok(())
        }
        Codec::Vorbis => {
            #[cfg(not(feature = "decoder-vorbis"))]
            return Err(StreamError::UnsupportedCodec(
                "Vorbis decoder not enabled. Enable 'decoder-vorbis' feature".to_string(),
            ));
            #[cfg(feature = "decoder-vorbis")]
            Ok(())
        }
        Codec::Unknown => Err(StreamError::UnsupportedCodec(
            "unknown audio codec".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphonia::core::codecs::{
        CODEC_TYPE_ADPCM_MS, CODEC_TYPE_FLAC, CODEC_TYPE_MP3, CODEC_TYPE_NULL,
        CODEC_TYPE_PCM_F32LE, CODEC_TYPE_PCM_S16LE, CODEC_TYPE_VORBIS,
    };

    #[test]
    fn codec_detection() {
        assert_eq!(detect_codec(CODEC_TYPE_PCM_S16LE), Codec::Wav);
        assert_eq!(detect_codec(CODEC_TYPE_ADPCM_MS), Codec::Wav);
        assert_eq!(detect_codec(CODEC_TYPE_MP3), Codec::Mp3);
        assert_eq!(detect_codec(CODEC_TYPE_FLAC), Codec::Flac);
        assert_eq!(detect_codec(CODEC_TYPE_VORBIS), Codec::Vorbis);
        assert_eq!(detect_codec(CODEC_TYPE_NULL), Codec::Unknown);
    }

    #[test]
    fn pcm_keeps_reported_depth_compressed_normalizes_to_16() {
        let mut params = CodecParameters::new();
        params.for_codec(CODEC_TYPE_PCM_S16LE).with_bits_per_sample(24);
        assert_eq!(native_bits(&params), 24);

        let mut params = CodecParameters::new();
        params.for_codec(CODEC_TYPE_PCM_F32LE).with_bits_per_sample(32);
        assert_eq!(native_bits(&params), 32);

        let mut params = CodecParameters::new();
        params.for_codec(CODEC_TYPE_MP3);
        assert_eq!(native_bits(&params), 16);

        let mut params = CodecParameters::new();
        params.for_codec(CODEC_TYPE_ADPCM_MS).with_bits_per_sample(4);
        assert_eq!(native_bits(&params), 16);
    }

    #[test]
    fn unknown_codec_never_validates() {
        assert!(validate_codec_support(&Codec::Unknown).is_err());
    }

    #[test]
    fn hint_building_does_not_panic() {
        let _ = hint_for_name("music/song.WAV");
        let _ = hint_for_name("no_extension");
        let _ = hint_for_name("");
    }
}
