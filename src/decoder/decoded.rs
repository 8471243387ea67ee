//! Native-format sample source backed by symphonia's format/codec layers.

use crate::decoder::{convert, dispatch, Codec, StreamSpec};
use crate::error::{Result, StreamError};
use crate::source::ByteSource;
use crate::translate::BlockLayout;
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatOptions, FormatReader, SeekMode, SeekTo};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

// A decode error on a single packet is not fatal; skipping to the next
// packet usually recovers. More than this many in a row is.
const MAX_DECODE_RETRIES: usize = 3;

/// The decoded stream selected by dispatch: container reader plus codec
/// decoder over one audio track, read as successive packets of samples.
///
/// Field order matters for teardown: the codec decoder is released before
/// the format reader, which in turn owns the source bytes.
pub struct DecodedStream {
    decoder: Box<dyn Decoder>,
    reader: Box<dyn FormatReader>,
    track_id: u32,
    codec: Codec,
    spec: StreamSpec,
    total_frames: u64,
    eof: bool,
}

impl DecodedStream {
    /// Probe the byte source and instantiate the decoding variant it
    /// selects. Fails with a format error if the container cannot be
    /// parsed, reports no usable track, or leaves the stream length
    /// unknown — a byte-accurate native length is required for position
    /// arithmetic, so a partially-open stream is never returned.
    pub fn open(source: ByteSource, hint: Hint) -> Result<Self> {
        let mss = MediaSourceStream::new(Box::new(source), Default::default());

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| StreamError::InvalidFormat(format!("failed to probe container: {e}")))?;

        let reader = probed.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| StreamError::InvalidFormat("no decodable audio track".to_string()))?;

        let track_id = track.id;
        let params = track.codec_params.clone();

        let codec = dispatch::detect_codec(params.codec);
        dispatch::validate_codec_support(&codec)?;

        let sample_rate = params
            .sample_rate
            .ok_or_else(|| StreamError::InvalidFormat("missing sample rate".to_string()))?;
        let channels = params
            .channels
            .map(|ch| ch.count() as u16)
            .ok_or_else(|| StreamError::InvalidFormat("missing channel layout".to_string()))?;
        let total_frames = params
            .n_frames
            .ok_or_else(|| StreamError::InvalidFormat("stream length unknown".to_string()))?;

        let spec = StreamSpec {
            sample_rate,
            channels,
            source_bits: dispatch::native_bits(&params),
        };

        let decoder = symphonia::default::get_codecs()
            .make(&params, &DecoderOptions::default())
            .map_err(|e| {
                StreamError::UnsupportedCodec(format!("failed to instantiate decoder: {e}"))
            })?;

        debug!(
            ?codec,
            sample_rate,
            channels,
            source_bits = spec.source_bits,
            total_frames,
            "decoder selected"
        );

        Ok(Self {
            decoder,
            reader,
            track_id,
            codec,
            spec,
            total_frames,
            eof: false,
        })
    }

    pub fn codec(&self) -> Codec {
        self.codec.clone()
    }

    pub fn spec(&self) -> StreamSpec {
        self.spec
    }

    /// Byte-accurate length of the stream in its native representation.
    pub fn native_byte_len(&self) -> u64 {
        let layout = BlockLayout::new(self.spec.source_bits, self.spec.channels);
        self.total_frames * layout.source_block
    }

    /// Decode the next packet of the selected track into interleaved f32
    /// samples. Returns `Ok(None)` at end of stream. Corrupt packets are
    /// skipped up to a bounded retry count; anything else is fatal.
    pub fn next_packet(&mut self) -> Result<Option<Vec<f32>>> {
        if self.eof {
            return Ok(None);
        }

        let mut retries = 0;
        loop {
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    debug!("end of stream");
                    self.eof = true;
                    return Ok(None);
                }
                Err(SymphoniaError::ResetRequired) => {
                    return Err(StreamError::Decode(
                        "track list changed, reset required".to_string(),
                    ));
                }
                Err(e) => {
                    return Err(StreamError::Decode(format!("failed to read packet: {e}")));
                }
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            match self.decoder.decode(&packet) {
                Ok(decoded) => return Ok(Some(convert::interleaved_f32(&decoded))),
                Err(SymphoniaError::DecodeError(e)) => {
                    retries += 1;
                    warn!(retries, "skipping corrupt packet: {e}");
                    if retries > MAX_DECODE_RETRIES {
                        return Err(StreamError::Decode(format!(
                            "decode failed on {retries} consecutive packets: {e}"
                        )));
                    }
                }
                Err(e) => {
                    return Err(StreamError::Decode(format!("failed to decode packet: {e}")));
                }
            }
        }
    }

    /// Position the native cursor at `frame`.
    ///
    /// Container seeks land on a packet boundary at or before the target;
    /// the returned count is the number of frames the caller must discard
    /// to reach it exactly. Seeking at or past the end parks the stream in
    /// its end-of-stream state.
    pub fn seek_to_frame(&mut self, frame: u64) -> Result<u64> {
        if frame >= self.total_frames {
            self.eof = true;
            return Ok(0);
        }

        let seeked = self
            .reader
            .seek(
                SeekMode::Accurate,
                SeekTo::TimeStamp {
                    ts: frame,
                    track_id: self.track_id,
                },
            )
            .map_err(|e| StreamError::Decode(format!("seek to frame {frame} failed: {e}")))?;

        self.decoder.reset();
        self.eof = false;

        Ok(seeked.required_ts.saturating_sub(seeked.actual_ts))
    }
}
