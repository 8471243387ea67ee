//! # Audio Stream
//!
//! The central stream object: one canonical f32 view over an encoded byte
//! buffer, with a byte-addressable cursor, adjustable volume and optional
//! seamless looping.
//!
//! ## Concurrency
//!
//! One playback caller pulls reads while control callers seek or adjust
//! volume concurrently. A single stream-scoped mutex serializes every read
//! and every position access; the guard is scoped, so the lock is released
//! on all exit paths including decode failures. Volume and looping are
//! lone atomic fields and are deliberately not serialized against an
//! in-flight read — a read observes the value loaded at its start.

use crate::decoder::{dispatch, Codec, DecodedStream, StreamSpec};
use crate::error::{Result, StreamError};
use crate::reader::SampleReader;
use crate::source::ByteSource;
use crate::translate::BlockLayout;
use bytes::Bytes;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tracing::{debug, info};

/// A seekable, loopable stream of interleaved f32 samples decoded from an
/// encoded audio buffer.
///
/// Positions and lengths are expressed in destination bytes: 4 bytes per
/// f32 sample, `4 × channels` per frame. The cursor is always frame
/// aligned, so byte- and sample-oriented reads are two views over the same
/// state and may be mixed freely.
pub struct AudioStream {
    inner: Mutex<Option<StreamInner>>,
    volume_bits: AtomicU32,
    looping: AtomicBool,
    codec: Codec,
    spec: StreamSpec,
    layout: BlockLayout,
    len_bytes: u64,
}

/// Mutable state behind the stream mutex.
struct StreamInner {
    reader: SampleReader,
    /// Destination-byte cursor, always in `[0, len_bytes]` and frame aligned.
    position: u64,
    /// Staging buffer for byte-oriented reads.
    scratch: Vec<f32>,
}

impl std::fmt::Debug for AudioStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioStream")
            .field("codec", &self.codec)
            .field("spec", &self.spec)
            .field("layout", &self.layout)
            .field("len_bytes", &self.len_bytes)
            .finish_non_exhaustive()
    }
}

impl AudioStream {
    /// Open a stream over `data`, selecting the decoder from the file-name
    /// hint with content probing as the fallback.
    ///
    /// Construction is atomic: any format error during probing or decoder
    /// setup fails the open and releases everything acquired so far.
    pub fn open(file_name_hint: &str, data: impl Into<Bytes>) -> Result<Self> {
        let source = ByteSource::new(data.into());
        let hint = dispatch::hint_for_name(file_name_hint);

        let decoded = DecodedStream::open(source, hint)?;
        let codec = decoded.codec();
        let spec = decoded.spec();
        let layout = BlockLayout::new(spec.source_bits, spec.channels);
        let len_bytes = layout.source_to_dest(decoded.native_byte_len());

        info!(
            ?codec,
            sample_rate = spec.sample_rate,
            channels = spec.channels,
            len_bytes,
            "opened audio stream"
        );

        Ok(Self {
            inner: Mutex::new(Some(StreamInner {
                reader: SampleReader::new(decoded),
                position: 0,
                scratch: Vec::new(),
            })),
            volume_bits: AtomicU32::new(1.0f32.to_bits()),
            looping: AtomicBool::new(false),
            codec,
            spec,
            layout,
            len_bytes,
        })
    }

    /// Read canonical samples into `out`, advancing the cursor.
    ///
    /// The requested count is truncated down to whole frames so the cursor
    /// stays frame aligned. With looping off, a short count means end of
    /// stream. With looping on, the full truncated count is always
    /// delivered unless the stream has zero playable length.
    pub fn read_samples(&self, out: &mut [f32]) -> Result<usize> {
        let mut guard = self.inner.lock();
        let inner = guard.as_mut().ok_or(StreamError::Closed)?;

        let frame = usize::from(self.spec.channels);
        let want = out.len() - out.len() % frame;
        self.read_locked(inner, &mut out[..want])
    }

    /// Read canonical samples as little-endian f32 bytes.
    ///
    /// Shares the cursor with [`read_samples`](Self::read_samples); the
    /// byte count is truncated down to whole destination frames.
    pub fn read(&self, out: &mut [u8]) -> Result<usize> {
        let mut guard = self.inner.lock();
        let inner = guard.as_mut().ok_or(StreamError::Closed)?;

        let block = self.layout.dest_block as usize;
        let samples = (out.len() - out.len() % block) / 4;

        let mut scratch = std::mem::take(&mut inner.scratch);
        scratch.resize(samples, 0.0);

        let n = match self.read_locked(inner, &mut scratch[..samples]) {
            Ok(n) => n,
            Err(e) => {
                inner.scratch = scratch;
                return Err(e);
            }
        };

        for (chunk, sample) in out.chunks_exact_mut(4).zip(&scratch[..n]) {
            chunk.copy_from_slice(&sample.to_le_bytes());
        }

        inner.scratch = scratch;
        Ok(n * 4)
    }

    /// Looping read controller. `out` is already truncated to whole frames.
    fn read_locked(&self, inner: &mut StreamInner, out: &mut [f32]) -> Result<usize> {
        let volume = self.volume();
        let looping = self.looping();
        let mut filled = 0;

        while filled < out.len() {
            let n = inner.reader.read(&mut out[filled..], volume)?;
            filled += n;
            inner.position += 4 * n as u64;

            if filled == out.len() {
                break;
            }

            // Sub-read came back short: the stream is exhausted.
            if !looping {
                break;
            }
            // Zero playable length, or zero progress while already at the
            // start, must terminate instead of spinning on resets.
            if self.len_bytes == 0 || (n == 0 && inner.position == 0) {
                break;
            }

            inner.reader.seek_to_frame(0)?;
            inner.position = 0;
        }

        Ok(filled)
    }

    /// Current cursor in destination bytes.
    pub fn position(&self) -> Result<u64> {
        let guard = self.inner.lock();
        let inner = guard.as_ref().ok_or(StreamError::Closed)?;
        Ok(inner.position)
    }

    /// Move the cursor to `dest_bytes`.
    ///
    /// The target is clamped to `[0, len_bytes()]` and rounded down to a
    /// whole source frame before the decoder seeks, so the stream never
    /// resumes mid-frame.
    pub fn set_position(&self, dest_bytes: u64) -> Result<()> {
        let mut guard = self.inner.lock();
        let inner = guard.as_mut().ok_or(StreamError::Closed)?;

        let source = self.layout.dest_to_source(dest_bytes.min(self.len_bytes));
        let aligned = self.layout.source_to_dest(source);

        inner.reader.seek_to_frame(self.layout.source_to_frame(source))?;
        inner.position = aligned;

        debug!(requested = dest_bytes, position = aligned, "seeked stream");
        Ok(())
    }

    /// Total playable length in destination bytes. Fixed at open.
    pub fn len_bytes(&self) -> u64 {
        self.len_bytes
    }

    /// Format descriptor of the open stream.
    pub fn spec(&self) -> StreamSpec {
        self.spec
    }

    /// Codec variant selected at open.
    pub fn codec(&self) -> Codec {
        self.codec.clone()
    }

    /// Current volume multiplier.
    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::Relaxed))
    }

    /// Set the volume multiplier applied to samples as they are read.
    /// Never baked into stored samples; takes effect from the next read.
    pub fn set_volume(&self, volume: f32) {
        self.volume_bits.store(volume.to_bits(), Ordering::Relaxed);
    }

    /// Whether reads wrap to the start at end of stream.
    pub fn looping(&self) -> bool {
        self.looping.load(Ordering::Relaxed)
    }

    /// Enable or disable seamless looping. Takes effect from the next read.
    pub fn set_looping(&self, looping: bool) {
        self.looping.store(looping, Ordering::Relaxed);
    }

    /// Release the decoded stream and the source bytes, in that order.
    /// Idempotent: closing twice is a no-op. Subsequent reads and position
    /// accesses fail with [`StreamError::Closed`].
    pub fn close(&self) {
        let mut guard = self.inner.lock();
        if guard.take().is_some() {
            debug!("audio stream closed");
        }
    }

    /// Returns `true` once `close()` has run.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().is_none()
    }
}
