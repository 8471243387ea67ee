//! # Sample Conversion Stage
//!
//! Pull-based reader over the decoded stream: fills caller buffers with
//! canonical interleaved f32 samples, applying the volume multiplier at
//! copy-out time so stored samples are never scaled.

use crate::decoder::DecodedStream;
use crate::error::Result;

/// Converts decoder packets into a continuous sample stream.
///
/// Packets rarely line up with requested read sizes, so the unconsumed
/// tail of the last packet is kept and drained first on the next call. A
/// read returns short only when the decoded stream is exhausted.
pub(crate) struct SampleReader {
    decoded: DecodedStream,
    pending: Vec<f32>,
    consumed: usize,
    /// Samples still to be discarded after a coarse container seek.
    skip: u64,
}

impl SampleReader {
    pub fn new(decoded: DecodedStream) -> Self {
        Self {
            decoded,
            pending: Vec::new(),
            consumed: 0,
            skip: 0,
        }
    }

    /// Fill `out` with canonical samples scaled by `volume`.
    ///
    /// Returns the number of samples written, which is less than
    /// `out.len()` only at end of stream.
    pub fn read(&mut self, out: &mut [f32], volume: f32) -> Result<usize> {
        let mut written = 0;

        while written < out.len() {
            if self.consumed < self.pending.len() {
                let take = (out.len() - written).min(self.pending.len() - self.consumed);
                let src = &self.pending[self.consumed..self.consumed + take];
                for (dst, sample) in out[written..written + take].iter_mut().zip(src) {
                    *dst = sample * volume;
                }
                written += take;
                self.consumed += take;
                continue;
            }

            match self.decoded.next_packet()? {
                Some(samples) => {
                    if (samples.len() as u64) <= self.skip {
                        self.skip -= samples.len() as u64;
                        continue;
                    }
                    self.consumed = self.skip as usize;
                    self.skip = 0;
                    self.pending = samples;
                }
                None => break,
            }
        }

        Ok(written)
    }

    /// Reposition the stream at `frame`, discarding buffered samples.
    ///
    /// The decoder seeks to the nearest packet at or before the target;
    /// the remaining distance is armed as a skip count consumed by the
    /// next read, making the seek sample-accurate.
    pub fn seek_to_frame(&mut self, frame: u64) -> Result<()> {
        self.pending.clear();
        self.consumed = 0;

        let skip_frames = self.decoded.seek_to_frame(frame)?;
        self.skip = skip_frames * u64::from(self.decoded.spec().channels);
        Ok(())
    }
}
