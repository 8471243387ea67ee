//! # pcm-stream
//!
//! Normalizes heterogeneous encoded audio byte buffers (WAV/PCM, ADPCM,
//! MP3, FLAC, Vorbis) into one canonical streaming representation:
//! interleaved 32-bit float samples, seekable by byte position, with
//! adjustable volume and optional seamless looping.
//!
//! ## Overview
//!
//! [`AudioStream::open`] probes the buffer, selects a decoding variant and
//! returns a stream whose cursor, length and seeks are all expressed in
//! destination bytes (4 per f32 sample). Reads are synchronous and
//! blocking; a single stream is safe to drive from a playback callback
//! while another thread adjusts position, volume or looping.
//!
//! ```rust,no_run
//! use pcm_stream::AudioStream;
//!
//! # fn example(bytes: bytes::Bytes) -> pcm_stream::Result<()> {
//! let stream = AudioStream::open("clip.wav", bytes)?;
//! stream.set_volume(0.8);
//!
//! let mut buf = vec![0.0f32; 4096];
//! loop {
//!     let n = stream.read_samples(&mut buf)?;
//!     if n == 0 {
//!         break; // end of stream (with looping on, reads are never short)
//!     }
//! }
//! stream.close();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod sniff;
pub mod source;
pub mod translate;

mod decoder;
mod reader;
mod stream;

pub use decoder::{Codec, StreamSpec};
pub use error::{Result, StreamError};
pub use source::ByteSource;
pub use stream::AudioStream;
pub use translate::BlockLayout;
