//! # Stream Error Types
//!
//! Error taxonomy for opening, reading and controlling an audio stream.

use thiserror::Error;

/// Errors that can occur while opening or driving an audio stream.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Audio format is not recognized or cannot be parsed.
    ///
    /// Fatal to [`crate::AudioStream::open`]: a truncated or corrupt header,
    /// or a container that reports no sample rate, channel layout or frame
    /// count, prevents stream creation entirely.
    #[error("unsupported or invalid audio format: {0}")]
    InvalidFormat(String),

    /// Codec was recognized but its decoder is not compiled in.
    #[error("unsupported codec: {0}")]
    UnsupportedCodec(String),

    /// Native decode failure mid-stream.
    ///
    /// Surfaced to the caller of a read; the stream is unusable afterwards
    /// and must be closed explicitly.
    #[error("decoding error: {0}")]
    Decode(String),

    /// Operation invoked after `close()`.
    #[error("stream is closed")]
    Closed,

    /// I/O error from the underlying byte source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StreamError {
    /// Returns `true` if this error is related to format/codec recognition.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            StreamError::InvalidFormat(_) | StreamError::UnsupportedCodec(_)
        )
    }

    /// Returns `true` if this error occurred while decoding an open stream.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, StreamError::Decode(_) | StreamError::Io(_))
    }
}

/// Result type for stream operations.
pub type Result<T> = std::result::Result<T, StreamError>;
