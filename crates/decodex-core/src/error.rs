//! Error taxonomy for decoder resolution.
//!
//! Two layers are kept apart:
//!
//! - [`ResolveError`] is what the engine reports: a bad input source, or no
//!   registered decoder understood the content.
//! - [`DecodeError`] is what a decoder raises once it has recognized its
//!   format and then failed to parse it. The engine forwards it untouched.

use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`ImageFactory`](crate::ImageFactory) entry points.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The path does not resolve to an existing regular file.
    #[error("File \"{}\" not found", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but cannot be opened for reading.
    #[error("File \"{}\" not readable", .0.display())]
    FileNonReadable(PathBuf),

    /// The supplied stream is not open for reading.
    #[error("Passed stream is not readable")]
    NonReadable,

    /// The supplied stream does not support seeking.
    #[error("Passed stream is not seekable")]
    NonSeekable,

    /// Every registered decoder declined the content.
    #[error("Cannot find a suitable decoder for the image")]
    NonDecodable,

    /// A decoder recognized the content but failed to decode it.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The engine itself failed to open, position or fill a source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Hard errors raised by a [`Decoder`](crate::Decoder).
///
/// Returning one of these means "this is my format and it is broken", which
/// stops resolution. A decoder that does not recognize the data returns
/// [`Probe::Declined`](crate::Probe::Declined) instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The format was recognized but the content is corrupted or truncated.
    #[error("Corrupted or incomplete {format} data: {message}")]
    Malformed {
        format: &'static str,
        message: String,
    },

    /// Reading from the source failed mid-decode.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Opaque failure from an external decoder.
    #[error(transparent)]
    Other(Box<dyn StdError + Send + Sync>),
}

impl DecodeError {
    /// Shorthand for [`DecodeError::Malformed`].
    pub fn malformed(format: &'static str, message: impl Into<String>) -> Self {
        DecodeError::Malformed {
            format,
            message: message.into(),
        }
    }

    /// Wrap an arbitrary decoder error.
    pub fn other<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        DecodeError::Other(Box::new(error))
    }
}

impl ResolveError {
    /// True for errors that reject the input before any decoder ran.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            ResolveError::FileNotFound(_)
                | ResolveError::FileNonReadable(_)
                | ResolveError::NonReadable
                | ResolveError::NonSeekable
        )
    }
}
