//! The resolution engine and its entry points.
//!
//! [`ImageFactory`] owns an ordered [`DecoderRegistry`] and turns a path, a
//! caller-owned stream or a byte buffer into a [`Frames`] sequence:
//!
//! 1. validate the source (readable, then seekable)
//! 2. record the current offset
//! 3. for each decoder in registration order, seek back to that offset and
//!    probe; the first match wins, a hard error stops immediately
//! 4. if every decoder declined, fail with [`ResolveError::NonDecodable`]
//!
//! Sources opened by the factory itself (files, memory buffers) are drained
//! before they are dropped, so those entry points return a buffered
//! `Frames<'static>`. A caller-owned stream stays borrowed by the returned
//! sequence until it is exhausted or dropped.

use std::fs::{self, File};
use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::config::FactoryConfig;
use crate::error::ResolveError;
use crate::registry::{Decoder, DecoderRegistry, Probe};
use crate::sequence::Frames;
use crate::source::Source;

/// Decoder-resolution engine.
///
/// Each factory is an independent instance: nothing is cached between calls
/// and there is no process-wide registry. Registration takes `&mut self`, so
/// a factory shared across threads must be fully built first.
#[derive(Debug, Default)]
pub struct ImageFactory {
    registry: DecoderRegistry,
}

impl ImageFactory {
    /// Create a factory over an existing registry.
    pub fn new(registry: DecoderRegistry) -> Self {
        Self { registry }
    }

    /// Factory with the built-in PNG, JPEG and GIF decoders.
    pub fn with_defaults() -> Self {
        Self::from_config(&FactoryConfig::default())
    }

    /// Factory with the built-in decoders selected by `config`.
    pub fn from_config(config: &FactoryConfig) -> Self {
        Self::new(config.build_registry())
    }

    /// Register another decoder, probed after all existing ones.
    pub fn extend(&mut self, decoder: impl Decoder + 'static) {
        self.registry.extend(decoder);
    }

    pub fn registry(&self) -> &DecoderRegistry {
        &self.registry
    }

    /// Resolve the file at `path`.
    ///
    /// The file is opened read-only, fully decoded and closed before this
    /// returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::FileNotFound`] if `path` is not an existing regular file
    /// - [`ResolveError::FileNonReadable`] if it cannot be opened for reading
    /// - [`ResolveError::NonDecodable`] if every decoder declined
    /// - [`ResolveError::Decode`] if the matching decoder failed
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> Result<Frames<'static>, ResolveError> {
        let path = canonical_or_original(path.as_ref());

        if !path.is_file() {
            return Err(ResolveError::FileNotFound(path));
        }

        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => return Err(open_error(path, e)),
        };

        debug!(path = %path.display(), "resolving file");
        let frames = self.resolve_source(&mut file)?.into_buffered()?;
        Ok(frames)
    }

    /// Resolve a caller-owned stream.
    ///
    /// The stream is never closed by the factory. The returned sequence
    /// keeps borrowing it and may read further as frames are pulled.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NonReadable`] if the stream is not open for reading
    /// - [`ResolveError::NonSeekable`] if the stream cannot seek
    /// - [`ResolveError::NonDecodable`] if every decoder declined
    /// - [`ResolveError::Decode`] if the matching decoder failed
    pub fn resolve_handle<'a, S: Source>(
        &self,
        handle: &'a mut S,
    ) -> Result<Frames<'a>, ResolveError> {
        self.resolve_source(handle)
    }

    /// Resolve an in-memory image.
    ///
    /// The bytes are copied into a temporary read/write buffer that is
    /// dropped before this returns.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::NonDecodable`] if every decoder declined
    /// - [`ResolveError::Decode`] if the matching decoder failed
    pub fn resolve_bytes(&self, bytes: &[u8]) -> Result<Frames<'static>, ResolveError> {
        let mut buffer = Cursor::new(Vec::with_capacity(bytes.len()));
        buffer.write_all(bytes)?;
        buffer.rewind()?;

        let frames = self.resolve_source(&mut buffer)?.into_buffered()?;
        Ok(frames)
    }

    /// Validate `source` and probe every registered decoder against it.
    ///
    /// This is the core resolution loop shared by all entry points.
    pub fn resolve_source<'a>(
        &self,
        source: &'a mut dyn Source,
    ) -> Result<Frames<'a>, ResolveError> {
        if !source.is_readable() {
            return Err(ResolveError::NonReadable);
        }
        if !source.is_seekable() {
            return Err(ResolveError::NonSeekable);
        }

        let origin = source.stream_position()?;

        for (index, decoder) in self.registry.iter().enumerate() {
            trace!(decoder = decoder.name(), origin, "rewinding source");
            source.seek(SeekFrom::Start(origin))?;

            match decoder.decode(source) {
                Ok(Probe::Matched(reader)) => {
                    debug!(decoder = decoder.name(), index, origin, "decoder matched");
                    return Ok(Frames::streaming(source, reader));
                }
                Ok(Probe::Declined) => {
                    trace!(decoder = decoder.name(), index, "decoder declined");
                }
                Err(e) => {
                    debug!(decoder = decoder.name(), index, error = %e, "decoder failed");
                    return Err(ResolveError::Decode(e));
                }
            }
        }

        debug!(decoders = self.registry.len(), origin, "no decoder matched");
        Err(ResolveError::NonDecodable)
    }
}

/// Canonicalize `path`, falling back to it unchanged if that fails.
fn canonical_or_original(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot canonicalize path");
            path.to_path_buf()
        }
    }
}

/// Classify a failure to open an existing regular file.
fn open_error(path: PathBuf, error: io::Error) -> ResolveError {
    match error.kind() {
        io::ErrorKind::PermissionDenied => ResolveError::FileNonReadable(path),
        _ => ResolveError::Io(error),
    }
}
