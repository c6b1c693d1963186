//! Seekable byte sources.
//!
//! A [`Source`] is any `Read + Seek` stream that can also report whether it
//! is actually usable for reading and seeking. The engine checks both before
//! handing the stream to a decoder, because a value may implement the traits
//! and still fail at runtime (a pipe opened as a `File`, a write-only handle).

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};

/// A byte stream the engine can rewind between decoder probes.
pub trait Source: Read + Seek {
    /// Whether the stream was opened for reading.
    fn is_readable(&self) -> bool {
        true
    }

    /// Whether the stream supports repositioning.
    ///
    /// The default asks the stream for its current offset, which fails on
    /// pipes, sockets and character devices.
    fn is_seekable(&mut self) -> bool {
        self.stream_position().is_ok()
    }
}

impl Source for File {
    /// A zero-length read succeeds on any descriptor opened for reading and
    /// fails with `EBADF` on a write-only one, without consuming input.
    fn is_readable(&self) -> bool {
        let mut file: &File = self;
        file.read(&mut []).is_ok()
    }
}

impl<T: AsRef<[u8]>> Source for Cursor<T> {}

impl<R: Source> Source for BufReader<R> {
    fn is_readable(&self) -> bool {
        self.get_ref().is_readable()
    }
}

impl<S: Source + ?Sized> Source for &mut S {
    fn is_readable(&self) -> bool {
        (**self).is_readable()
    }

    fn is_seekable(&mut self) -> bool {
        (**self).is_seekable()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn is_readable(&self) -> bool {
        (**self).is_readable()
    }

    fn is_seekable(&mut self) -> bool {
        (**self).is_seekable()
    }
}

/// Fill `buf` from the source, stopping early only at end of stream.
///
/// Returns the number of bytes read. Decoders use this to sniff magic bytes
/// without treating a short input as an error.
pub fn read_up_to(source: &mut dyn Source, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
