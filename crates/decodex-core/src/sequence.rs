//! Lazy frame sequences returned by resolution.
//!
//! A matched decoder hands back a [`FrameReader`], a continuation that
//! produces frames one at a time. The engine pairs it with the source it was
//! matched on to form [`Frames`]. The reader receives the source again on
//! every call and never keeps it, so a `Frames<'a>` borrowing a caller's
//! handle cannot outlive that handle.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::DecodeError;
use crate::frame::Frame;
use crate::source::Source;

/// Per-decoder continuation producing the frames of one matched image.
pub trait FrameReader {
    /// Produce the next frame, reading from `source` if needed.
    ///
    /// `None` ends the sequence. The source is positioned wherever the
    /// previous call (or the matching probe) left it.
    fn next_frame(&mut self, source: &mut dyn Source) -> Option<Result<Frame, DecodeError>>;

    /// Bounds on the number of frames still to come.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

/// A [`FrameReader`] over frames that were already decoded during the probe.
#[derive(Debug, Default)]
pub struct ReadyFrames {
    frames: VecDeque<Frame>,
}

impl ReadyFrames {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl FrameReader for ReadyFrames {
    fn next_frame(&mut self, _source: &mut dyn Source) -> Option<Result<Frame, DecodeError>> {
        self.frames.pop_front().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.frames.len(), Some(self.frames.len()))
    }
}

enum State<'a> {
    Streaming {
        source: &'a mut dyn Source,
        reader: Box<dyn FrameReader>,
    },
    Buffered(std::vec::IntoIter<Frame>),
    Done,
}

/// Finite, non-restartable sequence of decoded frames.
///
/// Yields `Result<Frame, DecodeError>`. After the first `Err` or the end of
/// the sequence it yields `None` forever, and a streaming sequence releases
/// its borrow of the source at that point.
pub struct Frames<'a> {
    state: State<'a>,
}

impl<'a> Frames<'a> {
    /// Sequence that keeps reading from `source` as frames are requested.
    pub fn streaming(source: &'a mut dyn Source, reader: Box<dyn FrameReader>) -> Self {
        Self {
            state: State::Streaming { source, reader },
        }
    }

    /// Whether this sequence still borrows its source.
    pub fn is_streaming(&self) -> bool {
        matches!(self.state, State::Streaming { .. })
    }

    /// Drain every remaining frame, detaching the sequence from its source.
    ///
    /// Fails with the first decode error; frames decoded before it are
    /// discarded.
    pub fn into_buffered(self) -> Result<Frames<'static>, DecodeError> {
        let frames = self.collect::<Result<Vec<_>, _>>()?;
        Ok(Frames::buffered(frames))
    }
}

impl Frames<'static> {
    /// Sequence over frames that are already in memory.
    pub fn buffered(frames: Vec<Frame>) -> Self {
        Self {
            state: State::Buffered(frames.into_iter()),
        }
    }
}

impl Iterator for Frames<'_> {
    type Item = Result<Frame, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match &mut self.state {
            State::Streaming { source, reader } => reader.next_frame(&mut **source),
            State::Buffered(frames) => frames.next().map(Ok),
            State::Done => None,
        };

        if !matches!(next, Some(Ok(_))) {
            self.state = State::Done;
        }
        next
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            State::Streaming { reader, .. } => reader.size_hint(),
            State::Buffered(frames) => frames.size_hint(),
            State::Done => (0, Some(0)),
        }
    }
}

impl FusedIterator for Frames<'_> {}

impl fmt::Debug for Frames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Streaming { .. } => "streaming",
            State::Buffered(_) => "buffered",
            State::Done => "done",
        };
        f.debug_struct("Frames")
            .field("state", &state)
            .field("size_hint", &self.size_hint())
            .finish()
    }
}
