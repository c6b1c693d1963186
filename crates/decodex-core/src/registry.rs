//! Ordered registry of decoder capabilities.

use std::fmt;

use crate::error::DecodeError;
use crate::sequence::FrameReader;
use crate::source::Source;

/// Outcome of a decoder inspecting a source.
pub enum Probe {
    /// The decoder recognized its format and will produce the frames.
    Matched(Box<dyn FrameReader>),
    /// Not this decoder's format. The source position is left undefined.
    Declined,
}

impl Probe {
    /// Shorthand for a match over an arbitrary reader.
    pub fn matched(reader: impl FrameReader + 'static) -> Self {
        Probe::Matched(Box::new(reader))
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Probe::Matched(_))
    }
}

impl fmt::Debug for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probe::Matched(_) => f.write_str("Matched"),
            Probe::Declined => f.write_str("Declined"),
        }
    }
}

/// A capability that tries to interpret a source as one specific format.
///
/// Implementations receive the source positioned at the offset the caller
/// started from and may read as far as they like before declining. They must
/// not keep the source past the call; frames that need further reads get it
/// back through [`FrameReader::next_frame`].
pub trait Decoder: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Probe `source` and, if the format is recognized, start decoding it.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the format is recognized but the
    /// content cannot be decoded. That stops resolution; use
    /// [`Probe::Declined`] for data that is simply not this format.
    fn decode(&self, source: &mut dyn Source) -> Result<Probe, DecodeError>;
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Probe, DecodeError> {
        (**self).decode(source)
    }
}

/// Insertion-ordered, append-only list of decoders.
///
/// Registration order is probe order. No deduplication is performed:
/// registering the same decoder twice makes it run twice.
#[derive(Default)]
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn Decoder>>,
}

impl DecoderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a decoder after every decoder registered so far.
    pub fn extend(&mut self, decoder: impl Decoder + 'static) {
        self.decoders.push(Box::new(decoder));
    }

    /// Append an already boxed decoder.
    pub fn extend_boxed(&mut self, decoder: Box<dyn Decoder>) {
        self.decoders.push(decoder);
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Decoders in probe order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Decoder> {
        self.decoders.iter().map(|d| d.as_ref())
    }

    /// Decoder names in probe order.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|d| d.name()).collect()
    }
}

impl FromIterator<Box<dyn Decoder>> for DecoderRegistry {
    fn from_iter<I: IntoIterator<Item = Box<dyn Decoder>>>(iter: I) -> Self {
        Self {
            decoders: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
