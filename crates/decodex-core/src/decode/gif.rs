//! Animated GIF decoding.

use std::collections::VecDeque;
use std::io::{BufReader, Seek, SeekFrom};
use std::time::Duration;

use image::codecs::gif::GifDecoder as GifCodec;
use image::{AnimationDecoder, ImageDecoder};

use super::{image_error, sniff};
use crate::error::DecodeError;
use crate::frame::{Frame, FrameMetadata, ImageFormat, GIF87_MAGIC, GIF89_MAGIC};
use crate::registry::{Decoder, Probe};
use crate::sequence::FrameReader;
use crate::source::Source;

const FORMAT: &str = "GIF";

/// Multi-frame GIF decoder.
///
/// Frames are composited onto the logical screen, so every frame has the
/// full image dimensions. The per-frame delay is kept in the metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct GifDecoder;

impl Decoder for GifDecoder {
    fn name(&self) -> &str {
        FORMAT
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Probe, DecodeError> {
        let (start, magic, len) = sniff::<6>(source)?;
        if len != magic.len() || (&magic != GIF87_MAGIC && &magic != GIF89_MAGIC) {
            return Ok(Probe::Declined);
        }

        let codec =
            GifCodec::new(BufReader::new(&mut *source)).map_err(|e| image_error(FORMAT, e))?;
        let (width, height) = codec.dimensions();
        tracing::trace!(width, height, start, "GIF header parsed");

        Ok(Probe::matched(GifFrames {
            start,
            pending: None,
        }))
    }
}

/// Frames are decoded in one pass on the first request: the codec owns its
/// reader, so it cannot be parked between calls without owning the source.
struct GifFrames {
    start: u64,
    pending: Option<VecDeque<Frame>>,
}

impl FrameReader for GifFrames {
    fn next_frame(&mut self, source: &mut dyn Source) -> Option<Result<Frame, DecodeError>> {
        if self.pending.is_none() {
            match decode_frames(source, self.start) {
                Ok(frames) => self.pending = Some(frames),
                Err(e) => {
                    self.pending = Some(VecDeque::new());
                    return Some(Err(e));
                }
            }
        }
        self.pending.as_mut()?.pop_front().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.pending {
            Some(frames) => (frames.len(), Some(frames.len())),
            None => (0, None),
        }
    }
}

fn decode_frames(source: &mut dyn Source, start: u64) -> Result<VecDeque<Frame>, DecodeError> {
    source.seek(SeekFrom::Start(start))?;
    let codec = GifCodec::new(BufReader::new(source)).map_err(|e| image_error(FORMAT, e))?;
    let frames = codec
        .into_frames()
        .collect_frames()
        .map_err(|e| image_error(FORMAT, e))?;

    Ok(frames
        .into_iter()
        .enumerate()
        .map(|(index, frame)| {
            let mut metadata = FrameMetadata::new(ImageFormat::Gif, index);
            metadata.delay = Some(Duration::from(frame.delay()));
            Frame::from_rgba_image(frame.into_buffer(), metadata)
        })
        .collect())
}
