//! PNG decoding.

use std::io::{BufReader, Seek, SeekFrom};

use image::codecs::png::PngDecoder as PngCodec;
use image::{DynamicImage, ImageDecoder};

use super::{image_error, sniff};
use crate::error::DecodeError;
use crate::frame::{Frame, FrameMetadata, ImageFormat, PNG_MAGIC};
use crate::registry::{Decoder, Probe};
use crate::sequence::FrameReader;
use crate::source::Source;

const FORMAT: &str = "PNG";

/// Single-frame PNG decoder. APNG animation is not expanded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngDecoder;

impl Decoder for PngDecoder {
    fn name(&self) -> &str {
        FORMAT
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Probe, DecodeError> {
        let (start, magic, len) = sniff::<8>(source)?;
        if len != PNG_MAGIC.len() || magic != PNG_MAGIC {
            return Ok(Probe::Declined);
        }

        // Signature matched: from here on a bad header is a hard error.
        let codec =
            PngCodec::new(BufReader::new(&mut *source)).map_err(|e| image_error(FORMAT, e))?;
        let (width, height) = codec.dimensions();
        tracing::trace!(width, height, start, "PNG header parsed");

        Ok(Probe::matched(PngFrames { start, done: false }))
    }
}

struct PngFrames {
    start: u64,
    done: bool,
}

impl FrameReader for PngFrames {
    fn next_frame(&mut self, source: &mut dyn Source) -> Option<Result<Frame, DecodeError>> {
        if self.done {
            return None;
        }
        self.done = true;
        Some(decode_at(source, self.start))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::from(!self.done);
        (left, Some(left))
    }
}

fn decode_at(source: &mut dyn Source, start: u64) -> Result<Frame, DecodeError> {
    source.seek(SeekFrom::Start(start))?;
    let codec = PngCodec::new(BufReader::new(source)).map_err(|e| image_error(FORMAT, e))?;
    let img = DynamicImage::from_decoder(codec).map_err(|e| image_error(FORMAT, e))?;
    Ok(Frame::from_rgba_image(
        img.into_rgba8(),
        FrameMetadata::new(ImageFormat::Png, 0),
    ))
}
