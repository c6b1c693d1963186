//! JPEG decoding with EXIF orientation handling.

use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};

use exif::{In, Reader, Tag};
use image::codecs::jpeg::JpegDecoder as JpegCodec;
use image::{DynamicImage, ImageDecoder};

use super::{image_error, sniff};
use crate::error::DecodeError;
use crate::frame::{Frame, FrameMetadata, ImageFormat, Orientation, JPEG_MAGIC};
use crate::registry::{Decoder, Probe};
use crate::sequence::FrameReader;
use crate::source::Source;

const FORMAT: &str = "JPEG";

/// Single-frame JPEG decoder.
///
/// By default the EXIF orientation is applied to the decoded pixels so the
/// frame displays upright; the original tag is kept in the frame metadata.
#[derive(Debug, Clone, Copy)]
pub struct JpegDecoder {
    apply_orientation: bool,
}

impl JpegDecoder {
    pub fn new() -> Self {
        Self {
            apply_orientation: true,
        }
    }

    /// Decoder that leaves pixels in stored order.
    pub fn without_orientation() -> Self {
        Self {
            apply_orientation: false,
        }
    }

    pub fn applies_orientation(&self) -> bool {
        self.apply_orientation
    }
}

impl Default for JpegDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for JpegDecoder {
    fn name(&self) -> &str {
        FORMAT
    }

    fn decode(&self, source: &mut dyn Source) -> Result<Probe, DecodeError> {
        let (start, magic, len) = sniff::<3>(source)?;
        if len != JPEG_MAGIC.len() || magic != JPEG_MAGIC {
            return Ok(Probe::Declined);
        }

        let codec =
            JpegCodec::new(BufReader::new(&mut *source)).map_err(|e| image_error(FORMAT, e))?;
        let (width, height) = codec.dimensions();
        tracing::trace!(width, height, start, "JPEG header parsed");

        Ok(Probe::matched(JpegFrames {
            start,
            apply_orientation: self.apply_orientation,
            done: false,
        }))
    }
}

struct JpegFrames {
    start: u64,
    apply_orientation: bool,
    done: bool,
}

impl FrameReader for JpegFrames {
    fn next_frame(&mut self, source: &mut dyn Source) -> Option<Result<Frame, DecodeError>> {
        if self.done {
            return None;
        }
        self.done = true;
        Some(self.read_frame(source))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::from(!self.done);
        (left, Some(left))
    }
}

impl JpegFrames {
    fn read_frame(&self, source: &mut dyn Source) -> Result<Frame, DecodeError> {
        source.seek(SeekFrom::Start(self.start))?;
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        decode_jpeg(&bytes, self.apply_orientation)
    }
}

/// Decode JPEG bytes, optionally applying EXIF orientation correction.
fn decode_jpeg(bytes: &[u8], apply: bool) -> Result<Frame, DecodeError> {
    // Read orientation before decoding; the codec ignores EXIF.
    let orientation = extract_orientation(bytes);

    let codec = JpegCodec::new(Cursor::new(bytes)).map_err(|e| image_error(FORMAT, e))?;
    let img = DynamicImage::from_decoder(codec).map_err(|e| image_error(FORMAT, e))?;
    let img = if apply {
        apply_orientation(img, orientation)
    } else {
        img
    };

    let mut metadata = FrameMetadata::new(ImageFormat::Jpeg, 0);
    metadata.orientation = orientation;
    metadata.orientation_applied = apply;
    Ok(Frame::from_rgba_image(img.into_rgba8(), metadata))
}

/// Extract EXIF orientation from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
