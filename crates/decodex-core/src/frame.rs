//! Decoded frame types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Image container format a frame was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    /// Format reported by an externally registered decoder.
    Custom(String),
}

impl ImageFormat {
    /// Detect a built-in format from leading magic bytes.
    ///
    /// Returns `None` when the bytes match none of the built-in signatures.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&JPEG_MAGIC) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(GIF87_MAGIC) || bytes.starts_with(GIF89_MAGIC) {
            Some(ImageFormat::Gif)
        } else {
            None
        }
    }

    /// Short human readable name.
    pub fn name(&self) -> &str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Custom(name) => name,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub(crate) const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];
pub(crate) const GIF87_MAGIC: &[u8; 6] = b"GIF87a";
pub(crate) const GIF89_MAGIC: &[u8; 6] = b"GIF89a";

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Metadata carried alongside each frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMetadata {
    /// Format the frame was decoded from.
    pub format: ImageFormat,
    /// Zero-based position within the sequence.
    pub index: usize,
    /// EXIF orientation found in the source. Already applied to the pixels
    /// when `orientation_applied` is set.
    pub orientation: Orientation,
    pub orientation_applied: bool,
    /// Display duration for animated formats.
    pub delay: Option<Duration>,
}

impl FrameMetadata {
    /// Metadata for frame `index` of `format`, with no orientation or delay.
    pub fn new(format: ImageFormat, index: usize) -> Self {
        Self {
            format,
            index,
            orientation: Orientation::Normal,
            orientation_applied: false,
            delay: None,
        }
    }
}

/// One decoded image unit: RGBA8 pixels plus metadata.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
    pub metadata: FrameMetadata,
}

impl Frame {
    /// Create a frame from raw RGBA pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>, metadata: FrameMetadata) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
            metadata,
        }
    }

    /// Create a frame from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage, metadata: FrameMetadata) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
            metadata,
        }
    }
}
