//! WASM-compatible wrapper types for decoded frames.

use decodex_core::Frame;
use wasm_bindgen::prelude::*;

/// A decoded frame wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsFrame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    format: String,
    index: usize,
    delay_ms: Option<u32>,
    orientation: u8,
}

#[wasm_bindgen]
impl JsFrame {
    /// Frame width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Name of the format that decoded this frame ("PNG", "JPEG", "GIF", ...)
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.format.clone()
    }

    /// Zero-based position in the sequence
    #[wasm_bindgen(getter)]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display duration in milliseconds, for animated formats
    #[wasm_bindgen(getter, js_name = delayMs)]
    pub fn delay_ms(&self) -> Option<u32> {
        self.delay_ms
    }

    /// EXIF orientation tag (1-8) found in the source
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Number of bytes in the pixel buffer (width * height * 4 for RGBA)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsFrame {
    pub(crate) fn from_frame(frame: Frame) -> Self {
        let delay_ms = frame
            .metadata
            .delay
            .map(|d| u32::try_from(d.as_millis()).unwrap_or(u32::MAX));
        Self {
            width: frame.width,
            height: frame.height,
            format: frame.metadata.format.name().to_string(),
            index: frame.metadata.index,
            delay_ms,
            orientation: frame.metadata.orientation as u8,
            pixels: frame.pixels,
        }
    }
}
