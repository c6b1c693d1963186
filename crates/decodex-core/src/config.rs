//! Factory configuration.
//!
//! Selects which built-in decoders an [`ImageFactory`](crate::ImageFactory)
//! starts with and in what order they are probed. Deserializable so hosts
//! can ship it as JSON (the WASM bindings take it as a plain JS object).

use serde::{Deserialize, Serialize};

use crate::decode::{GifDecoder, JpegDecoder, PngDecoder};
use crate::registry::DecoderRegistry;

/// Built-in decoder selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderKind {
    Png,
    Jpeg,
    Gif,
}

/// Configuration for building an [`ImageFactory`](crate::ImageFactory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Built-in decoders in probe order. Duplicates are registered twice.
    pub decoders: Vec<DecoderKind>,
    /// Rotate/flip JPEG pixels according to their EXIF orientation.
    pub apply_orientation: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            decoders: vec![DecoderKind::Png, DecoderKind::Jpeg, DecoderKind::Gif],
            apply_orientation: true,
        }
    }
}

impl FactoryConfig {
    /// Configuration with no decoders registered.
    pub fn empty() -> Self {
        Self {
            decoders: Vec::new(),
            ..Self::default()
        }
    }

    /// Build the registry described by this configuration.
    pub fn build_registry(&self) -> DecoderRegistry {
        let mut registry = DecoderRegistry::new();
        for kind in &self.decoders {
            match kind {
                DecoderKind::Png => registry.extend(PngDecoder),
                DecoderKind::Jpeg => registry.extend(if self.apply_orientation {
                    JpegDecoder::new()
                } else {
                    JpegDecoder::without_orientation()
                }),
                DecoderKind::Gif => registry.extend(GifDecoder),
            }
        }
        registry
    }
}
