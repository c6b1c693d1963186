//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`JsImageFactory`] - factory with a configurable decoder chain
//! - [`decode_image`] - one-shot decode with the default chain (PNG, JPEG, GIF)
//!
//! # Example
//!
//! ```typescript
//! import { JsImageFactory, decode_image } from '@decodex/wasm';
//!
//! const frames = decode_image(bytes);
//!
//! const gifOnly = new JsImageFactory({ decoders: ['gif'] });
//! console.log(gifOnly.decoders()); // ["GIF"]
//! ```

use decodex_core::{FactoryConfig, ImageFactory, ResolveError};
use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::types::JsFrame;

/// Decoder-resolution factory for JavaScript.
#[wasm_bindgen]
pub struct JsImageFactory {
    inner: ImageFactory,
}

#[wasm_bindgen]
impl JsImageFactory {
    /// Create a factory.
    ///
    /// # Arguments
    /// * `config` - Optional `{ decoders?: ("png"|"jpeg"|"gif")[], apply_orientation?: boolean }`
    ///
    /// # Errors
    /// Returns error if the config object cannot be deserialized
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsImageFactory, JsValue> {
        let config: FactoryConfig = if config.is_undefined() || config.is_null() {
            FactoryConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid factory config: {}", e)))?
        };
        Ok(Self::from_config(&config))
    }

    /// Names of the registered decoders in probe order.
    pub fn decoders(&self) -> Vec<String> {
        self.inner
            .registry()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Decode an image, returning an array of `JsFrame`.
    ///
    /// # Errors
    /// Returns an error string if no decoder recognizes the bytes or the
    /// recognized image is corrupted.
    pub fn decode(&self, bytes: &[u8]) -> Result<Array, JsValue> {
        let frames = decode_frames(&self.inner, bytes).map_err(|e| JsValue::from_str(&e))?;
        Ok(frames.into_iter().map(JsValue::from).collect())
    }
}

impl JsImageFactory {
    pub(crate) fn from_config(config: &FactoryConfig) -> Self {
        Self {
            inner: ImageFactory::from_config(config),
        }
    }
}

/// Decode an image with the default decoder chain.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<Array, JsValue> {
    JsImageFactory::from_config(&FactoryConfig::default()).decode(bytes)
}

/// Resolve and drain `bytes` into JS frame wrappers.
fn decode_frames(factory: &ImageFactory, bytes: &[u8]) -> Result<Vec<JsFrame>, String> {
    factory
        .resolve_bytes(bytes)
        .and_then(|frames| {
            frames
                .map(|frame| frame.map(JsFrame::from_frame).map_err(ResolveError::from))
                .collect()
        })
        .map_err(|e| e.to_string())
}
