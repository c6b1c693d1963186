//! Decodex WASM - WebAssembly bindings for Decodex
//!
//! This crate exposes the decodex-core resolution engine to
//! JavaScript/TypeScript applications. Browsers hand over bytes, so only the
//! in-memory entry point is bound.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for decoded frames
//! - `decode` - Factory bindings (configurable decoder chain, byte decoding)
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageFactory } from '@decodex/wasm';
//!
//! await init();
//!
//! const factory = new JsImageFactory({ decoders: ['png', 'gif'] });
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! for (const frame of factory.decode(bytes)) {
//!   console.log(`${frame.width}x${frame.height} (${frame.format})`);
//! }
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod types;

pub use decode::{decode_image, JsImageFactory};
pub use types::JsFrame;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
