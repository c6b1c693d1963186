//! Decodex Core - decoder resolution engine
//!
//! This crate turns an unknown blob (a file, an open stream or an in-memory
//! buffer) into decoded image frames by probing an ordered chain of
//! format-specific decoders and taking the first one that claims the data.
//!
//! # Architecture
//!
//! - [`DecoderRegistry`] - append-only, insertion-ordered list of [`Decoder`]s
//! - [`ImageFactory`] - validates the source, rewinds it before every probe
//!   and returns the first match as a [`Frames`] sequence
//! - [`decode`] - built-in PNG, JPEG and GIF decoders over the `image` crate
//!
//! All operations are synchronous and single-threaded. A decoder answers a
//! probe with [`Probe::Matched`], [`Probe::Declined`] or a hard
//! [`DecodeError`]; only a decline moves resolution on to the next decoder.
//!
//! # Examples
//!
//! ```ignore
//! use decodex_core::ImageFactory;
//!
//! let factory = ImageFactory::with_defaults();
//! for frame in factory.resolve_path("animation.gif")? {
//!     let frame = frame?;
//!     println!("{}x{} {:?}", frame.width, frame.height, frame.metadata.delay);
//! }
//! ```

pub mod config;
pub mod decode;
pub mod error;
pub mod factory;
pub mod frame;
pub mod registry;
pub mod sequence;
pub mod source;

pub use config::{DecoderKind, FactoryConfig};
pub use error::{DecodeError, ResolveError};
pub use factory::ImageFactory;
pub use frame::{Frame, FrameMetadata, ImageFormat, Orientation};
pub use registry::{Decoder, DecoderRegistry, Probe};
pub use sequence::{FrameReader, Frames, ReadyFrames};
pub use source::Source;
