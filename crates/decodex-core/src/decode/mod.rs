//! Built-in decoders backed by the `image` crate.
//!
//! Each decoder follows the same protocol:
//!
//! - sniff the leading magic bytes; a short read or foreign signature is a
//!   [`Probe::Declined`](crate::Probe::Declined)
//! - parse the header with the `image` codec; a failure here is a hard
//!   [`DecodeError`] because the format was recognized
//! - return a [`FrameReader`](crate::FrameReader) that seeks back to the
//!   image start and decodes pixels when the first frame is requested
//!
//! # Examples
//!
//! ```ignore
//! use decodex_core::decode::{GifDecoder, JpegDecoder, PngDecoder};
//! use decodex_core::DecoderRegistry;
//!
//! let mut registry = DecoderRegistry::new();
//! registry.extend(PngDecoder);
//! registry.extend(JpegDecoder::new());
//! registry.extend(GifDecoder);
//! ```

mod gif;
mod jpeg;
mod png;

use std::io::{self, Seek, SeekFrom};

use image::ImageError;

use crate::error::DecodeError;
use crate::source::{read_up_to, Source};

pub use gif::GifDecoder;
pub use jpeg::JpegDecoder;
pub use png::PngDecoder;

/// Read up to `N` leading bytes and rewind to where they started.
///
/// Returns the start offset and the bytes actually read, which may be fewer
/// than `N` for short inputs.
pub(crate) fn sniff<const N: usize>(
    source: &mut dyn Source,
) -> io::Result<(u64, [u8; N], usize)> {
    let start = source.stream_position()?;
    let mut magic = [0u8; N];
    let len = read_up_to(source, &mut magic)?;
    source.seek(SeekFrom::Start(start))?;
    Ok((start, magic, len))
}

/// Map an `image` crate error onto a decoder hard error.
pub(crate) fn image_error(format: &'static str, err: ImageError) -> DecodeError {
    match err {
        ImageError::IoError(e) => DecodeError::Io(e),
        other => DecodeError::malformed(format, other.to_string()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_sniff_rewinds() {
        let mut cursor = Cursor::new(b"\0\0GIF89a rest".to_vec());
        cursor.set_position(2);
        let (start, magic, len) = sniff::<6>(&mut cursor).unwrap();
        assert_eq!(start, 2);
        assert_eq!(len, 6);
        assert_eq!(&magic, b"GIF89a");
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_sniff_short_input() {
        let mut cursor = Cursor::new(vec![0x89u8, b'P']);
        let (_, _, len) = sniff::<8>(&mut cursor).unwrap();
        assert_eq!(len, 2);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_image_error_mapping() {
        let io = ImageError::IoError(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert!(matches!(image_error("PNG", io), DecodeError::Io(_)));

        let unsupported = ImageError::Unsupported(
            image::error::UnsupportedError::from_format_and_kind(
                image::error::ImageFormatHint::Unknown,
                image::error::UnsupportedErrorKind::GenericFeature("x".into()),
            ),
        );
        assert!(matches!(
            image_error("PNG", unsupported),
            DecodeError::Malformed { format: "PNG", .. }
        ));
    }

    #[test]
    fn test_fixtures_carry_magic() {
        assert_eq!(
            crate::ImageFormat::from_magic(&fixtures::png(2, 2)),
            Some(crate::ImageFormat::Png)
        );
        assert_eq!(
            crate::ImageFormat::from_magic(&fixtures::jpeg(2, 2)),
            Some(crate::ImageFormat::Jpeg)
        );
        assert_eq!(
            crate::ImageFormat::from_magic(&fixtures::gif(2, 2, 2)),
            Some(crate::ImageFormat::Gif)
        );
    }
}
