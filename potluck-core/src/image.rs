//! Image pipeline for stored recipe pictures.
//!
//! Pictures arrive base64-encoded over the wire, get transcoded to WebP at a
//! fixed width, and are kept in the store as a zlib stream. Reads reverse the
//! compression only; the WebP bytes are served as-is.

use std::io::{Cursor, Read, Write};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::{GenericImageView, ImageFormat, ImageReader};

use crate::error::ImageError;

/// Stored pictures are scaled to this width, preserving aspect ratio.
pub const STORED_IMAGE_WIDTH: u32 = 640;

/// What a mutation wants done with the stored picture.
///
/// The wire form is an optional string: absent means leave the picture alone,
/// empty means drop it, anything else is base64 image data. `from_transport`
/// is the single place that mapping happens.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePatch {
    Unchanged,
    Clear,
    Set(Vec<u8>),
}

impl ImagePatch {
    pub fn from_transport(image: Option<&str>) -> Result<Self, ImageError> {
        match image {
            None => Ok(Self::Unchanged),
            Some("") => Ok(Self::Clear),
            Some(encoded) => Ok(Self::Set(BASE64.decode(encoded)?)),
        }
    }
}

/// Transcode raw image bytes into the stored form: WebP at
/// [`STORED_IMAGE_WIDTH`], zlib-compressed.
pub fn transcode_for_storage(raw: &[u8]) -> Result<Vec<u8>, ImageError> {
    let img = ImageReader::new(Cursor::new(raw))
        .with_guessed_format()?
        .decode()?;

    let (width, height) = img.dimensions();
    let scaled = if width == STORED_IMAGE_WIDTH {
        img
    } else {
        let scaled_height =
            (u64::from(height) * u64::from(STORED_IMAGE_WIDTH) / u64::from(width)).max(1) as u32;
        img.resize_exact(
            STORED_IMAGE_WIDTH,
            scaled_height,
            image::imageops::FilterType::Lanczos3,
        )
    };

    let mut webp = Cursor::new(Vec::new());
    scaled.write_to(&mut webp, ImageFormat::WebP)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(webp.get_ref())?;
    Ok(encoder.finish()?)
}

/// Decompress a stored picture blob back into the WebP bytes.
pub fn decompress_stored(blob: &[u8]) -> Result<Vec<u8>, ImageError> {
    let mut decoder = ZlibDecoder::new(blob);
    let mut webp = Vec::new();
    decoder.read_to_end(&mut webp)?;
    Ok(webp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn transcode_produces_webp_at_fixed_width() {
        let stored = transcode_for_storage(&sample_png(32, 16)).unwrap();
        let webp = decompress_stored(&stored).unwrap();

        let reader = ImageReader::new(Cursor::new(&webp))
            .with_guessed_format()
            .unwrap();
        assert_eq!(reader.format(), Some(ImageFormat::WebP));

        let decoded = reader.decode().unwrap();
        assert_eq!(decoded.dimensions(), (640, 320));
    }

    #[test]
    fn transcode_rejects_garbage() {
        assert!(transcode_for_storage(b"not an image").is_err());
    }

    #[test]
    fn decompress_roundtrips_zlib() {
        let payload = b"webp bytes stand-in";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        let blob = encoder.finish().unwrap();

        assert_eq!(decompress_stored(&blob).unwrap(), payload);
    }

    #[test]
    fn patch_from_absent_is_unchanged() {
        assert_eq!(
            ImagePatch::from_transport(None).unwrap(),
            ImagePatch::Unchanged
        );
    }

    #[test]
    fn patch_from_empty_is_clear() {
        assert_eq!(
            ImagePatch::from_transport(Some("")).unwrap(),
            ImagePatch::Clear
        );
    }

    #[test]
    fn patch_from_encoded_is_set() {
        let encoded = BASE64.encode(b"raw bytes");
        assert_eq!(
            ImagePatch::from_transport(Some(&encoded)).unwrap(),
            ImagePatch::Set(b"raw bytes".to_vec())
        );
    }

    #[test]
    fn patch_from_bad_encoding_fails() {
        assert!(ImagePatch::from_transport(Some("%%%not base64%%%")).is_err());
    }
}
