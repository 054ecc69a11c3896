//! MIME type handling for source and output images

use crate::{Error, Result};
use image::ImageFormat;
use std::path::Path;

pub fn detect_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        [0x47, 0x49, 0x46, 0x38, ..] => "image/gif",
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => "image/webp",
        [0x42, 0x4D, ..] => "image/bmp",
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => "image/tiff",
        _ => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), falling back to image/png",
                &bytes[..bytes.len().min(4)]
            );
            "image/png"
        }
    }
}

/// MIME type for a file on disk: the extension wins, the content is sniffed otherwise.
pub fn mime_for_path(path: &Path, bytes: &[u8]) -> &'static str {
    match ImageFormat::from_path(path) {
        Ok(format) => format.to_mime_type(),
        Err(_) => detect_image_mime(bytes),
    }
}

/// Resolve the format an image of type `mime` has to be re-encoded in.
///
/// Parameters after `;` are ignored and the common `image/jpg` alias is
/// accepted. A type the image codecs do not know cannot be encoded, so it is
/// reported as [`Error::Encode`].
pub fn format_for_mime(mime: &str) -> Result<ImageFormat> {
    let essence = mime
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    let essence = match essence.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg",
        other => other,
    };

    ImageFormat::from_mime_type(essence)
        .ok_or_else(|| Error::Encode(format!("unsupported MIME type '{}'", mime)))
}

/// Whether the encoder for `format` accepts an alpha channel.
pub fn supports_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg | ImageFormat::Pnm | ImageFormat::Farbfeld)
}
