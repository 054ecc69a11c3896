//! `data:` URL encoding for display surfaces
//!
//! Results are handed out as `data:<mime>;base64,<payload>` strings, and
//! selections arriving in the same shape can be turned back into a
//! [`SourceImage`].

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::models::{ResizedImage, SourceImage};
use crate::{Error, Result};

pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Split a base64 image data URL into its MIME type and decoded payload.
pub fn decode(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| Error::Decode("not a data URL".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::Decode("data URL has no payload separator".to_string()))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(Error::Decode(format!(
            "data URL carries '{}', expected an image type",
            mime
        )));
    }
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(Error::Decode(
            "only base64 data URLs are supported".to_string(),
        ));
    }

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::Decode(format!("invalid base64 payload: {}", e)))?;

    Ok((mime, bytes))
}

impl ResizedImage {
    pub fn to_data_url(&self) -> String {
        encode(&self.mime, &self.bytes)
    }
}

impl SourceImage {
    pub fn from_data_url(url: &str) -> Result<Self> {
        let (mime, bytes) = decode(url)?;
        Ok(Self::new(bytes, mime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode() {
        assert_eq!(encode("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_source_from_data_url() {
        let source = SourceImage::from_data_url("data:image/jpeg;base64,/9j/").unwrap();
        assert_eq!(source.mime, "image/jpeg");
        assert_eq!(source.bytes, vec![0xFF, 0xD8, 0xFF]);
        assert!(source.name.is_none());
    }

    #[test]
    fn test_resized_image_data_url_parses_back() {
        let image = ResizedImage {
            bytes: vec![0x89, 0x50, 0x4E, 0x47, 0x00],
            mime: "image/png".to_string(),
            width: 1,
            height: 1,
        };

        let (mime, bytes) = decode(&image.to_data_url()).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, image.bytes);
    }

    #[test]
    fn test_rejects_non_data_url() {
        let err = decode("https://example.com/a.png").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_rejects_non_image_type() {
        let err = decode("data:text/plain;base64,aGk=").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_rejects_percent_encoded_payload() {
        let err = decode("data:image/svg+xml,%3Csvg%3E").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_rejects_bad_base64() {
        let err = decode("data:image/png;base64,***").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
