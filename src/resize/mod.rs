//! Cover-fit resizing
//!
//! Decodes a source image, scales it uniformly until it covers the target
//! box, crops the centered window and re-encodes it in the source format.

pub mod mock;
pub mod processor;

pub use mock::MockResizer;
pub use processor::CoverFitResizer;

use crate::models::{ResizedImage, SourceImage, TargetBox};
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ResizeService: Send + Sync {
    async fn resize(&self, source: &SourceImage, target: TargetBox) -> Result<ResizedImage>;
}

/// Resize `bytes` of type `mime` to exactly `width × height` with default settings.
///
/// Zero dimensions are rejected before the bytes are looked at.
pub async fn resize_image(
    bytes: &[u8],
    mime: &str,
    width: u32,
    height: u32,
) -> Result<ResizedImage> {
    let target = TargetBox::new(width, height)?;
    let source = SourceImage::new(bytes.to_vec(), mime);
    CoverFitResizer::default().resize(&source, target).await
}
