use super::ResizeService;
use crate::geometry::CoverPlan;
use crate::mime::{format_for_mime, supports_alpha};
use crate::models::{Config, ResizedImage, SourceImage, TargetBox, DEFAULT_MAX_PIXELS};
use crate::{Error, Result};
use async_trait::async_trait;
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader};
use std::io::Cursor;
use tracing::{debug, info};

pub struct CoverFitResizer {
    filter: FilterType,
    max_pixels: u64,
}

impl Default for CoverFitResizer {
    fn default() -> Self {
        Self {
            filter: FilterType::Lanczos3,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl CoverFitResizer {
    pub fn new(config: &Config) -> Self {
        Self {
            filter: config.filter,
            max_pixels: config.max_pixels,
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    fn check_surface(&self, (width, height): (u32, u32)) -> Result<()> {
        let pixels = width as u64 * height as u64;
        if pixels > self.max_pixels {
            return Err(Error::Surface(format!(
                "Output surface {}x{} exceeds the {} pixel budget",
                width, height, self.max_pixels
            )));
        }
        Ok(())
    }

    fn open_decoder(bytes: &[u8]) -> Result<impl ImageDecoder + '_> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| Error::Decode(format!("Failed to read image header: {}", e)))?
            .into_decoder()
            .map_err(|e| Error::Decode(format!("Failed to read image header: {}", e)))
    }

    /// Displayed dimensions: stored size with the EXIF orientation applied.
    fn read_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
        let mut decoder = Self::open_decoder(bytes)?;
        let (width, height) = decoder.dimensions();
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        Ok(if swaps_axes(orientation) {
            (height, width)
        } else {
            (width, height)
        })
    }

    fn decode_sync(bytes: &[u8]) -> Result<DynamicImage> {
        let mut decoder = Self::open_decoder(bytes)?;
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        let mut image =
            DynamicImage::from_decoder(decoder).map_err(|e| Error::Decode(e.to_string()))?;
        image.apply_orientation(orientation);
        Ok(image)
    }

    /// Produce a surface of exactly the target size.
    ///
    /// Only the part of the source that stays visible is scaled, so no
    /// buffer larger than the source or the target is ever allocated.
    fn render_sync(image: DynamicImage, plan: &CoverPlan, filter: FilterType) -> DynamicImage {
        if plan.is_identity() {
            return image;
        }

        let window = plan.source_window();
        let visible = if window.is_full((image.width(), image.height())) {
            image
        } else {
            image.crop_imm(window.x, window.y, window.width, window.height)
        };

        if (visible.width(), visible.height()) == (plan.target_width, plan.target_height) {
            visible
        } else {
            visible.resize_exact(plan.target_width, plan.target_height, filter)
        }
    }

    fn encode_sync(image: DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        let image = if supports_alpha(format) {
            image
        } else {
            match image {
                DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
                other => DynamicImage::ImageRgb8(other.to_rgb8()),
            }
        };

        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), format)
            .map_err(|e| Error::Encode(format!("{:?}: {}", format, e)))?;
        Ok(bytes)
    }
}

fn swaps_axes(orientation: Orientation) -> bool {
    matches!(
        orientation,
        Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Rotate90FlipH
            | Orientation::Rotate270FlipH
    )
}

#[async_trait]
impl ResizeService for CoverFitResizer {
    async fn resize(&self, source: &SourceImage, target: TargetBox) -> Result<ResizedImage> {
        let format = format_for_mime(&source.mime)?;
        self.check_surface(target.as_tuple())?;

        let bytes = source.bytes.clone();
        let (dimensions, bytes) = tokio::task::spawn_blocking(move || {
            let dimensions = Self::read_dimensions(&bytes);
            (dimensions, bytes)
        })
        .await?;
        let dimensions = dimensions?;

        let plan = CoverPlan::new(dimensions, target.as_tuple())?;
        debug!(
            "Cover plan {}x{} -> {}x{}: scale {:.4}, offset ({:.2}, {:.2})",
            plan.source_width,
            plan.source_height,
            plan.target_width,
            plan.target_height,
            plan.scale,
            plan.dx,
            plan.dy
        );

        let decoded = tokio::task::spawn_blocking(move || Self::decode_sync(&bytes)).await??;
        if (decoded.width(), decoded.height()) != dimensions {
            return Err(Error::Decode(format!(
                "decoded size {}x{} differs from header {}x{}",
                decoded.width(),
                decoded.height(),
                dimensions.0,
                dimensions.1
            )));
        }

        let filter = self.filter;
        let encoded = tokio::task::spawn_blocking(move || {
            let surface = Self::render_sync(decoded, &plan, filter);
            Self::encode_sync(surface, format)
        })
        .await??;

        info!(
            "Resized {} ({} bytes) to {}x{} ({} bytes)",
            source.name.as_deref().unwrap_or("image"),
            source.bytes.len(),
            target.width(),
            target.height(),
            encoded.len()
        );

        Ok(ResizedImage {
            bytes: encoded,
            mime: format.to_mime_type().to_string(),
            width: target.width(),
            height: target.height(),
        })
    }
}
