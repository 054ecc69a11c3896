//! Data models and configuration
//!
//! Defines the source/target/result types flowing through a resize call and
//! the environment-driven configuration of the resizer.

use image::imageops::FilterType;
use serde::Serialize;

use crate::{Error, Result};

/// Encoded image bytes as selected by the user.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub name: Option<String>,
}

impl SourceImage {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            bytes,
            mime: mime.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Output dimensions of a resize. Both extents are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetBox {
    width: u32,
    height: u32,
}

impl TargetBox {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions(format!(
                "target box {}x{} has zero area",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_tuple(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl TryFrom<(i64, i64)> for TargetBox {
    type Error = Error;

    fn try_from((width, height): (i64, i64)) -> Result<Self> {
        let convert = |value: i64| {
            u32::try_from(value).map_err(|_| {
                Error::InvalidDimensions(format!(
                    "target box {}x{} is out of range",
                    width, height
                ))
            })
        };
        Self::new(convert(width)?, convert(height)?)
    }
}

/// Re-encoded cover-fit result. Dimensions always equal the requested box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
    pub width: u32,
    pub height: u32,
}

/// JSON shape handed to a display surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime: String,
    pub width: u32,
    pub height: u32,
    pub byte_length: usize,
    pub data_url: String,
}

impl From<&ResizedImage> for ImagePayload {
    fn from(image: &ResizedImage) -> Self {
        Self {
            mime: image.mime.clone(),
            width: image.width,
            height: image.height,
            byte_length: image.bytes.len(),
            data_url: image.to_data_url(),
        }
    }
}

// Configuration
pub const DEFAULT_TARGET_WIDTH: u32 = 1024;
pub const DEFAULT_TARGET_HEIGHT: u32 = 1024;
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub target_width: u32,
    pub target_height: u32,
    pub filter: FilterType,
    /// Upper bound on the pixel count of any surface allocated by a resize.
    pub max_pixels: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: DEFAULT_TARGET_HEIGHT,
            filter: FilterType::Lanczos3,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let target_width = match lookup("COVERFIT_TARGET_WIDTH") {
            Some(value) => parse_number("COVERFIT_TARGET_WIDTH", &value)?,
            None => defaults.target_width,
        };
        let target_height = match lookup("COVERFIT_TARGET_HEIGHT") {
            Some(value) => parse_number("COVERFIT_TARGET_HEIGHT", &value)?,
            None => defaults.target_height,
        };
        let filter = match lookup("COVERFIT_FILTER") {
            Some(value) => parse_filter(&value)?,
            None => defaults.filter,
        };
        let max_pixels = match lookup("COVERFIT_MAX_PIXELS") {
            Some(value) => parse_number("COVERFIT_MAX_PIXELS", &value)?,
            None => defaults.max_pixels,
        };

        Ok(Self {
            target_width,
            target_height,
            filter,
            max_pixels,
        })
    }

    pub fn target(&self) -> Result<TargetBox> {
        TargetBox::new(self.target_width, self.target_height)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} must be a positive integer, got '{}'", key, value)))
}

pub fn parse_filter(value: &str) -> Result<FilterType> {
    match value.trim().to_ascii_lowercase().as_str() {
        "nearest" => Ok(FilterType::Nearest),
        "triangle" | "bilinear" => Ok(FilterType::Triangle),
        "catmullrom" | "bicubic" => Ok(FilterType::CatmullRom),
        "gaussian" => Ok(FilterType::Gaussian),
        "lanczos3" => Ok(FilterType::Lanczos3),
        other => Err(Error::Config(format!("Unknown resize filter '{}'", other))),
    }
}
