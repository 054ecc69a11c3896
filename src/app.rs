//! Application orchestration for resizing one selected file.

use crate::mime::mime_for_path;
use crate::models::{Config, ImagePayload, ResizedImage, SourceImage, TargetBox};
use crate::resize::{CoverFitResizer, ResizeService};
use crate::{Error, Result};
use clap::ValueEnum;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// How a finished resize is handed back when no output file is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    /// `data:<mime>;base64,...`
    DataUrl,
    /// JSON object with mime, size and data URL
    Json,
}

/// One user selection: the file plus the requested box.
#[derive(Debug, Clone)]
pub struct ResizeRequest {
    pub input: PathBuf,
    pub width: Option<i64>,
    pub height: Option<i64>,
    /// Overrides the MIME type derived from the file.
    pub mime: Option<String>,
    pub output: Option<PathBuf>,
}

impl ResizeRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            width: None,
            height: None,
            mime: None,
            output: None,
        }
    }
}

/// Loads a selected file, cover-fits it and delivers the result.
pub struct App {
    resizer: Box<dyn ResizeService>,
    config: Config,
}

impl App {
    /// Build an app from a concrete resizer, e.g. a mock in tests.
    pub fn with_services(resizer: Box<dyn ResizeService>, config: Config) -> Self {
        Self { resizer, config }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        info!(
            "Default target {}x{}, filter {:?}",
            config.target_width, config.target_height, config.filter
        );
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        let resizer = Box::new(CoverFitResizer::new(&config));
        Self::with_services(resizer, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Requested dimensions, falling back to the configured defaults.
    pub fn target_for(&self, request: &ResizeRequest) -> Result<TargetBox> {
        let width = request
            .width
            .unwrap_or_else(|| i64::from(self.config.target_width));
        let height = request
            .height
            .unwrap_or_else(|| i64::from(self.config.target_height));
        TargetBox::try_from((width, height))
    }

    pub async fn load_source(&self, path: &Path, mime: Option<&str>) -> Result<SourceImage> {
        let bytes = tokio::fs::read(path).await?;
        let mime = match mime {
            Some(mime) => mime.to_string(),
            None => mime_for_path(path, &bytes).to_string(),
        };
        info!(
            "Loaded {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime
        );

        let source = SourceImage::new(bytes, mime);
        Ok(match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => source.with_name(name),
            None => source,
        })
    }

    /// Resize the requested file and write it to `request.output` if set.
    pub async fn run(&self, request: &ResizeRequest) -> Result<ResizedImage> {
        // Dimensions are checked before the file is even read
        let target = self.target_for(request)?;

        let source = self
            .load_source(&request.input, request.mime.as_deref())
            .await?;

        let resized = match self.resizer.resize(&source, target).await {
            Ok(resized) => resized,
            Err(e) => {
                error!("Failed to resize {}: {}", request.input.display(), e);
                return Err(e);
            }
        };

        if let Some(output) = &request.output {
            self.write_output(&resized, output).await?;
        }

        Ok(resized)
    }

    async fn write_output(&self, image: &ResizedImage, path: &Path) -> Result<()> {
        if let Ok(format) = ImageFormat::from_path(path) {
            if format.to_mime_type() != image.mime {
                warn!(
                    "Output {} has a {:?} extension but contains {}",
                    path.display(),
                    format,
                    image.mime
                );
            }
        }

        tokio::fs::write(path, &image.bytes).await?;
        info!("Saved resized image at: {}", path.display());
        Ok(())
    }

    pub fn render(image: &ResizedImage, format: PrintFormat) -> Result<String> {
        match format {
            PrintFormat::DataUrl => Ok(image.to_data_url()),
            PrintFormat::Json => serde_json::to_string_pretty(&ImagePayload::from(image))
                .map_err(Error::from),
        }
    }
}
