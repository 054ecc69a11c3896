use anyhow::Result;
use clap::Parser;
use coverfit::app::{App, PrintFormat, ResizeRequest};
use coverfit::models::{parse_filter, Config};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "coverfit")]
#[command(about = "Resize an image to fill a box exactly, cropping the overflow")]
struct CliArgs {
    /// Image file to resize.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Target width in pixels (default: COVERFIT_TARGET_WIDTH or 1024).
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Target height in pixels (default: COVERFIT_TARGET_HEIGHT or 1024).
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// MIME type of the input; derived from the extension or content when omitted.
    #[arg(long)]
    mime: Option<String>,

    /// Resampling filter: nearest, triangle, catmullrom, gaussian or lanczos3.
    #[arg(long, value_parser = parse_filter_arg)]
    filter: Option<image::imageops::FilterType>,

    /// Write the resized image here instead of printing it.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// What to print on stdout when no output file is given.
    #[arg(long, value_enum, default_value = "data-url")]
    print: PrintFormat,
}

fn parse_filter_arg(input: &str) -> std::result::Result<image::imageops::FilterType, String> {
    parse_filter(input).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the result, logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coverfit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(filter) = args.filter {
        config.filter = filter;
    }
    let app = App::with_config(config);

    let request = ResizeRequest {
        input: args.input,
        width: args.width,
        height: args.height,
        mime: args.mime,
        output: args.output,
    };

    match app.run(&request).await {
        Ok(resized) => {
            if request.output.is_none() {
                println!("{}", App::render(&resized, args.print)?);
            }
            info!(
                "Resize completed: {}x{} {}",
                resized.width, resized.height, resized.mime
            );
            Ok(())
        }
        Err(e) => {
            error!("Resize failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_arg_valid() {
        assert_eq!(
            parse_filter_arg("lanczos3").unwrap(),
            image::imageops::FilterType::Lanczos3
        );
    }

    #[test]
    fn test_parse_filter_arg_invalid() {
        let err = parse_filter_arg("sinc").unwrap_err();
        assert!(err.contains("sinc"));
    }

    #[test]
    fn test_cli_parses_dimensions() {
        let args = CliArgs::parse_from([
            "coverfit", "in.png", "--width", "400", "--height", "300", "-o", "out.png",
        ]);
        assert_eq!(args.width, Some(400));
        assert_eq!(args.height, Some(300));
        assert_eq!(args.output, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn test_cli_print_format() {
        let args = CliArgs::parse_from(["coverfit", "in.png"]);
        assert_eq!(args.print, PrintFormat::DataUrl);

        let args = CliArgs::parse_from(["coverfit", "in.png", "--print", "json"]);
        assert_eq!(args.print, PrintFormat::Json);
    }

    #[test]
    fn test_cli_accepts_negative_dimensions_for_validation() {
        let args = CliArgs::parse_from(["coverfit", "in.png", "--width", "-5"]);
        assert_eq!(args.width, Some(-5));
    }
}
