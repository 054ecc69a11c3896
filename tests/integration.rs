use coverfit::{
    app::{App, PrintFormat, ResizeRequest},
    geometry::CoverPlan,
    models::{Config, SourceImage, TargetBox},
    preview::PreviewSlot,
    resize::{resize_image, CoverFitResizer, ResizeService},
    Error,
};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    });
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[tokio::test]
async fn test_wide_800x600_into_400x400() {
    let plan = CoverPlan::new((800, 600), (400, 400)).unwrap();
    assert!((plan.scale - 2.0 / 3.0).abs() < 1e-9);
    let window = plan.source_window();
    assert_eq!((window.x, window.width, window.height), (100, 600, 600));
    assert_eq!(plan.dy, 0.0);
    assert!(plan.dx < 0.0);

    let result = resize_image(&png_bytes(800, 600), "image/png", 400, 400)
        .await
        .unwrap();

    assert_eq!((result.width, result.height), (400, 400));
    let decoded = image::load_from_memory(&result.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (400, 400));
}

#[tokio::test]
async fn test_extreme_aspect_with_default_settings() {
    let result = resize_image(&png_bytes(10, 2000), "image/png", 1024, 1024)
        .await
        .unwrap();

    let decoded = image::load_from_memory(&result.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1024, 1024));
}

#[tokio::test]
async fn test_zero_dimensions_reject_before_decode() {
    for (w, h) in [(0, 10), (10, 0), (0, 0)] {
        let err = resize_image(b"not an image", "image/png", w, h)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions(_)), "{}x{}", w, h);
    }
}

#[tokio::test]
async fn test_error_kinds() {
    let err = resize_image(b"not an image", "image/png", 10, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));

    let err = resize_image(&png_bytes(4, 4), "image/x-unknown", 2, 2)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Encode(_)));
}

#[tokio::test]
async fn test_preview_slot_with_real_resizer() {
    let resizer = CoverFitResizer::default();
    let slot = PreviewSlot::new();
    let target = TargetBox::new(16, 16).unwrap();

    let first = slot.select();
    let first_source = SourceImage::new(png_bytes(64, 32), "image/png");
    let second = slot.select();
    let second_source = SourceImage::new(png_bytes(32, 64), "image/png");

    let (a, b) = tokio::join!(
        resizer.resize(&first_source, target),
        resizer.resize(&second_source, target)
    );

    assert!(!slot.complete(first, a.unwrap()));
    assert!(slot.complete(second, b.unwrap()));
    let shown = slot.current().unwrap();
    assert_eq!((shown.width, shown.height), (16, 16));
}

#[tokio::test]
async fn test_data_url_selection_round_trip() {
    let url = coverfit::data_url::encode("image/png", &png_bytes(30, 20));
    let source = SourceImage::from_data_url(&url).unwrap();

    let resized = CoverFitResizer::default()
        .resize(&source, TargetBox::new(10, 10).unwrap())
        .await
        .unwrap();

    let out = App::render(&resized, PrintFormat::DataUrl).unwrap();
    assert!(out.starts_with("data:image/png;base64,"));

    let again = SourceImage::from_data_url(&out).unwrap();
    let decoded = image::load_from_memory(&again.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (10, 10));
}

#[tokio::test]
async fn test_app_end_to_end_with_file_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("portrait.png");
    let output = dir.path().join("cover.png");
    std::fs::write(&input, png_bytes(60, 90)).unwrap();

    let config = Config {
        target_width: 30,
        target_height: 20,
        ..Config::default()
    };
    let app = App::with_config(config);

    let mut request = ResizeRequest::new(&input);
    request.output = Some(output.clone());
    let result = app.run(&request).await.unwrap();

    assert_eq!((result.width, result.height), (30, 20));
    let saved = image::open(&output).unwrap();
    assert_eq!((saved.width(), saved.height()), (30, 20));
}
