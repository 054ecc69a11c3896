use super::ResizeService;
use crate::models::{ResizedImage, SourceImage, TargetBox};
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct MockResizer {
    call_count: Arc<Mutex<usize>>,
    targets: Arc<Mutex<Vec<TargetBox>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockResizer {
    pub fn new() -> Self {
        Self {
            call_count: Arc::new(Mutex::new(0)),
            targets: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_targets(&self) -> Vec<TargetBox> {
        self.targets.lock().unwrap().clone()
    }
}

impl Default for MockResizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResizeService for MockResizer {
    async fn resize(&self, source: &SourceImage, target: TargetBox) -> Result<ResizedImage> {
        *self.call_count.lock().unwrap() += 1;
        self.targets.lock().unwrap().push(target);

        if *self.should_fail.lock().unwrap() {
            return Err(crate::Error::Decode("Mock failure".to_string()));
        }

        // Echo the source bytes back with the requested size
        Ok(ResizedImage {
            bytes: source.bytes.clone(),
            mime: source.mime.clone(),
            width: target.width(),
            height: target.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_resizer() {
        let resizer = MockResizer::new();
        let source = SourceImage::new(b"fake image data".to_vec(), "image/png");

        let result = resizer
            .resize(&source, TargetBox::new(20, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(result.bytes, b"fake image data");
        assert_eq!((result.width, result.height), (20, 10));
        assert_eq!(resizer.get_call_count(), 1);
        assert_eq!(resizer.get_targets(), vec![TargetBox::new(20, 10).unwrap()]);
    }

    #[tokio::test]
    async fn test_mock_with_failure() {
        let resizer = MockResizer::new().with_failure(true);
        let source = SourceImage::new(b"data".to_vec(), "image/png");

        let result = resizer.resize(&source, TargetBox::new(1, 1).unwrap()).await;
        assert!(result.is_err());
        assert_eq!(resizer.get_call_count(), 1);
    }
}
