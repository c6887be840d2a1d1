use anyhow::Result;
use std::sync::Arc;

use crate::services::{CalorieEstimator, UploadStore};

/// Stores an uploaded image and asks the estimator about it.
pub struct UploadHandler {
    store: Arc<UploadStore>,
    estimator: Arc<dyn CalorieEstimator>,
}

impl UploadHandler {
    pub fn new(store: Arc<UploadStore>, estimator: Arc<dyn CalorieEstimator>) -> Self {
        Self { store, estimator }
    }

    /// Returns the estimation result text. Only a storage failure is an `Err`;
    /// estimation problems come back as `Error: ...` strings.
    pub async fn handle(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        log::info!(
            "📨 INCOMING UPLOAD - Name: '{}' | Size: {} bytes",
            original_name,
            bytes.len()
        );

        let stored = self.store.save(original_name, bytes).await?;
        let calories = self.estimator.estimate(&stored.path).await;

        log::info!(
            "✅ Estimation finished for '{}' ({})",
            stored.original_name,
            stored.path.display()
        );
        Ok(calories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingEstimator {
        paths: Mutex<Vec<PathBuf>>,
    }

    #[async_trait::async_trait]
    impl CalorieEstimator for RecordingEstimator {
        async fn estimate(&self, image_path: &Path) -> String {
            self.paths.lock().unwrap().push(image_path.to_path_buf());
            let bytes = std::fs::read(image_path).unwrap();
            format!("{} bytes of food", bytes.len())
        }
    }

    #[tokio::test]
    async fn test_handle_stores_then_estimates() {
        let root = tempfile::tempdir().unwrap();
        let store = Arc::new(UploadStore::new(root.path()).unwrap());
        let estimator = Arc::new(RecordingEstimator::default());
        let handler = UploadHandler::new(store, estimator.clone());

        let result = handler.handle("burger.jpg", b"12345").await.unwrap();

        assert_eq!(result, "5 bytes of food");
        let paths = estimator.paths.lock().unwrap();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].starts_with(root.path()));
    }

    #[tokio::test]
    async fn test_handle_fails_when_directory_is_gone() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("uploads");
        let store = Arc::new(UploadStore::new(&dir).unwrap());
        std::fs::remove_dir(&dir).unwrap();

        let estimator = Arc::new(RecordingEstimator::default());
        let handler = UploadHandler::new(store, estimator.clone());

        assert!(handler.handle("burger.jpg", b"12345").await.is_err());
        assert!(estimator.paths.lock().unwrap().is_empty());
    }
}
