use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// A file written by [`UploadStore::save`].
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub path: PathBuf,
    pub original_name: String,
}

/// Local directory holding uploaded images. Files are never pruned.
pub struct UploadStore {
    dir: PathBuf,
    sequence: AtomicU64,
}

impl UploadStore {
    /// Open the upload directory, creating it if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create upload directory {}", dir.display()))?;

        Ok(Self {
            dir,
            sequence: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` under a fresh storage key derived from the client's
    /// file name. The client name never selects the directory.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<StoredUpload> {
        let key = self.storage_key(original_name);
        let path = self.dir.join(&key);

        log::info!("💾 Writing {} bytes to: {}", bytes.len(), path.display());
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write upload {}", path.display()))?;

        Ok(StoredUpload {
            path,
            original_name: original_name.to_string(),
        })
    }

    fn storage_key(&self, original_name: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            seq,
            sanitize_file_name(original_name)
        )
    }
}

/// Keep only the last path component and a conservative character set.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.chars().all(|c| c == '.') {
        "upload".to_string()
    } else {
        cleaned
    }
}
