//! Local filesystem upload storage.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::debug;

use bizhub_core::config::UploadConfig;
use bizhub_core::error::{AppError, ErrorKind};
use bizhub_core::result::AppResult;

/// A stored upload and the public URL it is served under.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredFile {
    /// Path relative to the upload root, e.g. `avatars/1693244400-me.png`.
    pub path: String,
    /// URL the file is reachable at.
    pub url: String,
    /// Stored size in bytes.
    pub size: u64,
}

/// Stores uploaded files on the local filesystem.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Root directory for all uploads.
    root: PathBuf,
    /// Largest accepted upload.
    max_size_bytes: u64,
    /// Public base path uploads are served under.
    public_base: String,
}

impl UploadService {
    /// Create a new upload service rooted at the configured directory.
    pub async fn new(config: &UploadConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to create upload root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            max_size_bytes: config.max_size_bytes,
            public_base: config.public_base.trim_end_matches('/').to_string(),
        })
    }

    /// Stores an avatar image, named `avatars/{timestamp}-{filename}`.
    pub async fn store_avatar(&self, filename: &str, data: &[u8]) -> AppResult<StoredFile> {
        let name = sanitize_filename(filename);
        let relative = format!("avatars/{}-{}", Utc::now().timestamp(), name);
        self.store(&relative, data).await
    }

    /// Writes data under the given relative path, enforcing the size limit.
    async fn store(&self, relative: &str, data: &[u8]) -> AppResult<StoredFile> {
        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if data.len() as u64 > self.max_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds the maximum size of {} bytes",
                self.max_size_bytes
            )));
        }

        let full_path = self.root.join(relative);
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Internal,
                format!("Failed to write file: {relative}"),
                e,
            )
        })?;

        debug!(path = relative, bytes = data.len(), "Stored upload");
        Ok(StoredFile {
            path: relative.to_string(),
            url: format!("{}/{}", self.public_base, relative),
            size: data.len() as u64,
        })
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

/// Strip path separators and control characters from a client filename.
fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(root: &Path) -> UploadConfig {
        UploadConfig {
            root: root.to_string_lossy().into_owned(),
            max_size_bytes: 16,
            public_base: "/uploads".into(),
        }
    }

    #[test]
    fn test_sanitize_filename_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_filename("me.png"), "me.png");
        assert_eq!(sanitize_filename("///"), "file");
    }

    #[tokio::test]
    async fn test_store_avatar_writes_file_and_builds_url() {
        let dir = std::env::temp_dir().join(format!("bizhub-upload-{}", uuid::Uuid::new_v4()));
        let service = UploadService::new(&config(&dir)).await.unwrap();

        let stored = service.store_avatar("me.png", b"imagebytes").await.unwrap();
        assert!(stored.path.starts_with("avatars/"));
        assert!(stored.path.ends_with("-me.png"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.path));

        let on_disk = tokio::fs::read(dir.join(&stored.path)).await.unwrap();
        assert_eq!(on_disk, b"imagebytes");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let dir = std::env::temp_dir().join(format!("bizhub-upload-{}", uuid::Uuid::new_v4()));
        let service = UploadService::new(&config(&dir)).await.unwrap();

        let err = service
            .store_avatar("big.png", &[0u8; 32])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
