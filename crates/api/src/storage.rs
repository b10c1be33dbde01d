//! File stores for uploaded photos and documents.
//!
//! [`LocalStore`] writes under the configured upload directory, which the
//! router serves back under the upload URL prefix. [`CdnStore`] sends images
//! to a Cloudinary-compatible CDN using an unsigned upload preset.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::CdnConfig;

/// HTTP request timeout for a single CDN upload.
const CDN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for file store failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the local upload directory failed.
    #[error("File storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CDN request failed (network, DNS, timeout, etc.).
    #[error("CDN request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The CDN returned a non-2xx status code.
    #[error("CDN returned HTTP {0}")]
    HttpStatus(u16),

    /// The CDN answered 2xx but without a usable body.
    #[error("Unexpected CDN response: {0}")]
    InvalidResponse(String),
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Somewhere uploaded files can be written and later removed.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store `bytes` as `folder/filename` and return the public URL.
    async fn save(
        &self,
        folder: &str,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Remove a previously stored file by its public URL.
    ///
    /// Returns `false` when the URL does not belong to this store or the
    /// file is already gone.
    async fn delete(&self, url: &str) -> Result<bool, StorageError>;
}

// ---------------------------------------------------------------------------
// LocalStore
// ---------------------------------------------------------------------------

/// Stores files on local disk under `root`.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    url_prefix: String,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a public URL back to a path inside `root`.
    ///
    /// Anything outside the prefix, or with `..`/absolute components, maps
    /// to `None`.
    fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let relative = url
            .strip_prefix(&self.url_prefix)?
            .strip_prefix('/')?;
        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl FileStore for LocalStore {
    async fn save(
        &self,
        folder: &str,
        filename: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(filename), &bytes).await?;

        tracing::debug!(folder, filename, size = bytes.len(), "Stored upload on disk");
        Ok(format!("{}/{folder}/{filename}", self.url_prefix))
    }

    async fn delete(&self, url: &str) -> Result<bool, StorageError> {
        let Some(path) = self.path_for_url(url) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// CdnStore
// ---------------------------------------------------------------------------

/// Uploads images to a Cloudinary-compatible CDN.
pub struct CdnStore {
    client: reqwest::Client,
    config: CdnConfig,
}

impl CdnStore {
    pub fn new(config: CdnConfig) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(CDN_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.config.base_url, self.config.cloud_name
        )
    }
}

#[async_trait]
impl FileStore for CdnStore {
    async fn save(
        &self,
        folder: &str,
        filename: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone())
            .text("folder", folder.to_string());

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::HttpStatus(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        let url = body
            .get("secure_url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| StorageError::InvalidResponse("missing secure_url".into()))?;

        tracing::debug!(folder, filename, url, "Uploaded image to CDN");
        Ok(url.to_string())
    }

    async fn delete(&self, url: &str) -> Result<bool, StorageError> {
        // Unsigned presets cannot destroy assets; removal happens in the CDN console.
        tracing::debug!(url, "Leaving CDN asset in place");
        Ok(false)
    }
}
