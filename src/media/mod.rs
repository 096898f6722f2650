//! Image store collaborator for chirp.
//!
//! Profile images are not stored by this service. A raw image input (a
//! base64 data URL from the client) is exchanged with an external image
//! store for a durable HTTPS reference URL, which is what gets persisted
//! on the account.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::error;

/// Image store errors.
#[derive(Error, Debug)]
pub enum ImageStoreError {
    /// No image store endpoint is configured.
    #[error("image store is not configured")]
    NotConfigured,

    /// The upload request failed or the response was unusable.
    #[error("image upload failed: {0}")]
    Upload(String),
}

/// External image store collaborator.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload a raw image input and return a durable secure URL.
    async fn upload(&self, image: &str) -> Result<String, ImageStoreError>;
}

/// Upload response from the image store.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// HTTP-backed image store client.
pub struct HttpImageStore {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpImageStore {
    /// Create a client for the given upload endpoint.
    pub fn new(upload_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: upload_url.into(),
        }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn upload(&self, image: &str) -> Result<String, ImageStoreError> {
        let response = self
            .client
            .post(&self.upload_url)
            .json(&serde_json::json!({ "file": image }))
            .send()
            .await
            .map_err(|e| {
                error!("Image upload request failed: {e}");
                ImageStoreError::Upload(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!("Image store returned {status}");
            return Err(ImageStoreError::Upload(format!(
                "image store returned {status}"
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ImageStoreError::Upload(e.to_string()))?;

        Ok(body.secure_url)
    }
}

/// Image store stand-in used when no endpoint is configured.
///
/// Profile image updates fail closed rather than silently keeping the
/// old image.
pub struct DisabledImageStore;

#[async_trait]
impl ImageStore for DisabledImageStore {
    async fn upload(&self, _image: &str) -> Result<String, ImageStoreError> {
        Err(ImageStoreError::NotConfigured)
    }
}
