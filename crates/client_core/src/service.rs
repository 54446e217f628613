//! HTTP client for the remote image service.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use shared::{
    domain::{Image, ImageId},
    protocol::{CommentRequest, UploadResponse},
};
use tracing::debug;
use url::Url;

use crate::error::ServiceError;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A single image payload chosen for upload. Format validation is left to the
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Self {
            filename,
            mime_type,
            bytes,
        }
    }
}

#[async_trait]
pub trait ImageService: Send + Sync {
    async fn list_images(&self) -> Result<Vec<Image>, ServiceError>;
    /// Returns the decoded body for any HTTP status; rejection is signalled by
    /// `success: false` rather than by an error.
    async fn upload_image(&self, upload: ImageUpload) -> Result<UploadResponse, ServiceError>;
    async fn like_image(&self, image_id: &ImageId) -> Result<(), ServiceError>;
    async fn add_comment(&self, image_id: &ImageId, text: &str) -> Result<(), ServiceError>;
}

pub struct HttpImageService {
    http: Client,
    base_url: String,
}

impl HttpImageService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let raw = base_url.into();
        let base_url = raw.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|source| ServiceError::InvalidBaseUrl {
            url: raw.clone(),
            source,
        })?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn ensure_success(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ServiceError::Status {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ImageService for HttpImageService {
    async fn list_images(&self) -> Result<Vec<Image>, ServiceError> {
        debug!(base_url = %self.base_url, "listing images");
        let response = self.http.get(self.endpoint("/api/images")).send().await?;
        let images = ensure_success(response)?.json().await?;
        Ok(images)
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<UploadResponse, ServiceError> {
        debug!(filename = %upload.filename, size = upload.bytes.len(), "uploading image");
        let mime_type = upload.mime_type.as_deref().unwrap_or(FALLBACK_MIME_TYPE);
        let part = Part::bytes(upload.bytes)
            .file_name(upload.filename)
            .mime_str(mime_type)?;
        let form = Form::new().part("image", part);

        let response: UploadResponse = self
            .http
            .post(self.endpoint("/api/upload"))
            .multipart(form)
            .send()
            .await?
            .json()
            .await?;
        Ok(response)
    }

    async fn like_image(&self, image_id: &ImageId) -> Result<(), ServiceError> {
        debug!(%image_id, "liking image");
        let response = self
            .http
            .post(self.endpoint(&format!("/api/images/{image_id}/like")))
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }

    async fn add_comment(&self, image_id: &ImageId, text: &str) -> Result<(), ServiceError> {
        debug!(%image_id, "posting comment");
        let response = self
            .http
            .post(self.endpoint(&format!("/api/images/{image_id}/comment")))
            .json(&CommentRequest {
                text: text.to_string(),
            })
            .send()
            .await?;
        ensure_success(response)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod tests;
