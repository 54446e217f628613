use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    service::{ImageService, ImageUpload},
    sync::Refresher,
};

pub const NO_FILE_MESSAGE: &str = "Please choose a photo to upload!";
pub const UPLOADING_MESSAGE: &str = "Uploading...";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Upload Image Success!";
pub const UPLOAD_UNREACHABLE_MESSAGE: &str = "Connect to server failed!";
const UNSPECIFIED_REJECTION: &str = "Upload rejected";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// No file selected; nothing was sent.
    Rejected,
    /// Another upload is still in flight.
    Busy,
    Uploaded,
    /// Server answered with `success: false`.
    Failed { error: String },
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Default)]
struct UploadPanel {
    file: Option<ImageUpload>,
    message: String,
    uploading: bool,
}

pub struct UploadAction {
    service: Arc<dyn ImageService>,
    refresher: Arc<dyn Refresher>,
    panel: Mutex<UploadPanel>,
}

impl UploadAction {
    pub fn new(service: Arc<dyn ImageService>, refresher: Arc<dyn Refresher>) -> Self {
        Self {
            service,
            refresher,
            panel: Mutex::new(UploadPanel::default()),
        }
    }

    /// Replaces the selection and clears the previous message. Ignored while
    /// an upload is running.
    pub async fn select_file(&self, file: Option<ImageUpload>) -> bool {
        let mut panel = self.panel.lock().await;
        if panel.uploading {
            return false;
        }
        panel.file = file;
        panel.message.clear();
        true
    }

    pub async fn selected_filename(&self) -> Option<String> {
        let panel = self.panel.lock().await;
        panel.file.as_ref().map(|file| file.filename.clone())
    }

    pub async fn is_uploading(&self) -> bool {
        self.panel.lock().await.uploading
    }

    pub async fn can_submit(&self) -> bool {
        let panel = self.panel.lock().await;
        !panel.uploading && panel.file.is_some()
    }

    pub async fn message(&self) -> String {
        self.panel.lock().await.message.clone()
    }

    pub async fn message_kind(&self) -> Option<MessageKind> {
        let panel = self.panel.lock().await;
        if panel.message.is_empty() {
            None
        } else if panel.message.contains("Success") {
            Some(MessageKind::Success)
        } else {
            Some(MessageKind::Error)
        }
    }

    pub async fn submit(&self) -> UploadOutcome {
        let upload = {
            let mut panel = self.panel.lock().await;
            if panel.uploading {
                return UploadOutcome::Busy;
            }
            let Some(file) = panel.file.clone() else {
                panel.message = NO_FILE_MESSAGE.to_string();
                return UploadOutcome::Rejected;
            };
            panel.uploading = true;
            panel.message = UPLOADING_MESSAGE.to_string();
            file
        };

        let filename = upload.filename.clone();
        let result = self.service.upload_image(upload).await;

        let outcome = {
            let mut panel = self.panel.lock().await;
            panel.uploading = false;
            match result {
                Ok(response) if response.success => {
                    panel.file = None;
                    panel.message = UPLOAD_SUCCESS_MESSAGE.to_string();
                    UploadOutcome::Uploaded
                }
                Ok(response) => {
                    let error = response
                        .error
                        .unwrap_or_else(|| UNSPECIFIED_REJECTION.to_string());
                    panel.message = format!("Error: {error}");
                    UploadOutcome::Failed { error }
                }
                Err(err) => {
                    warn!(%filename, error = %err, "upload request failed");
                    panel.message = UPLOAD_UNREACHABLE_MESSAGE.to_string();
                    UploadOutcome::Unreachable
                }
            }
        };

        match &outcome {
            UploadOutcome::Uploaded => {
                info!(%filename, "image uploaded");
                self.refresher.refresh().await;
            }
            UploadOutcome::Failed { error } => {
                info!(%filename, %error, "upload rejected by server");
            }
            _ => {}
        }
        outcome
    }
}
