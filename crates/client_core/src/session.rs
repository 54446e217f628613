use std::sync::Arc;

use crate::{
    actions::{CommentAction, LikeAction, UploadAction},
    error::ServiceError,
    service::{HttpImageService, ImageService},
    sync::{Refresher, SyncController},
};

/// One gallery session: a single controller owning the state, and the
/// mutation actions wired to refresh through it.
pub struct GallerySession {
    pub controller: Arc<SyncController>,
    pub upload: UploadAction,
    pub like: LikeAction,
    pub comment: CommentAction,
}

impl GallerySession {
    pub fn connect(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        let service = HttpImageService::new(base_url)?;
        Ok(Self::new(Arc::new(service)))
    }

    pub fn new(service: Arc<dyn ImageService>) -> Self {
        let controller = SyncController::new(Arc::clone(&service));
        let refresher: Arc<dyn Refresher> = controller.clone();
        Self {
            upload: UploadAction::new(Arc::clone(&service), Arc::clone(&refresher)),
            like: LikeAction::new(Arc::clone(&service), Arc::clone(&refresher)),
            comment: CommentAction::new(service, refresher),
            controller,
        }
    }

    pub async fn mount(&self) -> Result<usize, ServiceError> {
        self.controller.mount().await
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
