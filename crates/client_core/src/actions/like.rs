use std::sync::Arc;

use shared::domain::ImageId;
use tracing::warn;

use super::MutationOutcome;
use crate::{service::ImageService, sync::Refresher};

pub struct LikeAction {
    service: Arc<dyn ImageService>,
    refresher: Arc<dyn Refresher>,
}

impl LikeAction {
    pub fn new(service: Arc<dyn ImageService>, refresher: Arc<dyn Refresher>) -> Self {
        Self { service, refresher }
    }

    /// The displayed count only changes once the follow-up refresh lands.
    pub async fn like(&self, image_id: &ImageId) -> MutationOutcome {
        match self.service.like_image(image_id).await {
            Ok(()) => {
                self.refresher.refresh().await;
                MutationOutcome::Refreshed
            }
            Err(err) => {
                warn!(%image_id, error = %err, "error liking image");
                MutationOutcome::Failed
            }
        }
    }
}
