use std::sync::Arc;

use shared::domain::ImageId;
use tracing::{debug, warn};

use super::MutationOutcome;
use crate::{card::CardState, service::ImageService, sync::Refresher};

pub struct CommentAction {
    service: Arc<dyn ImageService>,
    refresher: Arc<dyn Refresher>,
}

impl CommentAction {
    pub fn new(service: Arc<dyn ImageService>, refresher: Arc<dyn Refresher>) -> Self {
        Self { service, refresher }
    }

    /// Sends `text` as typed. Blank text is dropped without a request.
    pub async fn post(&self, image_id: &ImageId, text: &str) -> MutationOutcome {
        if text.trim().is_empty() {
            debug!(%image_id, "ignoring blank comment");
            return MutationOutcome::Skipped;
        }

        match self.service.add_comment(image_id, text).await {
            Ok(()) => {
                self.refresher.refresh().await;
                MutationOutcome::Refreshed
            }
            Err(err) => {
                warn!(%image_id, error = %err, "error adding comment");
                MutationOutcome::Failed
            }
        }
    }

    /// Posts the card's draft; the draft is cleared only once the comment is
    /// accepted so a failed post can be retried by hand.
    pub async fn submit(&self, image_id: &ImageId, card: &mut CardState) -> MutationOutcome {
        let outcome = self.post(image_id, &card.draft).await;
        if outcome == MutationOutcome::Refreshed {
            card.draft.clear();
        }
        outcome
    }
}
