//! Sync controller: the only writer of [`GalleryState`].
//!
//! Every mutation funnels through [`SyncController::refresh`], which replaces
//! the snapshot with a full server read. Overlapping refreshes are not
//! sequenced; whichever response arrives last is what stays visible.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::{
    error::ServiceError,
    service::ImageService,
    store::{GalleryState, CONNECTION_FAILED_MESSAGE, FETCH_FAILED_MESSAGE},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    Refreshed { image_count: usize },
    RefreshFailed { reason: String },
}

/// Handed to mutation actions at composition time so they can request a
/// reconciliation without holding the gallery state themselves.
#[async_trait]
pub trait Refresher: Send + Sync {
    async fn refresh(&self);
}

pub struct SyncController {
    service: Arc<dyn ImageService>,
    state: RwLock<GalleryState>,
    events: broadcast::Sender<GalleryEvent>,
}

impl SyncController {
    pub fn new(service: Arc<dyn ImageService>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            service,
            state: RwLock::new(GalleryState::default()),
            events,
        })
    }

    /// First fetch of the session. The loading flag set at construction is
    /// cleared once it completes.
    pub async fn mount(&self) -> Result<usize, ServiceError> {
        self.refresh().await
    }

    pub async fn refresh(&self) -> Result<usize, ServiceError> {
        match self.service.list_images().await {
            Ok(images) => {
                let image_count = images.len();
                self.state.write().await.replace_images(images);
                info!(image_count, "gallery refreshed");
                let _ = self.events.send(GalleryEvent::Refreshed { image_count });
                Ok(image_count)
            }
            Err(err) => {
                let reason = match &err {
                    ServiceError::Status { .. } => FETCH_FAILED_MESSAGE,
                    _ => CONNECTION_FAILED_MESSAGE,
                };
                warn!(error = %err, "gallery refresh failed");
                self.state.write().await.record_failure(reason);
                let _ = self.events.send(GalleryEvent::RefreshFailed {
                    reason: reason.to_string(),
                });
                Err(err)
            }
        }
    }

    pub async fn snapshot(&self) -> GalleryState {
        self.state.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GalleryEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl Refresher for SyncController {
    async fn refresh(&self) {
        let _ = SyncController::refresh(self).await;
    }
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
