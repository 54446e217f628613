//! Client for the image review service.
//!
//! [`SyncController`] owns the gallery snapshot and is the only component
//! allowed to write it. Upload, like and comment actions perform their write
//! and then ask the controller to reconcile with a full server read.

pub mod actions;
pub mod card;
pub mod error;
pub mod render;
pub mod service;
pub mod session;
pub mod store;
pub mod sync;

pub use actions::{
    CommentAction, LikeAction, MessageKind, MutationOutcome, UploadAction, UploadOutcome,
};
pub use card::{CardState, CardStates, CommentsPanel};
pub use error::ServiceError;
pub use render::render_gallery;
pub use service::{HttpImageService, ImageService, ImageUpload};
pub use session::GallerySession;
pub use store::{GalleryState, GalleryView};
pub use sync::{GalleryEvent, Refresher, SyncController};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
