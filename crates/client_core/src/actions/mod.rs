//! Mutation actions. Each performs one write against the image service and,
//! on success, asks the [`Refresher`](crate::sync::Refresher) to reconcile.
//! None of them touch the gallery state directly.

mod comment;
mod like;
mod upload;

pub use comment::CommentAction;
pub use like::LikeAction;
pub use upload::{
    MessageKind, UploadAction, UploadOutcome, NO_FILE_MESSAGE, UPLOADING_MESSAGE,
    UPLOAD_SUCCESS_MESSAGE, UPLOAD_UNREACHABLE_MESSAGE,
};

/// Result of a like or comment action. Failures are only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Guard rejected the input; nothing was sent.
    Skipped,
    Refreshed,
    Failed,
}

#[cfg(test)]
#[path = "../tests/actions_tests.rs"]
mod tests;
