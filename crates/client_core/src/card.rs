//! Per-card local UI state. Independent of any network activity.

use std::collections::HashMap;

use shared::domain::ImageId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentsPanel {
    #[default]
    Collapsed,
    Expanded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardState {
    pub panel: CommentsPanel,
    /// Unsent comment text.
    pub draft: String,
}

impl CardState {
    pub fn toggle_comments(&mut self) {
        self.panel = match self.panel {
            CommentsPanel::Collapsed => CommentsPanel::Expanded,
            CommentsPanel::Expanded => CommentsPanel::Collapsed,
        };
    }

    pub fn comments_expanded(&self) -> bool {
        self.panel == CommentsPanel::Expanded
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardStates {
    cards: HashMap<ImageId, CardState>,
}

impl CardStates {
    pub fn get(&self, image_id: &ImageId) -> Option<&CardState> {
        self.cards.get(image_id)
    }

    pub fn card_mut(&mut self, image_id: &ImageId) -> &mut CardState {
        self.cards.entry(image_id.clone()).or_default()
    }

    pub fn comments_expanded(&self, image_id: &ImageId) -> bool {
        self.get(image_id).is_some_and(CardState::comments_expanded)
    }

    pub fn toggle_comments(&mut self, image_id: &ImageId) {
        self.card_mut(image_id).toggle_comments();
    }
}
