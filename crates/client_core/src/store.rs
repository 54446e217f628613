use shared::domain::Image;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch images";
pub const CONNECTION_FAILED_MESSAGE: &str = "Error connecting to server";

/// In-memory snapshot of the gallery for the current session. Only the sync
/// controller writes it; every successful fetch replaces `images` wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    pub images: Vec<Image>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryView<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Images(&'a [Image]),
}

impl GalleryState {
    pub fn view(&self) -> GalleryView<'_> {
        if self.loading {
            GalleryView::Loading
        } else if let Some(error) = self.error.as_deref() {
            GalleryView::Error(error)
        } else if self.images.is_empty() {
            GalleryView::Empty
        } else {
            GalleryView::Images(&self.images)
        }
    }

    pub(crate) fn replace_images(&mut self, images: Vec<Image>) {
        self.images = images;
        self.error = None;
        self.loading = false;
    }

    pub(crate) fn record_failure(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }
}
