//! Plain-text rendering of the gallery snapshot.

use std::fmt::Write as _;

use shared::domain::Image;

use crate::{
    card::CardStates,
    store::{GalleryState, GalleryView},
};

pub const LOADING_LINE: &str = "Loading images...";
pub const EMPTY_LINE: &str = "No images uploaded yet.";
pub const GALLERY_HEADING: &str = "Image Gallery";

const UPLOAD_DATE_FORMAT: &str = "%Y-%m-%d";
const COMMENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn like_label(image: &Image) -> String {
    format!("👍 Like ({})", image.likes)
}

pub fn comments_label(image: &Image) -> String {
    format!("💬 Comments ({})", image.comments.len())
}

pub fn render_gallery(state: &GalleryState, cards: &CardStates) -> String {
    match state.view() {
        GalleryView::Loading => LOADING_LINE.to_string(),
        GalleryView::Error(error) => format!("Error: {error}"),
        GalleryView::Empty => format!("{GALLERY_HEADING}\n{EMPTY_LINE}"),
        GalleryView::Images(images) => {
            let mut out = String::from(GALLERY_HEADING);
            for image in images {
                out.push_str("\n\n");
                out.push_str(&render_card(image, cards.comments_expanded(&image.id)));
            }
            out
        }
    }
}

pub fn render_card(image: &Image, comments_expanded: bool) -> String {
    let mut out = String::new();
    // Writing into a String never fails.
    let _ = writeln!(out, "[{}] {}", image.id, image.original_name);
    let _ = writeln!(out, "  {}", image.secure_url);
    let _ = writeln!(out, "  Format: {}", image.format);
    let _ = writeln!(out, "  Size: {} KB", image.size_kb());
    let _ = writeln!(out, "  Dimensions: {} x {}", image.width, image.height);
    let _ = writeln!(
        out,
        "  Uploaded: {}",
        image.uploaded_at.format(UPLOAD_DATE_FORMAT)
    );
    let _ = write!(out, "  {}  {}", like_label(image), comments_label(image));

    if comments_expanded {
        for comment in &image.comments {
            let _ = write!(
                out,
                "\n    - {} ({})",
                comment.text,
                comment.created_at.format(COMMENT_TIME_FORMAT)
            );
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
