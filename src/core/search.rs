//! Lookup by id with optional photo annotation of the description.

use crate::core::urls::PhotoUrlBuilder;
use crate::models::item::{InventoryItem, ItemView};

/// Appended when an annotated item has no photo.
pub const NO_PHOTO_MARKER: &str = "(No photo)";

/// Renders `item` for a search response.
///
/// With `with_photo_link` set, the returned description gains the photo URL
/// or [`NO_PHOTO_MARKER`]. `item` is only borrowed, so the stored record is
/// never affected.
pub fn annotate(item: &InventoryItem, with_photo_link: bool, urls: &PhotoUrlBuilder) -> ItemView {
    let mut view = ItemView::from_item(item, urls);
    if with_photo_link {
        let suffix = view.photo_url.as_deref().unwrap_or(NO_PHOTO_MARKER);
        view.description = format!("{} {}", view.description, suffix);
    }
    view
}

/// Whether a submitted checkbox/flag value counts as set.
pub fn is_truthy(value: &str) -> bool {
    matches!(value, "on" | "true")
}
