use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::urls::PhotoUrlBuilder;

/// A single tracked inventory record.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    /// Identifier assigned at creation. Never reassigned.
    pub id: String,
    /// Display name. Never empty.
    pub name: String,
    /// Free-form description, empty by default.
    pub description: String,
    /// Name of the photo asset in the cache directory, if one is attached.
    pub photo_filename: Option<String>,
}

impl InventoryItem {
    /// Builds a record with a freshly generated id.
    pub(crate) fn create(new: NewItem) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            photo_filename: new.photo_filename,
        }
    }

    /// Whether a photo reference is attached.
    pub fn has_photo(&self) -> bool {
        self.photo_filename.is_some()
    }
}

/// Input for creating an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    /// Required, non-empty.
    pub name: String,
    /// Defaults to empty.
    pub description: String,
    /// Asset written by the photo store before the record is created.
    pub photo_filename: Option<String>,
}

impl NewItem {
    /// Creates input with a name and an empty description.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attaches a photo asset.
    pub fn with_photo(mut self, filename: impl Into<String>) -> Self {
        self.photo_filename = Some(filename.into());
        self
    }
}

/// Field-level changes to an item.
///
/// `None` leaves the stored field untouched, `Some` overwrites it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

impl ItemPatch {
    /// Builds a patch from submitted form values, where an empty string
    /// means "no change" rather than "clear the field".
    pub fn from_form(name: Option<String>, description: Option<String>) -> Self {
        Self {
            name: name.filter(|v| !v.is_empty()),
            description: description.filter(|v| !v.is_empty()),
        }
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// The shape an item takes on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    /// Item id.
    pub id: String,
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Absolute photo link, `null` when no photo is attached.
    pub photo_url: Option<String>,
}

impl ItemView {
    /// Renders a stored item, resolving its photo link.
    pub fn from_item(item: &InventoryItem, urls: &PhotoUrlBuilder) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            photo_url: item.has_photo().then(|| urls.photo_url(&item.id)),
        }
    }
}
