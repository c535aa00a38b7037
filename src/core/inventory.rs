//! The authoritative collection of inventory items.

use std::sync::RwLock;

use crate::error::{AppError, Result};
use crate::models::item::{InventoryItem, ItemPatch, NewItem};

/// Storage interface for inventory records.
///
/// Handlers only see this trait, so the in-memory list can be swapped for a
/// persistent backend without touching the HTTP layer.
pub trait InventoryRepository: Send + Sync + std::fmt::Debug {
    /// Adds a new item and returns it with its assigned id.
    fn create(&self, new: NewItem) -> Result<InventoryItem>;

    /// All items in insertion order.
    fn list(&self) -> Result<Vec<InventoryItem>>;

    /// Looks up an item by exact id.
    fn get(&self, id: &str) -> Result<InventoryItem>;

    /// Applies a field-level patch.
    fn update(&self, id: &str, patch: ItemPatch) -> Result<InventoryItem>;

    /// Points the item at a new photo asset and returns the updated item
    /// together with the filename it referenced before, if any.
    fn replace_photo(&self, id: &str, filename: String) -> Result<(InventoryItem, Option<String>)>;

    /// Removes the record and returns it. Its photo asset is left alone.
    fn delete(&self, id: &str) -> Result<InventoryItem>;
}

/// Process-local, non-persistent inventory.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    items: RwLock<Vec<InventoryItem>>,
}

impl InMemoryInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AppError::Validation("inventory_name is required".to_string()));
    }
    Ok(())
}

impl InventoryRepository for InMemoryInventory {
    fn create(&self, new: NewItem) -> Result<InventoryItem> {
        validate_name(&new.name)?;

        let item = InventoryItem::create(new);
        self.items.write()?.push(item.clone());
        log::info!("Registered item {} ({})", item.id, item.name);
        Ok(item)
    }

    fn list(&self) -> Result<Vec<InventoryItem>> {
        Ok(self.items.read()?.clone())
    }

    fn get(&self, id: &str) -> Result<InventoryItem> {
        self.items
            .read()?
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| AppError::item_not_found(id))
    }

    fn update(&self, id: &str, patch: ItemPatch) -> Result<InventoryItem> {
        // Validate everything up front so a rejected patch writes nothing.
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }

        let mut items = self.items.write()?;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::item_not_found(id))?;

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        log::info!("Updated item {}", id);
        Ok(item.clone())
    }

    fn replace_photo(&self, id: &str, filename: String) -> Result<(InventoryItem, Option<String>)> {
        let mut items = self.items.write()?;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::item_not_found(id))?;

        let previous = item.photo_filename.replace(filename);
        log::info!("Replaced photo of item {}", id);
        Ok((item.clone(), previous))
    }

    fn delete(&self, id: &str) -> Result<InventoryItem> {
        let mut items = self.items.write()?;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| AppError::item_not_found(id))?;

        let removed = items.remove(index);
        log::info!("Deleted item {}", id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drill(store: &InMemoryInventory) -> InventoryItem {
        store
            .create(NewItem::named("Drill").with_description("cordless"))
            .unwrap()
    }

    #[test]
    fn test_create_and_list_in_insertion_order() {
        let store = InMemoryInventory::new();
        let first = drill(&store);
        let second = store.create(NewItem::named("Saw")).unwrap();

        let items = store.list().unwrap();
        assert_eq!(items, vec![first, second]);
        assert_eq!(items[1].description, "");
        assert_eq!(items[1].photo_filename, None);
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let store = InMemoryInventory::new();
        assert!(matches!(
            store.create(NewItem::named("")),
            Err(AppError::Validation(_))
        ));
        assert!(store.list().unwrap().is_empty());

        // Only the empty string is rejected; blank names are stored as given.
        let blank = store.create(NewItem::named(" ")).unwrap();
        assert_eq!(blank.name, " ");
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let store = InMemoryInventory::new();
        assert!(matches!(store.get("missing"), Err(AppError::NotFound(_))));
        assert!(matches!(
            store.update("missing", ItemPatch::default()),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.replace_photo("missing", "photo.jpg".into()),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete("missing"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_update_applies_present_fields_only() {
        let store = InMemoryInventory::new();
        let item = drill(&store);

        let updated = store
            .update(
                &item.id,
                ItemPatch {
                    name: None,
                    description: Some("corded".into()),
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Drill");
        assert_eq!(updated.description, "corded");

        let unchanged = store
            .update(&item.id, ItemPatch::from_form(Some(String::new()), Some(String::new())))
            .unwrap();
        assert_eq!(unchanged.name, "Drill");
        assert_eq!(unchanged.description, "corded");
    }

    #[test]
    fn test_rejected_update_writes_nothing() {
        let store = InMemoryInventory::new();
        let item = drill(&store);

        let result = store.update(
            &item.id,
            ItemPatch {
                name: Some(String::new()),
                description: Some("changed".into()),
            },
        );
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.get(&item.id).unwrap(), item);
    }

    #[test]
    fn test_replace_photo_returns_previous() {
        let store = InMemoryInventory::new();
        let item = drill(&store);

        let (updated, previous) = store.replace_photo(&item.id, "photo-1.jpg".into()).unwrap();
        assert_eq!(previous, None);
        assert_eq!(updated.photo_filename.as_deref(), Some("photo-1.jpg"));

        let (_, previous) = store.replace_photo(&item.id, "photo-2.jpg".into()).unwrap();
        assert_eq!(previous.as_deref(), Some("photo-1.jpg"));
        assert_eq!(
            store.get(&item.id).unwrap().photo_filename.as_deref(),
            Some("photo-2.jpg")
        );
    }

    #[test]
    fn test_delete_removes_record() {
        let store = InMemoryInventory::new();
        let item = drill(&store);
        let other = store.create(NewItem::named("Saw")).unwrap();

        assert_eq!(store.delete(&item.id).unwrap(), item);
        assert_eq!(store.list().unwrap(), vec![other]);
        assert!(matches!(store.delete(&item.id), Err(AppError::NotFound(_))));
    }
}
