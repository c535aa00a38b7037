use assert_fs::prelude::*;
use futures::TryStreamExt;
use predicates::prelude::*;

use inventory_service::{
    annotate, AppError, InMemoryInventory, InventoryRepository, ItemPatch, NewItem, PhotoAsset,
    PhotoStore, PhotoUrlBuilder,
};

async fn read_all(asset: PhotoAsset) -> Vec<u8> {
    let chunks: Vec<_> = asset.stream.try_collect().await.unwrap();
    chunks.concat()
}

#[tokio::test]
async fn test_store_and_open_photo() {
    let cache = assert_fs::TempDir::new().unwrap();
    let photos = PhotoStore::new(cache.path());

    let filename = photos
        .store("photo", Some("drill.png"), b"png bytes")
        .await
        .unwrap();
    assert!(filename.starts_with("photo-"));
    assert!(filename.ends_with(".png"));

    cache.child(&filename).assert(predicate::path::is_file());
    cache.child(&filename).assert("png bytes");

    let asset = photos.open(&filename).await.unwrap();
    assert_eq!(asset.content_type, "image/png");
    assert_eq!(asset.len, 9);
    assert_eq!(read_all(asset).await, b"png bytes");
}

#[tokio::test]
async fn test_ensure_dir_creates_nested_cache() {
    let root = assert_fs::TempDir::new().unwrap();
    let photos = PhotoStore::new(root.path().join("a/b/cache"));

    photos.ensure_dir().await.unwrap();
    root.child("a/b/cache").assert(predicate::path::is_dir());

    // Idempotent
    photos.ensure_dir().await.unwrap();
}

#[tokio::test]
async fn test_open_missing_file_is_not_found() {
    let cache = tempfile::tempdir().unwrap();
    let photos = PhotoStore::new(cache.path());

    let result = photos.open("photo-1-2.jpg").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_remove_photo() {
    let cache = assert_fs::TempDir::new().unwrap();
    let photos = PhotoStore::new(cache.path());

    let filename = photos.store("photo", Some("a.jpg"), b"x").await.unwrap();
    photos.remove(&filename).await.unwrap();
    cache.child(&filename).assert(predicate::path::missing());

    // Already gone
    photos.remove(&filename).await.unwrap();
}

#[tokio::test]
async fn test_dangling_reference_surfaces_as_not_found() {
    let cache = assert_fs::TempDir::new().unwrap();
    let photos = PhotoStore::new(cache.path());
    let inventory = InMemoryInventory::new();

    let filename = photos.store("photo", Some("a.jpg"), b"x").await.unwrap();
    let item = inventory
        .create(NewItem::named("Drill").with_photo(filename.clone()))
        .unwrap();

    std::fs::remove_file(cache.path().join(&filename)).unwrap();

    let stored = inventory.get(&item.id).unwrap();
    let result = photos.open(stored.photo_filename.as_deref().unwrap()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[test]
fn test_search_does_not_mutate_stored_item() {
    let inventory = InMemoryInventory::new();
    let urls = PhotoUrlBuilder::new("localhost", 3000);
    let item = inventory
        .create(NewItem::named("Drill").with_description("cordless"))
        .unwrap();

    let found = inventory.get(&item.id).unwrap();
    let view = annotate(&found, true, &urls);
    assert_eq!(view.description, "cordless (No photo)");

    assert_eq!(inventory.get(&item.id).unwrap().description, "cordless");
}

#[test]
fn test_update_with_empty_values_keeps_fields() {
    let inventory = InMemoryInventory::new();
    let item = inventory
        .create(NewItem::named("Drill").with_description("cordless"))
        .unwrap();

    let patch = ItemPatch::from_form(Some(String::new()), Some(String::new()));
    let updated = inventory.update(&item.id, patch).unwrap();

    assert_eq!(updated, item);
}
