//! Data models shared by the store, the photo assets and the HTTP layer

/// Inventory records and their wire representation.
pub mod item;
