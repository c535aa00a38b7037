//! Core inventory functionality: records, photo assets, links and search

/// Repository trait and the in-memory inventory.
pub mod inventory;
/// Photo asset storage in the cache directory.
pub mod photos;
/// Search-time description annotation.
pub mod search;
/// Photo link formatting.
pub mod urls;
