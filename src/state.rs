use std::path::PathBuf;
use std::sync::Arc;

use crate::core::inventory::{InMemoryInventory, InventoryRepository};
use crate::core::photos::PhotoStore;
use crate::core::urls::PhotoUrlBuilder;

/// Configuration for the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Host the server binds to and advertises in photo links
    pub host: String,
    /// Port the server binds to and advertises in photo links
    pub port: u16,
    /// Directory uploaded photos are written to
    pub cache_dir: PathBuf,
    /// Directory holding the HTML forms and the OpenAPI document
    pub static_dir: PathBuf,
    /// Maximum request body size in bytes
    pub max_upload_size: usize,
    /// Delete a photo file once no item references it
    pub prune_orphaned_photos: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 3000,
            cache_dir: PathBuf::from("cache"),
            static_dir: PathBuf::from("static"),
            max_upload_size: 10 * 1024 * 1024, // 10MB
            prune_orphaned_photos: false,
        }
    }
}

/// Application state that can be shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Item records
    pub inventory: Arc<dyn InventoryRepository>,
    /// Photo files
    pub photos: PhotoStore,
    /// Photo link formatting
    pub urls: PhotoUrlBuilder,
}

impl AppState {
    /// Create a new application state with default configuration
    pub fn new() -> Arc<Self> {
        Self::with_config(Config::default())
    }

    /// Create a new application state with custom configuration and an
    /// empty in-memory inventory
    pub fn with_config(config: Config) -> Arc<Self> {
        Self::with_repository(config, Arc::new(InMemoryInventory::new()))
    }

    /// Create a new application state backed by the given repository
    pub fn with_repository(config: Config, inventory: Arc<dyn InventoryRepository>) -> Arc<Self> {
        let photos = PhotoStore::new(config.cache_dir.clone());
        let urls = PhotoUrlBuilder::new(config.host.clone(), config.port);

        Arc::new(Self {
            config,
            inventory,
            photos,
            urls,
        })
    }
}
