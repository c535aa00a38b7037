#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms
)]

//! # Inventory Service
//!
//! A small HTTP service for tracking inventory items, each of which can carry
//! one photo stored in a local cache directory.
//!
//! ## Features
//!
//! - **Inventory records**: register, list, fetch, update and delete items
//! - **Photos**: attach or replace one photo per item and stream it back
//! - **Search**: look an item up by id and optionally annotate its description
//!   with the photo link
//! - **Web API**: axum server with static HTML forms and an OpenAPI document
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inventory_service::{InMemoryInventory, InventoryRepository, NewItem, Result};
//!
//! fn main() -> Result<()> {
//!     let inventory = InMemoryInventory::new();
//!     let item = inventory.create(NewItem::named("Drill").with_description("cordless"))?;
//!     println!("Registered {}", item.id);
//!     Ok(())
//! }
//! ```

// Internal modules
pub mod api;
#[cfg(feature = "web")]
pub mod cli;
pub mod core;
/// Defines the application's error types and result aliases.
pub mod error;
pub mod models;
mod state;
mod utils;

#[allow(dead_code, missing_docs, clippy::all)]
mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

// Public API exports
pub use crate::{
    core::{
        inventory::{InMemoryInventory, InventoryRepository},
        photos::{PhotoAsset, PhotoStore},
        search::annotate,
        urls::{build_photo_url, PhotoUrlBuilder},
    },
    error::{AppError, Result, ResultExt},
    models::item::{InventoryItem, ItemPatch, ItemView, NewItem},
    state::{AppState, Config},
};

#[cfg(feature = "web")]
pub use crate::{
    api::{create_router, health_check},
    cli::Cli,
};

/// Version and build time of this binary, e.g. `0.1.0 (built Sat, 17 Oct 2026 ...)`
pub fn build_description() -> String {
    format!(
        "{} (built {}, {})",
        built_info::PKG_VERSION,
        built_info::BUILT_TIME_UTC,
        built_info::RUSTC_VERSION
    )
}

/// Initialize the application with default settings
///
/// This function sets up logging. It should be called early in the
/// application startup process.
///
/// # Errors
///
/// Returns an error if a global logger has already been installed.
///
/// # Example
///
/// ```no_run
/// use inventory_service::init;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     init()?;
///     // Application code here
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    // Initialize logging with sensible defaults
    let env = env_logger::Env::default()
        .default_filter_or("info")
        .default_write_style_or("auto");

    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .format_module_path(false)
        .format_target(false)
        .try_init()
        .map_err(|e| AppError::Config(format!("logger already initialized: {}", e)))?;

    log::info!("Initializing inventory service {}", build_description());
    Ok(())
}

/// Prepares the cache directory and returns the shared state for `config`.
///
/// # Errors
///
/// Returns an error if the cache directory cannot be created.
pub async fn bootstrap(config: Config) -> Result<std::sync::Arc<AppState>> {
    let state = AppState::with_config(config);
    state.photos.ensure_dir().await?;
    log::info!("Photo cache directory: {}", state.photos.cache_dir().display());
    Ok(state)
}
