//! Command-line and environment configuration

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::state::Config;

/// Inventory service with per-item photo storage.
///
/// Every option can also be supplied through the environment or a `.env`
/// file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(version, about, disable_help_flag = true)]
pub struct Cli {
    /// Server address
    #[arg(short = 'h', long, env = "INVENTORY_HOST")]
    pub host: String,

    /// Server port
    #[arg(short = 'p', long, env = "INVENTORY_PORT")]
    pub port: u16,

    /// Path to the photo cache directory
    #[arg(short = 'c', long = "cache", env = "INVENTORY_CACHE")]
    pub cache_dir: PathBuf,

    /// Directory holding RegisterForm.html, SearchForm.html and openapi.yaml
    #[arg(long, env = "INVENTORY_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Maximum request body size in bytes
    #[arg(long = "max-upload", env = "INVENTORY_MAX_UPLOAD", default_value_t = 10 * 1024 * 1024)]
    pub max_upload_size: usize,

    /// Delete a photo file when its item is deleted or its photo replaced
    #[arg(long = "prune-orphans", env = "INVENTORY_PRUNE_ORPHANS")]
    pub prune_orphaned_photos: bool,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Cli {
    /// Loads `.env` (if present) and parses the process arguments.
    pub fn load() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::parse()
    }

    /// Converts parsed arguments into the runtime configuration.
    pub fn into_config(self) -> Config {
        Config {
            host: self.host,
            port: self.port,
            cache_dir: self.cache_dir,
            static_dir: self.static_dir,
            max_upload_size: self.max_upload_size,
            prune_orphaned_photos: self.prune_orphaned_photos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "INVENTORY_HOST",
        "INVENTORY_PORT",
        "INVENTORY_CACHE",
        "INVENTORY_STATIC_DIR",
        "INVENTORY_MAX_UPLOAD",
        "INVENTORY_PRUNE_ORPHANS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_parse_short_flags() {
        clear_env();
        let cli = Cli::try_parse_from(["inventory-service", "-h", "0.0.0.0", "-p", "8080", "-c", "/tmp/cache"]).unwrap();
        let config = cli.into_config();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/cache"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.max_upload_size, 10 * 1024 * 1024);
        assert!(!config.prune_orphaned_photos);
    }

    #[test]
    #[serial]
    fn test_required_options() {
        clear_env();
        assert!(Cli::try_parse_from(["inventory-service", "-h", "localhost"]).is_err());
    }

    #[test]
    #[serial]
    fn test_environment_fallback() {
        clear_env();
        std::env::set_var("INVENTORY_HOST", "inventory.local");
        std::env::set_var("INVENTORY_PORT", "9000");
        std::env::set_var("INVENTORY_CACHE", "/var/cache/inventory");
        std::env::set_var("INVENTORY_PRUNE_ORPHANS", "true");

        let config = Cli::try_parse_from(["inventory-service", "--port", "9001"])
            .unwrap()
            .into_config();
        clear_env();

        assert_eq!(config.host, "inventory.local");
        assert_eq!(config.port, 9001);
        assert_eq!(config.cache_dir, PathBuf::from("/var/cache/inventory"));
        assert!(config.prune_orphaned_photos);
    }
}
