//! Server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cache::CacheConfig;

/// File name of the rail section dataset inside the UTF-8 directory.
pub const RAIL_FILE: &str = "N05-24_RailroadSection2.geojson";

/// File name of the station dataset inside the UTF-8 directory.
pub const STATION_FILE: &str = "N05-24_Station2.geojson";

/// Error returned when the configuration cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("UTF-8 dataset directory is required")]
    MissingDatasetDir,

    #[error("static directory is required")]
    MissingStaticDir,
}

/// Historical rail map server.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct ServerConfig {
    /// HTTP listen address
    #[arg(long, env = "RAILMAP_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,

    /// Path to the UTF-8 dataset directory
    #[arg(long, env = "RAILMAP_UTF8_DIR", default_value = "N05-24_GML/UTF-8")]
    pub utf8_dir: PathBuf,

    /// Path to the static asset directory
    #[arg(long, env = "RAILMAP_STATIC_DIR", default_value = "web/static")]
    pub static_dir: PathBuf,

    /// Maximum number of filtered payloads kept in memory
    #[arg(long, env = "RAILMAP_CACHE_CAPACITY", default_value_t = 256)]
    pub cache_capacity: u64,
}

impl ServerConfig {
    /// Reject configurations with empty paths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utf8_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingDatasetDir);
        }
        if self.static_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingStaticDir);
        }
        Ok(())
    }

    pub fn rail_path(&self) -> PathBuf {
        self.utf8_dir.join(RAIL_FILE)
    }

    pub fn station_path(&self) -> PathBuf {
        self.utf8_dir.join(STATION_FILE)
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub fn cache(&self) -> CacheConfig {
        CacheConfig {
            max_capacity: self.cache_capacity,
        }
    }
}
