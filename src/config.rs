//! Runtime configuration assembled by the binary from flags and environment.

use crate::infrastructure::openweather::WeatherConfig;
use clap::ValueEnum;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ROUTE_PREFIX: &str = "/.netlify/functions/api";

/// Order in which stored submissions are returned to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListOrder {
    /// Insertion order.
    #[default]
    Oldest,
    /// Reverse insertion order.
    Newest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    JsonFile(PathBuf),
}

impl From<Option<PathBuf>> for StorageBackend {
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => StorageBackend::JsonFile(path),
            None => StorageBackend::Memory,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub route_prefix: String,
    pub storage: StorageBackend,
    pub order: ListOrder,
    pub weather: WeatherConfig,
}

/// Normalizes a routing prefix to `/segment[/segment…]`, or `/` for the root.
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}
