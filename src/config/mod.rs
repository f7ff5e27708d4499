use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::DEFAULT_ENDPOINT;
use crate::table::Locale;

pub mod loader;
pub mod validator;

pub use loader::{load_config, load_or_builtin, RawConfig};

/// How long a fetched snapshot may be served before a fresh fetch is required.
pub const DEFAULT_REVALIDATE_SECS: u64 = 300;
/// Upper bound for the whole fund list request, body included.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SNAPSHOTS_DIR: &str = "assets/snapshots";
pub const DEFAULT_LOG_FILE: &str = "fii-board.log";
pub const DEFAULT_CONFIG_FILE: &str = "fii-board.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub revalidate: Duration,
    pub timeout: Duration,
    pub snapshots_dir: PathBuf,
    pub log_file: PathBuf,
    pub locale: Locale,
    /// Extra request headers; values may use `${VAR}` placeholders.
    pub headers: BTreeMap<String, String>,
}

impl Config {
    pub fn builtin() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            snapshots_dir: PathBuf::from(DEFAULT_SNAPSHOTS_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            locale: Locale::default(),
            headers: BTreeMap::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}
