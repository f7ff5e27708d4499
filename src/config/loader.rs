use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Context, Result};
use crate::fetch::DEFAULT_ENDPOINT;
use crate::table::Locale;

use super::validator::validate_raw_config;
use super::{
    Config, DEFAULT_LOG_FILE, DEFAULT_REVALIDATE_SECS, DEFAULT_SNAPSHOTS_DIR, DEFAULT_TIMEOUT_SECS,
};

/// On-disk shape of the configuration file. Omitted keys fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub endpoint: String,
    pub revalidate_secs: u64,
    pub timeout_secs: u64,
    pub snapshots_dir: String,
    pub log_file: String,
    pub locale: String,
    pub headers: BTreeMap<String, String>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            snapshots_dir: DEFAULT_SNAPSHOTS_DIR.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            locale: Locale::default().tag().to_string(),
            headers: BTreeMap::new(),
        }
    }
}

impl RawConfig {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and convert into the runtime configuration.
    pub fn into_config(self) -> Result<Config> {
        validate_raw_config(&self)?;
        Ok(Config {
            endpoint: self.endpoint.trim().to_string(),
            revalidate: Duration::from_secs(self.revalidate_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            snapshots_dir: PathBuf::from(self.snapshots_dir),
            log_file: PathBuf::from(self.log_file),
            locale: Locale::parse(&self.locale).unwrap_or_default(),
            headers: self.headers,
        })
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;

    let raw: RawConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;

    raw.into_config()
}

/// Load `path` when it exists, otherwise use the built-in configuration.
pub fn load_or_builtin(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(Config::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let raw = RawConfig::parse(r#"{"revalidate_secs": 60, "locale": "en-US"}"#).unwrap();
        let config = raw.into_config().unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.revalidate, Duration::from_secs(60));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.locale, Locale::EnUs);
        assert_eq!(config.snapshots_dir, PathBuf::from(DEFAULT_SNAPSHOTS_DIR));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(RawConfig::parse(r#"{"revalidate": 60}"#).is_err());
    }

    #[test]
    fn loads_from_disk_or_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fii-board.json");

        let fallback = load_or_builtin(&path).unwrap();
        assert_eq!(fallback.revalidate, Duration::from_secs(DEFAULT_REVALIDATE_SECS));

        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"endpoint": "http://localhost:8080/api/quote/list?type=fund", "headers": {{"Authorization": "Bearer ${{BRAPI_TOKEN}}"}}}}"#
        )
        .unwrap();

        let config = load_or_builtin(&path).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/api/quote/list?type=fund");
        assert_eq!(
            config.headers.get("Authorization").map(String::as_str),
            Some("Bearer ${BRAPI_TOKEN}")
        );
    }

    #[test]
    fn reports_parse_failures_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(
            err.to_string().contains("failed to parse config file"),
            "unexpected error: {err}"
        );
    }
}
