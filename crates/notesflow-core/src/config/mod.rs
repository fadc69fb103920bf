//! Client configuration.
//!
//! Resolves the notes API endpoint and the local cache location from the
//! environment, with explicit overrides for front-ends that take flags.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const CACHE_DIR_ENV: &str = "NOTESFLOW_CACHE_DIR";
pub const HTTP_TIMEOUT_ENV: &str = "NOTESFLOW_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration shared by every NotesFlow client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Notes API base URL, without trailing slash
    pub api_base_url: String,
    /// Directory holding the local cache slot
    pub cache_dir: PathBuf,
    /// Per-request timeout for the notes API
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_dir: default_cache_dir(),
            request_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Build a config from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Resolves settings without touching the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = normalize_text_option(lookup(API_BASE_URL_ENV)) {
            config.api_base_url = normalize_base_url(&url)?;
        }
        if let Some(dir) = normalize_text_option(lookup(CACHE_DIR_ENV)) {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(raw) = normalize_text_option(lookup(HTTP_TIMEOUT_ENV)) {
            let secs = raw.parse::<u64>().map_err(|_| {
                Error::Config(format!("{HTTP_TIMEOUT_ENV} must be a whole number of seconds"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the API base URL.
    pub fn with_api_base_url(mut self, url: &str) -> Result<Self> {
        self.api_base_url = normalize_base_url(url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }
}

/// Trim and validate an API base URL.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(Error::Config("API base URL must not be empty".to_string()));
    }
    if !is_http_url(base) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base.to_string())
}

fn default_cache_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("notesflow")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_endpoint() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.cache_dir.ends_with("notesflow"));
    }

    #[test]
    fn reads_overrides_from_environment() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_BASE_URL_ENV, " https://notes.example.com/api/ "),
            (CACHE_DIR_ENV, "/tmp/notesflow-test"),
            (HTTP_TIMEOUT_ENV, "3"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://notes.example.com/api");
        assert_eq!(config.cache_dir, PathBuf::from("/tmp/notesflow-test"));
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[(API_BASE_URL_ENV, "   ")])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(ClientConfig::from_lookup(lookup_from(&[(API_BASE_URL_ENV, "notes.local")])).is_err());
        assert!(ClientConfig::from_lookup(lookup_from(&[(HTTP_TIMEOUT_ENV, "soon")])).is_err());
        assert!(normalize_base_url("").is_err());
    }
}
