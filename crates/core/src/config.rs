//! Configuration loading
//!
//! Settings are read once at startup from a TOML file. When no path is given
//! explicitly, `s3config.toml` in the working directory is tried first, then
//! `~/.config/s3-client/s3config.toml`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// File name probed in each search location
pub const CONFIG_FILE_NAME: &str = "s3config.toml";

/// Directory under `~/.config` holding the per-user configuration
pub const CONFIG_DIR_NAME: &str = "s3-client";

const NOT_FOUND_HINT: &str = "No config file found. Please specify a config file using -config \
     or create one in the default locations.";

/// Default bound for the post-delete existence waiter
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 60;

/// The SDK waiter polls no faster than every few seconds; shorter bounds are raised to this
pub const MIN_WAIT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the target bucket
#[derive(Clone)]
pub struct Settings {
    /// Access key ID
    pub access_key_id: String,

    /// Secret access key
    pub secret_access_key: String,

    /// Region; empty defers to the SDK's region chain
    pub region: String,

    /// Bucket all operations act on
    pub bucket: String,

    /// Endpoint URL overriding the SDK's endpoint resolution
    pub endpoint: String,

    /// Public URL prefix reported after an upload
    pub return_url: String,

    /// Upper bound on waiting for a deleted object to disappear
    pub wait_timeout_secs: u64,
}

/// On-disk layout; both spellings of each key may appear
#[derive(Deserialize)]
struct RawSettings {
    aws_access_key_id: Option<String>,
    access_key_id: Option<String>,
    aws_secret_access_key: Option<String>,
    secret_access_key: Option<String>,
    #[serde(default)]
    region: String,
    #[serde(default)]
    bucket: String,
    #[serde(default)]
    endpoint: String,
    #[serde(default, rename = "returnurl")]
    return_url: String,
    #[serde(default = "default_wait_timeout")]
    wait_timeout_secs: u64,
}

fn default_wait_timeout() -> u64 {
    DEFAULT_WAIT_TIMEOUT_SECS
}

/// The `aws_`-prefixed key wins when it is set and non-empty
fn prefer_prefixed(prefixed: Option<String>, plain: Option<String>) -> String {
    prefixed
        .filter(|v| !v.is_empty())
        .or(plain)
        .unwrap_or_default()
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawSettings =
            toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))?;

        if raw.bucket.trim().is_empty() {
            return Err(Error::ConfigParse("missing required key `bucket`".into()));
        }

        Ok(Self {
            access_key_id: prefer_prefixed(raw.aws_access_key_id, raw.access_key_id),
            secret_access_key: prefer_prefixed(raw.aws_secret_access_key, raw.secret_access_key),
            region: raw.region,
            bucket: raw.bucket,
            endpoint: raw.endpoint,
            return_url: raw.return_url,
            wait_timeout_secs: raw.wait_timeout_secs,
        })
    }

    /// Whether both static credentials are present
    pub fn has_static_credentials(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }

    /// Effective waiter bound
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs.max(MIN_WAIT_TIMEOUT_SECS))
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("return_url", &self.return_url)
            .field("wait_timeout_secs", &self.wait_timeout_secs)
            .finish()
    }
}

/// Locates and parses the configuration file
#[derive(Debug)]
pub struct ConfigLoader {
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader probing the default locations
    pub fn new() -> Self {
        let mut search_paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(home) = dirs::home_dir() {
            search_paths.push(
                home.join(".config")
                    .join(CONFIG_DIR_NAME)
                    .join(CONFIG_FILE_NAME),
            );
        }
        Self { search_paths }
    }

    /// Create a loader with custom search locations (useful for testing)
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Locations probed when no explicit path is given, in order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Resolve the configuration file to read
    pub fn resolve(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok(path.to_path_buf());
            }
            return Err(Error::ConfigNotFound(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        self.search_paths
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| Error::ConfigNotFound(NOT_FOUND_HINT.into()))
    }

    /// Resolve and parse the configuration file
    pub fn load(&self, explicit: Option<&Path>) -> Result<(PathBuf, Settings)> {
        let path = self.resolve(explicit)?;
        tracing::debug!(path = %path.display(), "reading config file");

        let content = std::fs::read_to_string(&path)
            .map_err(|e| Error::ConfigParse(format!("{}: {e}", path.display())))?;
        let settings = Settings::from_toml_str(&content)
            .map_err(|e| match e {
                Error::ConfigParse(msg) => Error::ConfigParse(format!("{}: {msg}", path.display())),
                other => other,
            })?;

        Ok((path, settings))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
