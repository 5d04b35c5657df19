//! # Sync Configuration
//!
//! Configuration for the remote source, the scheduler and the status line.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     QUOTEBOARD_REMOTE_URL=https://example.com/posts                    │
//! │     QUOTEBOARD_SYNC_INTERVAL_SECS=60                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/quoteboard/quoteboard.toml (Linux)                       │
//! │     ~/Library/Application Support/dev.quoteboard.quoteboard/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [remote]
//! url = "https://jsonplaceholder.typicode.com/posts"
//! fetch_limit = 5
//! timeout_secs = 10
//!
//! [sync]
//! enabled = true
//! interval_secs = 30
//!
//! [notification]
//! clear_after_ms = 3000
//!
//! [storage]
//! database_path = "/var/lib/quoteboard/quoteboard.db"
//! ```

use quoteboard_core::{
    DEFAULT_FETCH_LIMIT, DEFAULT_REMOTE_TIMEOUT_SECS, DEFAULT_SYNC_INTERVAL_SECS,
    NOTIFICATION_CLEAR_MS,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{SyncError, SyncResult};

/// Remote endpoint used when nothing is configured.
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "quoteboard.toml";

// =============================================================================
// Remote Settings
// =============================================================================

/// Where candidates come from and where new quotes are submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    /// Endpoint for both GET (fetch) and POST (submit).
    #[serde(default = "default_remote_url")]
    pub url: String,

    /// Number of remote records consumed per fetch.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Per-request timeout (seconds). Expiry counts as unavailable.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_remote_url() -> String {
    DEFAULT_REMOTE_URL.to_string()
}

fn default_fetch_limit() -> usize {
    DEFAULT_FETCH_LIMIT
}

fn default_timeout() -> u64 {
    DEFAULT_REMOTE_TIMEOUT_SECS
}

impl RemoteSettings {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RemoteSettings {
    fn default() -> Self {
        RemoteSettings {
            url: default_remote_url(),
            fetch_limit: default_fetch_limit(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Sync Settings
// =============================================================================

/// Periodic reconciliation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Whether the periodic scheduler runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Interval between reconciliation cycles (seconds).
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_interval() -> u64 {
    DEFAULT_SYNC_INTERVAL_SECS
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            enabled: true,
            interval_secs: default_interval(),
        }
    }
}

// =============================================================================
// Notification / Storage Settings
// =============================================================================

/// Status line settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// How long a message stays visible (milliseconds).
    #[serde(default = "default_clear_after")]
    pub clear_after_ms: u64,
}

fn default_clear_after() -> u64 {
    NOTIFICATION_CLEAR_MS
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            clear_after_ms: default_clear_after(),
        }
    }
}

/// Local Store location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Explicit database file. `None` uses the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

// =============================================================================
// Main Sync Configuration
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Remote source settings.
    #[serde(default)]
    pub remote: RemoteSettings,

    /// Scheduler settings.
    #[serde(default)]
    pub sync: SyncSettings,

    /// Status line settings.
    #[serde(default)]
    pub notification: NotificationSettings,

    /// Local Store settings.
    #[serde(default)]
    pub storage: StorageSettings,
}

impl SyncConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (quoteboard.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`SyncConfig::load`] with `lookup` standing in for the environment.
    pub fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| SyncError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        let url = url::Url::parse(&self.remote.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SyncError::InvalidUrl(format!(
                "Remote URL must start with http:// or https://, got: {}",
                self.remote.url
            )));
        }

        if self.remote.fetch_limit == 0 {
            return Err(SyncError::InvalidConfig(
                "fetch_limit must be greater than 0".into(),
            ));
        }

        if self.remote.timeout_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.sync.interval_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "interval_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `QUOTEBOARD_*` overrides read through `lookup`.
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("QUOTEBOARD_REMOTE_URL") {
            debug!(url = %url, "Overriding remote URL from environment");
            self.remote.url = url;
        }

        if let Some(limit) = lookup("QUOTEBOARD_FETCH_LIMIT") {
            match limit.parse::<usize>() {
                Ok(n) => self.remote.fetch_limit = n,
                Err(_) => warn!(value = %limit, "Ignoring invalid QUOTEBOARD_FETCH_LIMIT"),
            }
        }

        if let Some(timeout) = lookup("QUOTEBOARD_REMOTE_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(n) => self.remote.timeout_secs = n,
                Err(_) => warn!(value = %timeout, "Ignoring invalid QUOTEBOARD_REMOTE_TIMEOUT_SECS"),
            }
        }

        if let Some(interval) = lookup("QUOTEBOARD_SYNC_INTERVAL_SECS") {
            match interval.parse::<u64>() {
                Ok(n) => {
                    debug!(interval_secs = n, "Overriding sync interval from environment");
                    self.sync.interval_secs = n;
                }
                Err(_) => warn!(value = %interval, "Ignoring invalid QUOTEBOARD_SYNC_INTERVAL_SECS"),
            }
        }

        if let Some(enabled) = lookup("QUOTEBOARD_SYNC_ENABLED") {
            match enabled.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.sync.enabled = true,
                "0" | "false" | "no" | "off" => self.sync.enabled = false,
                _ => warn!(value = %enabled, "Unknown QUOTEBOARD_SYNC_ENABLED value"),
            }
        }

        if let Some(path) = lookup("QUOTEBOARD_DB_PATH") {
            self.storage.database_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "quoteboard", "quoteboard")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Interval between scheduler ticks.
    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync.interval_secs)
    }

    /// How long a notification stays visible.
    pub fn notification_clear_after(&self) -> Duration {
        Duration::from_millis(self.notification.clear_after_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.remote.url, DEFAULT_REMOTE_URL);
        assert_eq!(config.remote.fetch_limit, 5);
        assert_eq!(config.sync_interval(), Duration::from_secs(30));
        assert_eq!(config.notification_clear_after(), Duration::from_millis(3000));
        assert_eq!(config.remote.timeout(), Duration::from_secs(10));
        assert!(config.sync.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SyncConfig::default();

        config.remote.url = "ws://localhost:8080".into();
        assert!(matches!(config.validate(), Err(SyncError::InvalidUrl(_))));

        config.remote.url = "not a url".into();
        assert!(matches!(config.validate(), Err(SyncError::InvalidUrl(_))));

        config.remote.url = "http://localhost:8080/posts".into();
        assert!(config.validate().is_ok());

        config.remote.fetch_limit = 0;
        assert!(matches!(config.validate(), Err(SyncError::InvalidConfig(_))));
        config.remote.fetch_limit = 5;

        config.sync.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: SyncConfig = toml::from_str(
            r#"
            [sync]
            interval_secs = 90
            "#,
        )
        .unwrap();

        assert_eq!(config.sync.interval_secs, 90);
        assert!(config.sync.enabled);
        assert_eq!(config.remote, RemoteSettings::default());
        assert_eq!(config.storage.database_path, None);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = SyncConfig::default();
        config.sync.interval_secs = 45;
        config.remote.url = "https://quotes.example.com/posts".into();
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[remote]"));
        assert!(contents.contains("[sync]"));

        let parsed: SyncConfig = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_malformed_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[sync\ninterval_secs = ").unwrap();

        assert!(matches!(
            SyncConfig::load_with(Some(path.clone()), no_env),
            Err(SyncError::ConfigLoadFailed(_))
        ));
        assert_eq!(SyncConfig::load_or_default(Some(path)).sync.interval_secs, 30);
    }

    #[test]
    fn test_env_overrides_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"
            [remote]
            url = "https://file.example.com/posts"
            fetch_limit = 3

            [sync]
            interval_secs = 90
            "#,
        )
        .unwrap();

        let from_file = SyncConfig::load_with(Some(path.clone()), no_env).unwrap();
        assert_eq!(from_file.remote.url, "https://file.example.com/posts");
        assert_eq!(from_file.remote.fetch_limit, 3);
        assert_eq!(from_file.sync.interval_secs, 90);
        assert_eq!(from_file.remote.timeout_secs, 10);

        let env = env_of(&[
            ("QUOTEBOARD_REMOTE_URL", "http://env.example.com/posts"),
            ("QUOTEBOARD_SYNC_INTERVAL_SECS", "15"),
            ("QUOTEBOARD_SYNC_ENABLED", "off"),
            ("QUOTEBOARD_DB_PATH", "/tmp/env.db"),
        ]);
        let config = SyncConfig::load_with(Some(path), env).unwrap();

        assert_eq!(config.remote.url, "http://env.example.com/posts");
        assert_eq!(config.sync.interval_secs, 15);
        assert!(!config.sync.enabled);
        assert_eq!(config.storage.database_path, Some(PathBuf::from("/tmp/env.db")));
        // Untouched by env, still from the file
        assert_eq!(config.remote.fetch_limit, 3);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let mut config = SyncConfig::default();
        config.sync.interval_secs = 45;

        config.apply_overrides(env_of(&[
            ("QUOTEBOARD_FETCH_LIMIT", "many"),
            ("QUOTEBOARD_REMOTE_TIMEOUT_SECS", "-1"),
            ("QUOTEBOARD_SYNC_INTERVAL_SECS", "soon"),
            ("QUOTEBOARD_SYNC_ENABLED", "maybe"),
        ]));

        assert_eq!(config.remote.fetch_limit, 5);
        assert_eq!(config.remote.timeout_secs, 10);
        assert_eq!(config.sync.interval_secs, 45);
        assert!(config.sync.enabled);
    }

    #[test]
    fn test_env_value_still_validated() {
        let env = env_of(&[("QUOTEBOARD_SYNC_INTERVAL_SECS", "0")]);
        assert!(matches!(
            SyncConfig::load_with(Some(PathBuf::from("/nonexistent/quoteboard.toml")), env),
            Err(SyncError::InvalidConfig(_))
        ));
    }
}
