//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::ClientConfig;
use crate::table::PAGE_SIZES;
use crate::view::ViewSettings;

/// Longest default window accepted from config (ten years)
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means no client-side timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Dashboard request and table defaults
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_window_days")]
    pub default_window_days: i64,

    #[serde(default = "default_tenant_limit")]
    pub tenant_limit: u32,

    #[serde(default = "default_tenant_sort")]
    pub tenant_sort: String,

    #[serde(default = "default_snapshot_page")]
    pub snapshot_page: u32,

    #[serde(default = "default_snapshot_page_size")]
    pub snapshot_page_size: u32,

    #[serde(default = "default_table_page_size")]
    pub table_page_size: usize,
}

fn default_window_days() -> i64 {
    30
}

fn default_tenant_limit() -> u32 {
    50
}

fn default_tenant_sort() -> String {
    "queries_desc".to_string()
}

fn default_snapshot_page() -> u32 {
    1
}

fn default_snapshot_page_size() -> u32 {
    25
}

fn default_table_page_size() -> usize {
    5
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_window_days: default_window_days(),
            tenant_limit: default_tenant_limit(),
            tenant_sort: default_tenant_sort(),
            snapshot_page: default_snapshot_page(),
            snapshot_page_size: default_snapshot_page_size(),
            table_page_size: default_table_page_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("querylens").join("config.toml")),
            Some(PathBuf::from("/etc/querylens/config.toml")),
            Some(PathBuf::from("./querylens.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any variable source
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("QUERYLENS_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("QUERYLENS_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.api.request_timeout_secs = Some(secs),
                Err(_) => tracing::warn!("Ignoring invalid QUERYLENS_TIMEOUT_SECS: {}", timeout),
            }
        }

        if let Some(level) = lookup("QUERYLENS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("QUERYLENS_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Reject values that would only fail later
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !PAGE_SIZES.contains(&self.dashboard.table_page_size) {
            return Err(ConfigError::Invalid(format!(
                "dashboard.table_page_size must be one of {:?}, got {}",
                PAGE_SIZES, self.dashboard.table_page_size
            )));
        }
        if !(0..=MAX_WINDOW_DAYS).contains(&self.dashboard.default_window_days) {
            return Err(ConfigError::Invalid(format!(
                "dashboard.default_window_days must be between 0 and {}, got {}",
                MAX_WINDOW_DAYS, self.dashboard.default_window_days
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be \"pretty\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            timeout: self.api.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            tenant_limit: self.dashboard.tenant_limit,
            tenant_sort: self.dashboard.tenant_sort.clone(),
            snapshot_page: self.dashboard.snapshot_page,
            snapshot_page_size: self.dashboard.snapshot_page_size,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# querylens Configuration
#
# Environment variables override these settings:
# - QUERYLENS_API_URL
# - QUERYLENS_TIMEOUT_SECS
# - QUERYLENS_LOG_LEVEL
# - QUERYLENS_LOG_FORMAT

[api]
# Analytics backend base URL
base_url = "http://localhost:8000"

# Request timeout in seconds (unset: no timeout)
# request_timeout_secs = 30

[dashboard]
# Length of the initial date window, ending today
default_window_days = 30

# Tenant list size and ordering
tenant_limit = 50
tenant_sort = "queries_desc"

# Page of users requested with each dashboard snapshot
snapshot_page = 1
snapshot_page_size = 25

# Rows per page in the user table: 5, 10, 20 or 50
table_page_size = 5

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_generated_config_round_trips() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.request_timeout_secs, None);
        assert_eq!(config.dashboard.default_window_days, 30);
        assert_eq!(config.dashboard.tenant_sort, "queries_desc");
        assert_eq!(config.dashboard.table_page_size, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://analytics.example.com\"\nrequest_timeout_secs = 10").unwrap();
        writeln!(file, "[dashboard]\ntable_page_size = 20").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://analytics.example.com");
        assert_eq!(config.dashboard.table_page_size, 20);
        assert_eq!(config.dashboard.tenant_limit, 50);
        assert_eq!(config.logging.format, "pretty");

        let client = config.client_config();
        assert_eq!(client.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_unsupported_page_size_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard]\ntable_page_size = 7").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_window_days_out_of_range_is_rejected() {
        for days in [-1, 1_000_000] {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[dashboard]\ndefault_window_days = {}", days).unwrap();
            let err = Config::load(file.path()).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("default_window_days")));
        }
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("QUERYLENS_API_URL", "http://10.0.0.5:9000"),
            ("QUERYLENS_TIMEOUT_SECS", "not-a-number"),
            ("QUERYLENS_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.api.request_timeout_secs, None);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_view_settings_follow_dashboard_section() {
        let mut config = Config::default();
        config.dashboard.tenant_limit = 10;
        config.dashboard.snapshot_page_size = 50;
        let settings = config.view_settings();
        assert_eq!(settings.tenant_limit, 10);
        assert_eq!(settings.snapshot_page_size, 50);
        assert_eq!(settings.tenant_sort, "queries_desc");
    }
}
