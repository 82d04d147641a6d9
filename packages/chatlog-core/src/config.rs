//! Viewer configuration
//!
//! Resolution order: built-in defaults, then the config file, then
//! environment variables, then explicit overrides from the command line.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::theme::ThemeMode;
use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const CONFIG_FILE_ENV: &str = "CHATLOG_CONFIG";
const BASE_URL_ENV: &str = "CHATLOG_BASE_URL";
const THEME_ENV: &str = "CHATLOG_THEME";

/// Runtime configuration injected at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Base URL of the conversation server
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Delay before scrolling the message list to the newest message
    pub scroll_settle_ms: u64,
    /// Initial display mode
    pub theme: ThemeMode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 15,
            scroll_settle_ms: 50,
            theme: ThemeMode::Light,
        }
    }
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub theme: Option<ThemeMode>,
}

impl ViewerConfig {
    /// Load the full configuration stack for this process.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = match env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(path.trim()))?,
            _ => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_vars(|key| env::var(key).ok())?;
        config.apply_overrides(overrides);
        config.validate()?;

        tracing::debug!("Loaded config: base_url={}, theme={}", config.base_url, config.theme);
        Ok(config)
    }

    /// Default config file location.
    ///
    /// Linux: `~/.config/chatlog/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "chatlog")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Read a TOML config file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))
    }

    /// Apply environment-style variables. Blank values are ignored.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_blank(BASE_URL_ENV) {
            self.base_url = url.trim().to_string();
        }
        if let Some(theme) = non_blank(THEME_ENV) {
            self.theme = theme.parse()?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.base_url {
            self.base_url = url.clone();
        }
        if let Some(theme) = overrides.theme {
            self.theme = theme;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{}: base URL must use http or https",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config("request_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.scroll_settle(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ViewerConfig::from_toml(
            r#"
            base_url = "http://chat.example.com:5000"
            theme = "dark"
            "#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://chat.example.com:5000");
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn test_malformed_toml() {
        let result = ViewerConfig::from_toml("base_url = [");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scroll_settle_ms = 120").unwrap();

        let config = ViewerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scroll_settle_ms, 120);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ViewerConfig::from_file(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_precedence() {
        let mut config = ViewerConfig::from_toml(r#"base_url = "http://file:5000""#).unwrap();

        config
            .apply_vars(vars(&[("CHATLOG_BASE_URL", "http://env:5000"), ("CHATLOG_THEME", "dark")]))
            .unwrap();
        assert_eq!(config.base_url, "http://env:5000");
        assert_eq!(config.theme, ThemeMode::Dark);

        config.apply_overrides(&ConfigOverrides {
            base_url: Some("http://cli:5000".to_string()),
            theme: None,
        });
        assert_eq!(config.base_url, "http://cli:5000");
        assert_eq!(config.theme, ThemeMode::Dark);
    }

    #[test]
    fn test_blank_env_ignored() {
        let mut config = ViewerConfig::default();
        config.apply_vars(vars(&[("CHATLOG_BASE_URL", "   ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_bad_theme_env() {
        let mut config = ViewerConfig::default();
        let result = config.apply_vars(vars(&[("CHATLOG_THEME", "purple")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = ViewerConfig::default();
        config.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        config.base_url = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));
    }
}
