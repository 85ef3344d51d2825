//! Configuration management for ascii-art
//!
//! Config file location:
//! - Linux: ~/.config/ascii-art/config.toml
//! - macOS: ~/Library/Application Support/ascii-art/config.toml
//! - Windows: %APPDATA%/ascii-art/config.toml
//!
//! You can override the config location by setting `ASCII_ART_CONFIG_PATH`.

use anyhow::{bail, Context, Result};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generation service configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Typewriter title settings
    #[serde(default)]
    pub title: TitleConfig,

    /// Styles offered by the style selector
    #[serde(default)]
    pub styles: StylesConfig,

    /// Where downloaded art goes
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from file or create default
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

            let config: Config = toml::from_str(&content).with_context(|| {
                format!("Failed to parse config from {}", config_path.display())
            })?;

            tracing::debug!(path = %config_path.display(), "loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, toml)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("ASCII_ART_CONFIG_PATH") {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = ProjectDirs::from("com", "ascii-art", "ascii-art")
            .context("Could not determine project directories")?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Create default config file if it doesn't exist
    pub fn init() -> Result<Self> {
        let config = Self::load()?;

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            config.save()?;
        }

        Ok(config)
    }

    /// Directory holding the TUI log file.
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "ascii-art", "ascii-art")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Load the config file, apply environment overrides and validate the result.
    pub fn load_effective() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Some(endpoint) = std::env::var("ASCII_ART_ENDPOINT")
            .ok()
            .filter(|s| !s.trim().is_empty())
        {
            self.api.endpoint = endpoint.trim().to_string();
        }

        if let Some(timeout) = std::env::var("ASCII_ART_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            self.api.timeout_seconds = timeout;
        }
    }

    /// Reject settings the animator and the style selector cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.title.titles.is_empty() {
            bail!("[title] titles must contain at least one entry");
        }
        if self.title.typing_ms <= self.title.deleting_ms {
            bail!(
                "[title] typing_ms ({}) must be greater than deleting_ms ({})",
                self.title.typing_ms,
                self.title.deleting_ms
            );
        }
        if self.title.deleting_ms == 0 {
            bail!("[title] deleting_ms must be greater than zero");
        }
        if self.styles.available.is_empty() {
            bail!("[styles] available must contain at least one style");
        }
        if self.api.endpoint.trim().is_empty() {
            bail!("[api] endpoint must not be empty");
        }
        Ok(())
    }
}

/// Generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full URL of the generate endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds (0 waits indefinitely)
    #[serde(default)]
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: 0,
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:8080/generate".to_string()
}

/// Typewriter title settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleConfig {
    #[serde(default = "default_titles")]
    pub titles: Vec<String>,

    /// Delay between revealed characters
    #[serde(default = "default_typing_ms")]
    pub typing_ms: u64,

    /// Delay between removed characters
    #[serde(default = "default_deleting_ms")]
    pub deleting_ms: u64,

    /// Hold time once a title is fully typed
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            titles: default_titles(),
            typing_ms: default_typing_ms(),
            deleting_ms: default_deleting_ms(),
            pause_ms: default_pause_ms(),
        }
    }
}

fn default_titles() -> Vec<String> {
    vec![
        "ASCII Art Generator".to_string(),
        "Create Cool Text Art!".to_string(),
    ]
}

fn default_typing_ms() -> u64 {
    200
}

fn default_deleting_ms() -> u64 {
    100
}

fn default_pause_ms() -> u64 {
    1000
}

/// Styles offered by the selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylesConfig {
    #[serde(default = "default_styles")]
    pub available: Vec<String>,

    /// Style selected at startup
    #[serde(default = "default_style")]
    pub default: String,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            available: default_styles(),
            default: default_style(),
        }
    }
}

impl StylesConfig {
    /// Index of the default style, or the first style when it isn't listed.
    pub fn default_index(&self) -> usize {
        self.available
            .iter()
            .position(|s| *s == self.default)
            .unwrap_or(0)
    }
}

fn default_styles() -> Vec<String> {
    vec![
        "standard".to_string(),
        "shadow".to_string(),
        "thinkertoy".to_string(),
    ]
}

fn default_style() -> String {
    "standard".to_string()
}

/// Export configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target directory for `ascii_art.txt` (defaults to the user's downloads)
    pub directory: Option<PathBuf>,

    /// Open the saved file with the system viewer
    #[serde(default)]
    pub open_after_save: bool,
}

impl ExportConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        if let Some(dir) = &self.directory {
            return dir.clone();
        }
        UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Get configuration file path for display purposes
pub fn get_config_path() -> Result<String> {
    let path = Config::config_path()?;
    Ok(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const ENV_VARS: [&str; 3] = [
        "ASCII_ART_CONFIG_PATH",
        "ASCII_ART_ENDPOINT",
        "ASCII_ART_TIMEOUT_SECONDS",
    ];

    // The process environment is shared between test threads.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
        let result = f();
        for name in ENV_VARS {
            std::env::remove_var(name);
        }
        result
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.endpoint, "http://localhost:8080/generate");
        assert_eq!(config.api.timeout_seconds, 0);
        assert_eq!(
            config.title.titles,
            vec!["ASCII Art Generator", "Create Cool Text Art!"]
        );
        assert_eq!(config.title.typing_ms, 200);
        assert_eq!(config.title.deleting_ms, 100);
        assert_eq!(config.title.pause_ms, 1000);
        assert_eq!(config.styles.available.len(), 3);
        assert_eq!(config.styles.default_index(), 0);
        assert!(!config.export.open_after_save);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();

        assert!(toml.contains("endpoint"));
        assert!(toml.contains("[title]"));
        assert!(toml.contains("typing_ms"));
        assert!(toml.contains("thinkertoy"));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            endpoint = "http://art.internal:9000/generate"

            [styles]
            default = "shadow"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.endpoint, "http://art.internal:9000/generate");
        assert_eq!(config.title.typing_ms, 200);
        assert_eq!(config.styles.default_index(), 1);
    }

    #[test]
    fn validation_rejects_fast_typing() {
        let mut config = Config::default();
        config.title.typing_ms = 100;
        config.title.deleting_ms = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_rejects_empty_lists() {
        let mut config = Config::default();
        config.title.titles.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.styles.available.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_default_style_selects_first() {
        let styles = StylesConfig {
            available: vec!["a".to_string(), "b".to_string()],
            default: "zzz".to_string(),
        };
        assert_eq!(styles.default_index(), 0);
    }

    #[test]
    fn missing_config_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = with_env(&[("ASCII_ART_CONFIG_PATH", path.to_str().unwrap())], || {
            assert_eq!(Config::config_path().unwrap(), path);
            Config::load().unwrap()
        });
        assert_eq!(config.api.endpoint, "http://localhost:8080/generate");
        assert_eq!(config.title.typing_ms, 200);
        assert!(!path.exists());
    }

    #[test]
    fn blank_config_path_uses_platform_location() {
        let path = with_env(&[("ASCII_ART_CONFIG_PATH", "   ")], || {
            Config::config_path().unwrap()
        });
        assert!(path.ends_with("config.toml"));
        assert!(path.parent().is_some_and(|p| !p.as_os_str().is_empty()));
    }

    #[test]
    fn init_writes_file_that_load_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ascii-art").join("config.toml");
        let loaded = with_env(&[("ASCII_ART_CONFIG_PATH", path.to_str().unwrap())], || {
            Config::init().unwrap();
            assert!(path.exists());

            let mut edited = Config::load().unwrap();
            edited.styles.default = "shadow".to_string();
            edited.save().unwrap();

            // A second init keeps the existing file.
            Config::init().unwrap();
            Config::load().unwrap()
        });
        assert_eq!(loaded.styles.default, "shadow");
        assert_eq!(loaded.title.titles, default_titles());
    }

    #[test]
    fn env_overrides_endpoint_and_timeout() {
        let mut config = Config::default();
        with_env(
            &[
                ("ASCII_ART_ENDPOINT", " http://art.test:9000/generate "),
                ("ASCII_ART_TIMEOUT_SECONDS", "15"),
            ],
            || config.apply_env_overrides(),
        );
        assert_eq!(config.api.endpoint, "http://art.test:9000/generate");
        assert_eq!(config.api.timeout_seconds, 15);
    }

    #[test]
    fn blank_or_invalid_env_overrides_are_ignored() {
        let mut config = Config::default();
        config.api.timeout_seconds = 7;
        with_env(
            &[
                ("ASCII_ART_ENDPOINT", "  "),
                ("ASCII_ART_TIMEOUT_SECONDS", "soon"),
            ],
            || config.apply_env_overrides(),
        );
        assert_eq!(config.api.endpoint, "http://localhost:8080/generate");
        assert_eq!(config.api.timeout_seconds, 7);
    }

    #[test]
    fn load_effective_rejects_fast_typing_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[title]\ntyping_ms = 100\ndeleting_ms = 150\n").unwrap();

        let result = with_env(&[("ASCII_ART_CONFIG_PATH", path.to_str().unwrap())], || {
            Config::load_effective()
        });
        let err = result.unwrap_err();
        assert!(err.to_string().contains("typing_ms"), "{err:#}");
    }

    #[test]
    fn load_effective_applies_env_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\nendpoint = \"http://from-file/generate\"\n").unwrap();

        let config = with_env(
            &[
                ("ASCII_ART_CONFIG_PATH", path.to_str().unwrap()),
                ("ASCII_ART_ENDPOINT", "http://from-env/generate"),
            ],
            Config::load_effective,
        )
        .unwrap();
        assert_eq!(config.api.endpoint, "http://from-env/generate");
    }

    #[test]
    fn explicit_export_directory_wins() {
        let export = ExportConfig {
            directory: Some(PathBuf::from("/tmp/art")),
            open_after_save: false,
        };
        assert_eq!(export.resolved_directory(), PathBuf::from("/tmp/art"));
    }
}
