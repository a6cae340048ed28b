use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::core::{ThemeMode, DEFAULT_SEED_URL, DEFAULT_TOAST_DURATION};
use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// First-run seed fetch
    pub seed: SeedConfig,
    /// Toast notifications
    pub toasts: ToastConfig,
    /// Theme used when none has been saved yet
    pub default_theme: ThemeMode,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub enabled: bool,
    pub url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct ToastConfig {
    pub duration: Duration,
    pub max_visible: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: SeedConfig {
                enabled: true,
                url: DEFAULT_SEED_URL.to_string(),
                timeout: Duration::from_secs(10),
            },
            toasts: ToastConfig {
                duration: DEFAULT_TOAST_DURATION,
                max_visible: 5,
            },
            default_theme: ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlSeedConfig {
    pub enabled: Option<bool>,
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlToastConfig {
    pub duration_ms: Option<u64>,
    pub max_visible: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlThemeConfig {
    pub default: Option<ThemeMode>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub seed: Option<TomlSeedConfig>,
    pub toasts: Option<TomlToastConfig>,
    pub theme: Option<TomlThemeConfig>,
}

impl Config {
    /// Load from ~/.userdeck/config.toml, writing the example file on first run.
    ///
    /// A missing or malformed file leaves the defaults in place.
    pub fn load() -> Self {
        let config_file = config_path();

        if !config_file.exists() {
            Self::create_default_config(&config_file);
        }

        match Self::load_from(&config_file) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(
                    path = %config_file.display(),
                    error = %e,
                    "Using default configuration"
                );
                Config::default()
            }
        }
    }

    /// Load from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Overlay TOML contents on the defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let toml_config: TomlConfig = toml::from_str(contents)?;
        let mut config = Config::default();

        if let Some(seed) = toml_config.seed {
            if let Some(enabled) = seed.enabled {
                config.seed.enabled = enabled;
            }
            if let Some(url) = seed.url {
                config.seed.url = url;
            }
            if let Some(secs) = seed.timeout_secs {
                config.seed.timeout = Duration::from_secs(secs);
            }
        }

        if let Some(toasts) = toml_config.toasts {
            if let Some(ms) = toasts.duration_ms {
                config.toasts.duration = Duration::from_millis(ms);
            }
            if let Some(max_visible) = toasts.max_visible {
                config.toasts.max_visible = max_visible;
            }
        }

        if let Some(default) = toml_config.theme.and_then(|t| t.default) {
            config.default_theme = default;
        }

        Ok(config)
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!(error = %e, "Failed to create config directory");
                return;
            }
        }

        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            tracing::warn!(error = %e, "Failed to write default config");
        }
    }

    pub fn with_seed_url(mut self, url: impl Into<String>) -> Self {
        self.seed.url = url.into();
        self
    }

    pub fn with_seed_enabled(mut self, enabled: bool) -> Self {
        self.seed.enabled = enabled;
        self
    }
}
