use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::provider::weatherapi::{DEFAULT_BASE_URL, DEFAULT_LANG};

/// Configuration stored on disk. Every field is optional; values given on the
/// command line or through the environment take precedence.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// location = "Tokyo"
/// lang = "ja"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub location: Option<String>,
    pub lang: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Values coming from CLI flags or environment variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub location: Option<String>,
    pub lang: Option<String>,
    pub base_url: Option<String>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub location: String,
    pub lang: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Load config from the default location, or return an empty default if it
    /// doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "tenki", "tenki")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Merge overrides over the stored values and fill in defaults.
    pub fn resolve(&self, overrides: Overrides) -> Result<Settings> {
        let api_key = pick(overrides.api_key, &self.api_key).ok_or_else(|| {
            anyhow!(
                "Error: no API key configured.\n\
                 Hint: set WEATHER_API_KEY or run `tenki configure`."
            )
        })?;

        let location = pick(overrides.location, &self.location).ok_or_else(|| {
            anyhow!(
                "Error: no location configured.\n\
                 Hint: set WEATHER_API_LOCATION or run `tenki configure`."
            )
        })?;

        Ok(Settings {
            api_key,
            location,
            lang: pick(overrides.lang, &self.lang).unwrap_or_else(|| DEFAULT_LANG.to_string()),
            base_url: pick(overrides.base_url, &self.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs),
        })
    }
}

/// First non-blank value, override before stored.
fn pick(over: Option<String>, stored: &Option<String>) -> Option<String> {
    over.into_iter()
        .chain(stored.clone())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
