use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf, time::Duration};

use crate::provider::openweather::OpenWeatherSettings;

/// Overrides `api_key` from the config file.
pub const API_KEY_ENV: &str = "TENKI_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_LANG: &str = "ja";

fn default_country() -> String {
    "JP".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retries() -> u32 {
    1
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// lang = "ja"
/// country = "JP"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Language of forecast descriptions; falls back to the host locale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    /// Country code appended to named queries.
    #[serde(default = "default_country")]
    pub country: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after a transport error or a 5xx response.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            lang: None,
            country: default_country(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            retries: default_retries(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

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

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "tenki", "tenki")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Client settings, taking the API key and locale from the environment.
    pub fn source_settings(&self) -> Result<OpenWeatherSettings> {
        let env_key = env::var(API_KEY_ENV).ok();
        let locale = env::var("LC_ALL")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| env::var("LANG").ok());

        self.source_settings_with(env_key, locale.as_deref())
    }

    pub fn source_settings_with(
        &self,
        env_key: Option<String>,
        locale: Option<&str>,
    ) -> Result<OpenWeatherSettings> {
        let api_key = env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `tenki configure` or set {API_KEY_ENV}."
                )
            })?;

        let lang = self
            .lang
            .clone()
            .unwrap_or_else(|| lang_from_locale(locale));

        Ok(OpenWeatherSettings {
            api_key,
            lang,
            country: self.country.clone(),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
            retries: self.retries,
        })
    }
}

/// Language code from a POSIX locale such as `ja_JP.UTF-8`.
pub fn lang_from_locale(locale: Option<&str>) -> String {
    locale
        .and_then(|l| l.split(['_', '.', '@']).next())
        .filter(|l| !l.is_empty() && *l != "C" && *l != "POSIX")
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_LANG.to_string())
}
