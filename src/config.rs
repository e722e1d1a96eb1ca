//! Runtime configuration.
//!
//! Loaded from TOML; every field has a default so an absent file is valid.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = "mcp-report";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.weather.gov".to_string()
}

fn default_user_agent() -> String {
    "weather-app/1.0".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Month vocabulary used when renaming files by month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Names recognized inside file names, matched case-insensitively.
    #[serde(default = "default_month_names")]
    pub month_names: Vec<String>,
    /// Replacement names, January first. Must hold exactly twelve entries.
    #[serde(default = "default_target_months")]
    pub target_months: Vec<String>,
}

fn default_month_names() -> Vec<String> {
    [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_target_months() -> Vec<String> {
    [
        "ENERO",
        "FEBRERO",
        "MARZO",
        "ABRIL",
        "MAYO",
        "JUNIO",
        "JULIO",
        "AGOSTO",
        "SEPTIEMBRE",
        "OCTUBRE",
        "NOVIEMBRE",
        "DICIEMBRE",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            month_names: default_month_names(),
            target_months: default_target_months(),
        }
    }
}

impl LocaleConfig {
    /// Target name for a 1-based month number.
    pub fn target_month(&self, month: u32) -> Option<&str> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.target_months.get(index).map(String::as_str)
    }
}

impl AppConfig {
    /// Load from an explicit path, the per-user config file, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.is_file()),
        };

        let config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.weather.api_base.trim().is_empty() {
            bail!("weather.api_base must not be empty");
        }
        if self.locale.month_names.is_empty() {
            bail!("locale.month_names must not be empty");
        }
        if self.locale.target_months.len() != 12 {
            bail!(
                "locale.target_months must list 12 months, got {}",
                self.locale.target_months.len()
            );
        }
        Ok(())
    }
}
