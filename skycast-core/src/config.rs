use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment override for the proxy base URL, checked once at startup.
pub const BASE_URL_ENV: &str = "SKYCAST_BASE_URL";

const DEFAULT_FORECAST_DAYS: u8 = 3;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the weather proxy. Empty means same origin, i.e. the
    /// endpoints are reached as bare `/weather` and `/forecast` paths.
    #[serde(default)]
    pub base_url: String,

    /// Number of forecast days requested per search.
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
}

fn default_forecast_days() -> u8 {
    DEFAULT_FORECAST_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self { base_url: String::new(), forecast_days: DEFAULT_FORECAST_DAYS }
    }
}

impl Config {
    /// Load config from disk (empty default if the file doesn't exist yet),
    /// then apply the `SKYCAST_BASE_URL` environment override.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            cfg.base_url = base_url;
        }
        Ok(cfg)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
