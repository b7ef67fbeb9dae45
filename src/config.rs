use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::{Season, Weather};
use crate::error::ConfigError;

pub const ENV_SEED: &str = "SKYWRITE_SEED";
pub const ENV_ADS: &str = "SKYWRITE_ADS";

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub ads: AdsConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SceneConfig {
    #[serde(default = "default_weather")]
    pub weather: Weather,
    #[serde(default = "default_season")]
    pub season: Season,
    /// Fixed simulation seed; omitted means a fresh seed per launch.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub hide_hud: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AdsConfig {
    /// JSON file holding the advertisement bookings. When unset the
    /// built-in samples fly instead.
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default = "default_reload_secs")]
    pub reload_secs: u64,
}

pub fn default_weather() -> Weather {
    Weather::Clear
}

pub fn default_season() -> Season {
    Season::Summer
}

fn default_reload_secs() -> u64 {
    5
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            weather: default_weather(),
            season: default_season(),
            seed: None,
            hide_hud: false,
        }
    }
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            file: None,
            reload_secs: default_reload_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            eprintln!(
                "Warning: Config file not found. Create one at {:?} to customize settings.",
                config_path
            );
            let mut config = Self::default();
            config.apply_env_overrides()?;
            return Ok(config);
        }

        let mut config = Self::load_from_path(&config_path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(ENV_SEED) {
            let seed = val
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: ENV_SEED,
                    value: val.clone(),
                })?;
            self.scene.seed = Some(seed);
        }

        if let Ok(val) = env::var(ENV_ADS) {
            self.ads.file = Some(PathBuf::from(val));
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ads.reload_secs == 0 {
            return Err(ConfigError::InvalidReloadInterval(self.ads.reload_secs));
        }

        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(ConfigError::ParseError)
    }

    pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            dirs::config_dir()
                .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
                .ok_or(ConfigError::NoConfigDir)?
        };

        Ok(config_dir.join("skywrite"))
    }

    pub fn get_config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.display().to_string(),
            source: e,
        })
    }
}
