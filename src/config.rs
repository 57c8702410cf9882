use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::scoring::{DiversityConfig, ScoreWeights};

pub const DEFAULT_CONFIG_PATH: &str = "config/recommender.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineLimits {
    pub selected_count: usize,
    pub max_candidates: usize,
    pub recent_watch_limit: usize,
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self {
            selected_count: 50,
            max_candidates: 50_000,
            recent_watch_limit: 50,
        }
    }
}

impl PipelineLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("limits.selected_count", self.selected_count),
            ("limits.max_candidates", self.max_candidates),
            ("limits.recent_watch_limit", self.recent_watch_limit),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidCount { name });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub weights: ScoreWeights,
    pub diversity: DiversityConfig,
    pub limits: PipelineLimits,
}

impl PipelineConfig {
    /// Loads config from `path`, the `APERTURE_CONFIG_PATH` env var, or
    /// `config/recommender.toml`, then applies env overrides and validates.
    ///
    /// Only a missing built-in default file yields defaults; a missing path
    /// given by argument or env var is an error. The returned path is the
    /// file that was read, if any.
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let (config_path, explicit) = match path.or_else(env_config_path) {
            Some(path) => (path, true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let (mut config, loaded_from) = if config_path.exists() {
            (Self::read(&config_path)?, Some(config_path))
        } else if explicit {
            return Err(ConfigError::NotFound(config_path));
        } else {
            (PipelineConfig::default(), None)
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok((config, loaded_from))
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(write_err)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        self.diversity.validate()?;
        self.limits.validate()
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = env_value("APERTURE_SIMILARITY_WEIGHT")? {
            self.weights.similarity = value;
        }
        if let Some(value) = env_value("APERTURE_NOVELTY_WEIGHT")? {
            self.weights.novelty = value;
        }
        if let Some(value) = env_value("APERTURE_RATING_WEIGHT")? {
            self.weights.rating = value;
        }
        if let Some(value) = env_value("APERTURE_DIVERSITY_WEIGHT")? {
            self.diversity.weight = value;
        }
        if let Some(value) = env_value("APERTURE_NETWORK_DIVERSITY")? {
            self.diversity.use_network_diversity = value;
        }
        if let Some(value) = env_value("APERTURE_SELECTED_COUNT")? {
            self.limits.selected_count = value;
        }
        if let Some(value) = env_value("APERTURE_MAX_CANDIDATES")? {
            self.limits.max_candidates = value;
        }
        if let Some(value) = env_value("APERTURE_RECENT_WATCH_LIMIT")? {
            self.limits.recent_watch_limit = value;
        }
        Ok(())
    }
}

fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                key: key.to_string(),
                value: raw,
            }),
        _ => Ok(None),
    }
}

fn env_config_path() -> Option<PathBuf> {
    env::var("APERTURE_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}
