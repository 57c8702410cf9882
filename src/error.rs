use std::path::PathBuf;

/// Problems loading or validating a [`crate::config::PipelineConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },

    #[error("invalid weight {name}: {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("{name} must be greater than zero")]
    InvalidCount { name: &'static str },
}

/// A candidate that fails boundary validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("candidate id must not be empty")]
    EmptyId,

    #[error("duplicate candidate id: {0}")]
    DuplicateId(String),

    #[error("candidate {id} has similarity {value} outside [0, 1]")]
    InvalidSimilarity { id: String, value: f64 },

    #[error("candidate {id} has non-finite community rating {value}")]
    InvalidRating { id: String, value: f64 },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("selection count must be greater than zero")]
    InvalidCount,

    #[error("duplicate candidate id in selection pool: {0}")]
    DuplicateId(String),
}

#[derive(thiserror::Error, Debug)]
pub enum RecommendError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}
