use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write config file {path}: {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("could not determine a config directory")]
    NoConfigDir,

    #[error("invalid value {value:?} for environment variable {name}")]
    InvalidEnvVar { name: &'static str, value: String },

    #[error("reload interval must be at least 1 second, got {0}")]
    InvalidReloadInterval(u64),
}

impl ConfigError {
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::ReadError { .. } => "ReadError",
            ConfigError::WriteError { .. } => "WriteError",
            ConfigError::ParseError(_) => "ParseError",
            ConfigError::SerializeError(_) => "SerializeError",
            ConfigError::NoConfigDir => "NoConfigDir",
            ConfigError::InvalidEnvVar { .. } => "InvalidEnvVar",
            ConfigError::InvalidReloadInterval(_) => "InvalidReloadInterval",
        }
    }
}

#[derive(Error, Debug)]
pub enum AdsError {
    #[error("could not read ads file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ads file: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl AdsError {
    pub fn kind(&self) -> &'static str {
        match self {
            AdsError::ReadError { .. } => "ReadError",
            AdsError::ParseError(_) => "ParseError",
        }
    }
}
