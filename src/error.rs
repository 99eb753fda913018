use memory_common::BoardError;
use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("session config error: {0}")]
    Session(#[from] BoardError),
}

/// Errors that end the program.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("could not start session: {0}")]
    Session(#[from] BoardError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
