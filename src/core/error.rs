use std::path::PathBuf;

use thiserror::Error;

pub type BlochResult<T> = Result<T, BlochError>;

#[derive(Debug, Error)]
pub enum BlochError {
    #[error("Unknown gate '{0}' (expected one of: X, Y, H)")]
    UnknownGate(String),

    #[error("Unknown action '{0}' (expected a gate, 'undo' or 'reset')")]
    UnknownAction(String),

    #[error("Config read failed for {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse failed for {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
