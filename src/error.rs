use std::path::PathBuf;

use thiserror::Error;

/// Failures outside the simulation loop. The per-frame core never returns
/// these; they come from loading and validating configuration.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed balance config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, GameError>;
