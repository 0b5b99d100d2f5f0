use thiserror::Error;

/// Errors emitted while reading or writing the shell configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("shell config IO failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("shell config JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}
