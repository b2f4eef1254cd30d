use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no toaster installed on this application; call `Toaster::install` first")]
    NotInstalled,
    #[error("toaster must be created inside a tokio runtime")]
    NoRuntime,
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification backend failed: {0}")]
    Backend(String),
    #[error("invalid notification payload: {0}")]
    InvalidPayload(String),
}

impl Error {
    /// Whether the caller forgot to install the toaster, as opposed to a
    /// configuration or runtime problem.
    #[must_use]
    pub const fn is_not_installed(&self) -> bool {
        matches!(self, Self::NotInstalled)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Error};

    #[test]
    fn config_errors_are_transparent() {
        let err = Error::from(ConfigError::InvalidField {
            field: "toaster.position",
            message: "unknown position: middle".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "invalid configuration for toaster.position: unknown position: middle"
        );
        assert!(!err.is_not_installed());
        assert!(Error::NotInstalled.is_not_installed());
    }
}
