use std::path::Path;

use crate::Result;
use crate::error::Error as ToasterError;
use crate::options::ToasterOptions;

mod defaults;
mod env;
mod raw;
mod serde;

#[derive(Debug, Clone)]
pub struct Config {
    pub toaster: ToasterOptions,
    /// Capacity of the interaction queue feeding the render surface.
    pub queue_bound: usize,
    pub desktop: DesktopSettings,
}

/// Mirroring of toasts to desktop notifications.
#[derive(Debug, Clone)]
pub struct DesktopSettings {
    pub enabled: bool,
    pub appname: String,
    /// How many transition keys to remember when de-duplicating.
    pub seen_cache_size: usize,
}

impl Config {
    /// Load configuration from a file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when `required` is set and the file is missing, when
    /// the file cannot be parsed, when environment overrides are invalid, or
    /// when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>, required: bool) -> Result<Self> {
        let mut raw = raw::load(path, required).map_err(ToasterError::from)?;
        raw.apply_env_overrides().map_err(ToasterError::from)?;
        raw.validate_and_build()
    }

    /// Load configuration from TOML text alone, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the text cannot be parsed or fails validation.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        raw::load_str(contents)
            .map_err(ToasterError::from)?
            .validate_and_build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toaster: ToasterOptions::default(),
            queue_bound: 64,
            desktop: DesktopSettings {
                enabled: false,
                appname: "Toaster".to_string(),
                seen_cache_size: 256,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::error::{ConfigError, Error};
    use crate::options::{AutoDismiss, ToasterOptions};
    use crate::types::ToastPosition;
    use std::time::Duration;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.toaster, ToasterOptions::default());
        assert_eq!(config.queue_bound, Config::default().queue_bound);
        assert!(!config.desktop.enabled);
    }

    #[test]
    fn reads_toaster_section() {
        let config = Config::from_toml_str(
            r#"
            [toaster]
            duration = "1500ms"
            position = "top_right"
            pause_on_hover = false
            global_mount = false
            component = "fancy"

            [desktop]
            enabled = true
            appname = "Demo"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.toaster.toast.duration,
            AutoDismiss::After(Duration::from_millis(1500))
        );
        assert_eq!(config.toaster.toast.position, ToastPosition::TopRight);
        assert!(!config.toaster.toast.pause_on_hover);
        assert!(!config.toaster.global_mount);
        assert_eq!(config.toaster.toast.component.as_deref(), Some("fancy"));
        assert!(config.desktop.enabled);
        assert_eq!(config.desktop.appname, "Demo");
    }

    #[test]
    fn zero_duration_means_never() {
        let config = Config::from_toml_str("[toaster]\nduration = 0\n").unwrap();
        assert_eq!(config.toaster.toast.duration, AutoDismiss::Never);
    }

    #[test]
    fn rejects_unknown_position() {
        let err = Config::from_toml_str("[toaster]\nposition = \"middle\"\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidField {
                field: "toaster.position",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_queue_bound() {
        let err = Config::from_toml_str("[app]\nqueue_bound = 0\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidField {
                field: "app.queue_bound",
                ..
            })
        ));
    }

    #[test]
    fn missing_required_file_is_reported() {
        let err = Config::from_env_and_file("/nonexistent/toaster.toml", true).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::FileRead { .. })));
    }
}
