use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;
use crate::options::{AutoDismiss, ToastOptions, ToasterOptions};
use crate::types::ToastPosition;

use super::defaults::{
    default_desktop_appname, default_position, default_queue_bound, default_seen_cache_size,
    default_true,
};
use super::env::{env_bool, env_dismiss, env_parse, env_string};
use super::serde::DismissAfter;
use super::{Config, DesktopSettings};

pub(super) fn load(
    path: impl AsRef<Path>,
    required: bool,
) -> std::result::Result<RawConfig, ConfigError> {
    let path = path.as_ref();
    if required && !path.exists() {
        return Err(ConfigError::FileRead {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
    }
    let builder = ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            ::config::Environment::with_prefix("TOASTER")
                .separator("__")
                .try_parsing(true),
        );

    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

pub(super) fn load_str(contents: &str) -> std::result::Result<RawConfig, ConfigError> {
    ::config::Config::builder()
        .add_source(::config::File::from_str(
            contents,
            ::config::FileFormat::Toml,
        ))
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) toaster: RawToaster,
    #[serde(default)]
    pub(super) app: RawApp,
    #[serde(default)]
    pub(super) desktop: RawDesktop,
}

#[allow(clippy::struct_excessive_bools)]
#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawToaster {
    #[serde(default = "default_true")]
    pub(super) close_on_click: bool,
    #[serde(default)]
    pub(super) component: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DismissAfter")]
    pub(super) duration: AutoDismiss,
    #[serde(default = "default_true")]
    pub(super) global_mount: bool,
    #[serde(default)]
    pub(super) hide_close_button: bool,
    #[serde(default)]
    pub(super) hide_progress: bool,
    #[serde(default = "default_true")]
    pub(super) pause_on_hover: bool,
    #[serde(default = "default_position")]
    pub(super) position: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawApp {
    #[serde(default = "default_queue_bound")]
    pub(super) queue_bound: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawDesktop {
    #[serde(default)]
    pub(super) enabled: bool,
    #[serde(default = "default_desktop_appname")]
    pub(super) appname: String,
    #[serde(default = "default_seen_cache_size")]
    pub(super) seen_cache_size: usize,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(duration) = env_dismiss("TOASTER_DURATION")? {
            self.toaster.duration = duration;
        }
        if let Some(position) = env_string("TOASTER_POSITION")? {
            self.toaster.position = position;
        }
        if let Some(global_mount) = env_bool("TOASTER_GLOBAL_MOUNT")? {
            self.toaster.global_mount = global_mount;
        }
        if let Some(pause) = env_bool("TOASTER_PAUSE_ON_HOVER")? {
            self.toaster.pause_on_hover = pause;
        }
        if let Some(close) = env_bool("TOASTER_CLOSE_ON_CLICK")? {
            self.toaster.close_on_click = close;
        }
        if let Some(hide) = env_bool("TOASTER_HIDE_PROGRESS")? {
            self.toaster.hide_progress = hide;
        }
        if let Some(hide) = env_bool("TOASTER_HIDE_CLOSE_BUTTON")? {
            self.toaster.hide_close_button = hide;
        }
        if let Some(queue) = env_parse::<usize>("TOASTER_QUEUE_BOUND")? {
            self.app.queue_bound = queue;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let position = ToastPosition::from_str(&self.toaster.position).map_err(|message| {
            ConfigError::InvalidField {
                field: "toaster.position",
                message,
            }
        })?;
        if self
            .toaster
            .component
            .as_deref()
            .is_some_and(|name| name.trim().is_empty())
        {
            return Err(ConfigError::InvalidField {
                field: "toaster.component",
                message: "component name cannot be empty".to_string(),
            }
            .into());
        }
        if self.app.queue_bound == 0 {
            return Err(ConfigError::InvalidField {
                field: "app.queue_bound",
                message: "queue bound must be greater than zero".to_string(),
            }
            .into());
        }
        if self.desktop.seen_cache_size == 0 {
            return Err(ConfigError::InvalidField {
                field: "desktop.seen_cache_size",
                message: "seen cache size must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(Config {
            toaster: ToasterOptions {
                toast: ToastOptions {
                    close_on_click: self.toaster.close_on_click,
                    component: self.toaster.component,
                    duration: self.toaster.duration,
                    hide_close_button: self.toaster.hide_close_button,
                    hide_progress: self.toaster.hide_progress,
                    pause_on_hover: self.toaster.pause_on_hover,
                    position,
                },
                global_mount: self.toaster.global_mount,
            },
            queue_bound: self.app.queue_bound,
            desktop: DesktopSettings {
                enabled: self.desktop.enabled,
                appname: self.desktop.appname,
                seen_cache_size: self.desktop.seen_cache_size,
            },
        })
    }
}

impl Default for RawToaster {
    fn default() -> Self {
        Self {
            close_on_click: true,
            component: None,
            duration: AutoDismiss::default(),
            global_mount: true,
            hide_close_button: false,
            hide_progress: false,
            pause_on_hover: true,
            position: default_position(),
        }
    }
}

impl Default for RawApp {
    fn default() -> Self {
        Self {
            queue_bound: default_queue_bound(),
        }
    }
}

impl Default for RawDesktop {
    fn default() -> Self {
        Self {
            enabled: false,
            appname: default_desktop_appname(),
            seen_cache_size: default_seen_cache_size(),
        }
    }
}
