use std::ops::Deref;
use std::str::FromStr;
use std::time::Duration;

use humantime::parse_duration;
use serde::{Serialize, Serializer};

use crate::types::{ToastPosition, ToastType};

const DEFAULT_DURATION: Duration = Duration::from_millis(3_000);

/// How long a toast stays on screen before it removes itself.
///
/// A zero duration, or a non-positive millisecond count, means the toast never
/// auto-dismisses and only goes away through an explicit removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoDismiss {
    Never,
    After(Duration),
}

impl AutoDismiss {
    #[must_use]
    pub const fn from_millis(ms: i64) -> Self {
        if ms <= 0 {
            Self::Never
        } else {
            Self::After(Duration::from_millis(ms.unsigned_abs()))
        }
    }

    #[must_use]
    pub const fn from_duration(duration: Duration) -> Self {
        if duration.is_zero() {
            Self::Never
        } else {
            Self::After(duration)
        }
    }

    #[must_use]
    pub const fn duration(self) -> Option<Duration> {
        match self {
            Self::Never => None,
            Self::After(d) => Some(d),
        }
    }
}

impl Default for AutoDismiss {
    fn default() -> Self {
        Self::After(DEFAULT_DURATION)
    }
}

impl From<Duration> for AutoDismiss {
    fn from(duration: Duration) -> Self {
        Self::from_duration(duration)
    }
}

/// Parses integer milliseconds, a humantime string such as `"2s"`, or
/// `"never"`.
impl FromStr for AutoDismiss {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.eq_ignore_ascii_case("never") {
            return Ok(Self::Never);
        }
        if let Ok(ms) = raw.parse::<i64>() {
            return Ok(Self::from_millis(ms));
        }
        parse_duration(raw)
            .map(Self::from_duration)
            .map_err(|err| format!("invalid duration {raw:?}: {err}"))
    }
}

/// Serialized as milliseconds, `0` standing for "never".
impl Serialize for AutoDismiss {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = self
            .duration()
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        serializer.serialize_u64(ms)
    }
}

/// Fully resolved options of a toast.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastOptions {
    /// Remove the toast when it is clicked.
    pub close_on_click: bool,
    /// Name of a component registered on the host application, rendered in
    /// place of the default one.
    pub component: Option<String>,
    pub duration: AutoDismiss,
    pub hide_close_button: bool,
    pub hide_progress: bool,
    /// Hovering the toast suspends its countdown.
    pub pause_on_hover: bool,
    pub position: ToastPosition,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            close_on_click: true,
            component: None,
            duration: AutoDismiss::default(),
            hide_close_button: false,
            hide_progress: false,
            pause_on_hover: true,
            position: ToastPosition::default(),
        }
    }
}

impl ToastOptions {
    /// Returns a copy of `self` with every field set in `overrides` replaced.
    #[must_use]
    pub fn merged(&self, overrides: &ToastOverrides) -> Self {
        Self {
            close_on_click: overrides.close_on_click.unwrap_or(self.close_on_click),
            component: overrides
                .component
                .clone()
                .or_else(|| self.component.clone()),
            duration: overrides.duration.unwrap_or(self.duration),
            hide_close_button: overrides
                .hide_close_button
                .unwrap_or(self.hide_close_button),
            hide_progress: overrides.hide_progress.unwrap_or(self.hide_progress),
            pause_on_hover: overrides.pause_on_hover.unwrap_or(self.pause_on_hover),
            position: overrides.position.unwrap_or(self.position),
        }
    }
}

/// Per-call overrides; unset fields fall back to the toaster defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastOverrides {
    pub close_on_click: Option<bool>,
    pub component: Option<String>,
    pub duration: Option<AutoDismiss>,
    pub hide_close_button: Option<bool>,
    pub hide_progress: Option<bool>,
    pub pause_on_hover: Option<bool>,
    pub position: Option<ToastPosition>,
}

impl ToastOverrides {
    #[must_use]
    pub const fn close_on_click(mut self, value: bool) -> Self {
        self.close_on_click = Some(value);
        self
    }

    #[must_use]
    pub fn component(mut self, name: impl Into<String>) -> Self {
        self.component = Some(name.into());
        self
    }

    #[must_use]
    pub fn duration(mut self, value: impl Into<AutoDismiss>) -> Self {
        self.duration = Some(value.into());
        self
    }

    #[must_use]
    pub const fn hide_close_button(mut self, value: bool) -> Self {
        self.hide_close_button = Some(value);
        self
    }

    #[must_use]
    pub const fn hide_progress(mut self, value: bool) -> Self {
        self.hide_progress = Some(value);
        self
    }

    #[must_use]
    pub const fn pause_on_hover(mut self, value: bool) -> Self {
        self.pause_on_hover = Some(value);
        self
    }

    #[must_use]
    pub const fn position(mut self, value: ToastPosition) -> Self {
        self.position = Some(value);
        self
    }
}

/// Options a [`Toaster`](crate::Toaster) is created with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToasterOptions {
    #[serde(flatten)]
    pub toast: ToastOptions,
    /// Mount the toast container on the host document during install.
    pub global_mount: bool,
}

impl Default for ToasterOptions {
    fn default() -> Self {
        Self {
            toast: ToastOptions::default(),
            global_mount: true,
        }
    }
}

impl ToasterOptions {
    #[must_use]
    pub fn with_overrides(overrides: ToasterOverrides) -> Self {
        let defaults = Self::default();
        Self {
            toast: defaults.toast.merged(&overrides.toast),
            global_mount: overrides.global_mount.unwrap_or(defaults.global_mount),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToasterOverrides {
    pub toast: ToastOverrides,
    pub global_mount: Option<bool>,
}

/// Options attached to a stored toast: the merged options plus its type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoredToastOptions {
    #[serde(flatten)]
    pub toast: ToastOptions,
    #[serde(rename = "type")]
    pub kind: ToastType,
}

impl StoredToastOptions {
    /// Resolves `defaults ⊕ overrides ⊕ {type}`.
    #[must_use]
    pub fn resolve(defaults: &ToastOptions, overrides: &ToastOverrides, kind: ToastType) -> Self {
        Self {
            toast: defaults.merged(overrides),
            kind,
        }
    }
}

impl Deref for StoredToastOptions {
    type Target = ToastOptions;

    fn deref(&self) -> &Self::Target {
        &self.toast
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AutoDismiss, StoredToastOptions, ToastOptions, ToastOverrides, ToasterOptions,
        ToasterOverrides,
    };
    use crate::types::{ToastPosition, ToastType};
    use std::time::Duration;

    #[test]
    fn non_positive_millis_never_dismiss() {
        assert_eq!(AutoDismiss::from_millis(0), AutoDismiss::Never);
        assert_eq!(AutoDismiss::from_millis(-5), AutoDismiss::Never);
        assert_eq!(
            AutoDismiss::from_millis(250),
            AutoDismiss::After(Duration::from_millis(250))
        );
        assert_eq!(AutoDismiss::from(Duration::ZERO), AutoDismiss::Never);
    }

    #[test]
    fn parses_from_text() {
        assert_eq!("never".parse(), Ok(AutoDismiss::Never));
        assert_eq!("-20".parse(), Ok(AutoDismiss::Never));
        assert_eq!(
            "1m 30s".parse(),
            Ok(AutoDismiss::After(Duration::from_secs(90)))
        );
        assert!("soon".parse::<AutoDismiss>().is_err());
    }

    #[test]
    fn overrides_win_over_defaults() {
        let defaults = ToastOptions::default();
        let overrides = ToastOverrides::default()
            .position(ToastPosition::TopRight)
            .pause_on_hover(false)
            .component("fancy");

        let merged = defaults.merged(&overrides);
        assert_eq!(merged.position, ToastPosition::TopRight);
        assert!(!merged.pause_on_hover);
        assert_eq!(merged.component.as_deref(), Some("fancy"));
        assert!(merged.close_on_click);
        assert_eq!(merged.duration, AutoDismiss::default());
    }

    #[test]
    fn stored_options_carry_type() {
        let resolved = StoredToastOptions::resolve(
            &ToastOptions::default(),
            &ToastOverrides::default().hide_progress(true),
            ToastType::Warn,
        );
        assert_eq!(resolved.kind, ToastType::Warn);
        assert!(resolved.hide_progress);
    }

    #[test]
    fn toaster_overrides_apply_on_top_of_builtin_defaults() {
        let opts = ToasterOptions::with_overrides(ToasterOverrides {
            toast: ToastOverrides::default().duration(Duration::from_secs(10)),
            global_mount: Some(false),
        });
        assert!(!opts.global_mount);
        assert_eq!(opts.toast.duration, AutoDismiss::After(Duration::from_secs(10)));
        assert_eq!(opts.toast.position, ToastPosition::Bottom);
    }

    #[test]
    fn stored_options_serialize_flat() {
        let resolved = StoredToastOptions::resolve(
            &ToastOptions::default(),
            &ToastOverrides::default(),
            ToastType::Error,
        );
        insta::assert_json_snapshot!(resolved, @r#"
        {
          "closeOnClick": true,
          "component": null,
          "duration": 3000,
          "hideCloseButton": false,
          "hideProgress": false,
          "pauseOnHover": true,
          "position": "bottom",
          "type": "error"
        }
        "#);
    }
}
