use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of toast, mostly used by render surfaces to pick a colour.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    Error,
    #[default]
    Info,
    Success,
    Warn,
}

impl ToastType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Info => "info",
            Self::Success => "success",
            Self::Warn => "warn",
        }
    }
}

impl Display for ToastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            "success" | "ok" => Ok(Self::Success),
            "warn" | "warning" => Ok(Self::Warn),
            other => Err(format!("unknown toast type: {other}")),
        }
    }
}

/// Screen region a render surface groups a toast into.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    Top,
    TopRight,
    BottomLeft,
    #[default]
    Bottom,
    BottomRight,
}

impl ToastPosition {
    pub const ALL: [Self; 6] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::Top => "top",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl Display for ToastPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| format!("unknown toast position: {}", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ToastPosition, ToastType};
    use std::str::FromStr;

    #[test]
    fn toast_type_from_str_accepts_variants() {
        assert_eq!(ToastType::from_str("ERROR"), Ok(ToastType::Error));
        assert_eq!(ToastType::from_str("warning"), Ok(ToastType::Warn));
        assert_eq!(ToastType::from_str("ok"), Ok(ToastType::Success));
        assert!(ToastType::from_str("fatal").is_err());
    }

    #[test]
    fn position_from_str_accepts_snake_and_kebab() {
        assert_eq!(
            ToastPosition::from_str("bottom_right"),
            Ok(ToastPosition::BottomRight)
        );
        assert_eq!(ToastPosition::from_str("Top-Left"), Ok(ToastPosition::TopLeft));
        assert!(ToastPosition::from_str("middle").is_err());
    }

    #[test]
    fn position_serializes_kebab_case() {
        let json = serde_json::to_string(&ToastPosition::BottomLeft).unwrap_or_default();
        assert_eq!(json, "\"bottom-left\"");
    }
}
