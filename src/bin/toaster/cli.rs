use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser};
use toaster::{AutoDismiss, ToastPosition, ToastType};

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(author, version, about = "Show transient toasts in the terminal", long_about = None)]
pub struct Cli {
    /// Toasts to show, as `TYPE:MESSAGE` (`error:Disk full`) or a bare
    /// message for an info toast.
    #[arg(value_name = "TOAST", value_parser = ToastSpec::from_str)]
    pub toasts: Vec<ToastSpec>,

    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Default toast duration (e.g. "5s", "1500", "never").
    #[arg(long, value_parser = AutoDismiss::from_str)]
    pub duration: Option<AutoDismiss>,

    /// Default toast position (e.g. "top-right").
    #[arg(long, value_parser = ToastPosition::from_str)]
    pub position: Option<ToastPosition>,

    /// Keep counting down while a toast is hovered.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_pause_on_hover: bool,

    /// Keep running once every toast is gone, until `quit` or Ctrl-C.
    #[arg(long, action = ArgAction::SetTrue)]
    pub stay: bool,

    /// Mirror toasts to desktop notifications (Linux).
    #[arg(long, action = ArgAction::SetTrue)]
    pub desktop: bool,

    /// Use a JSON layer for logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "toaster=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastSpec {
    pub kind: ToastType,
    pub message: String,
}

impl FromStr for ToastSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((prefix, message)) = s.split_once(':') {
            if let Ok(kind) = ToastType::from_str(prefix) {
                return Ok(Self {
                    kind,
                    message: message.trim().to_string(),
                });
            }
        }
        if s.trim().is_empty() {
            return Err("toast message cannot be empty".to_string());
        }
        Ok(Self {
            kind: ToastType::Info,
            message: s.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ToastSpec;
    use std::str::FromStr;
    use toaster::ToastType;

    #[test]
    fn typed_prefix_is_parsed() {
        let spec = ToastSpec::from_str("error: Disk full").unwrap();
        assert_eq!(spec.kind, ToastType::Error);
        assert_eq!(spec.message, "Disk full");
    }

    #[test]
    fn unknown_prefix_stays_in_message() {
        let spec = ToastSpec::from_str("note: 10:30 meeting").unwrap();
        assert_eq!(spec.kind, ToastType::Info);
        assert_eq!(spec.message, "note: 10:30 meeting");
        assert!(ToastSpec::from_str("  ").is_err());
    }
}
