use std::str::FromStr;

use async_channel::{Sender, TrySendError};
use tokio::io::{AsyncBufReadExt, BufReader};
use toaster::{SurfaceEvent, ToastType};
use tracing::{debug, warn};

/// What a stdin line asks for. Toasts are addressed by their 1-based row in
/// creation order, which is not the on-screen order once positions differ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Click(usize),
    Close(usize),
    Hover(usize),
    Leave(usize),
    Show(ToastType, String),
    Clear,
    Quit,
}

impl Command {
    /// Maps a row command onto the surface event for the toast `key`.
    pub fn surface_event(&self, key: String) -> Option<SurfaceEvent> {
        match self {
            Self::Click(_) => Some(SurfaceEvent::Click(key)),
            Self::Close(_) => Some(SurfaceEvent::Close(key)),
            Self::Hover(_) => Some(SurfaceEvent::PointerEnter(key)),
            Self::Leave(_) => Some(SurfaceEvent::PointerLeave(key)),
            _ => None,
        }
    }

    pub const fn row(&self) -> Option<usize> {
        match self {
            Self::Click(row) | Self::Close(row) | Self::Hover(row) | Self::Leave(row) => {
                Some(*row)
            }
            _ => None,
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let row = || {
            rest.parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("`{verb}` expects a row number, got {rest:?}"))
        };

        match verb.to_ascii_lowercase().as_str() {
            "click" => row().map(Self::Click),
            "close" => row().map(Self::Close),
            "hover" => row().map(Self::Hover),
            "leave" => row().map(Self::Leave),
            "clear" => Ok(Self::Clear),
            "quit" | "exit" => Ok(Self::Quit),
            other => {
                let kind = ToastType::from_str(other)
                    .map_err(|_| format!("unknown command: {other}"))?;
                if rest.is_empty() {
                    return Err(format!("`{other}` expects a message"));
                }
                Ok(Self::Show(kind, rest.to_string()))
            }
        }
    }
}

/// Forwards parsed stdin lines to `tx` until stdin closes.
pub async fn read_stdin(tx: Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "failed to read stdin");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::from_str(&line) {
            Ok(command) => command,
            Err(err) => {
                warn!(%err, "ignoring input line");
                continue;
            }
        };
        match tx.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                warn!(?command, "input queue full; dropping command");
            }
            Err(TrySendError::Closed(_)) => break,
        }
    }
    debug!("stdin closed");
    tx.close();
}

#[cfg(test)]
mod tests {
    use super::Command;
    use std::str::FromStr;
    use toaster::{SurfaceEvent, ToastType};

    #[test]
    fn parses_row_commands() {
        assert_eq!(Command::from_str("click 2"), Ok(Command::Click(2)));
        assert_eq!(Command::from_str(" HOVER 1 "), Ok(Command::Hover(1)));
        assert!(Command::from_str("close 0").is_err());
        assert!(Command::from_str("leave x").is_err());
    }

    #[test]
    fn parses_show_commands() {
        assert_eq!(
            Command::from_str("warn disk almost full"),
            Ok(Command::Show(ToastType::Warn, "disk almost full".to_string()))
        );
        assert!(Command::from_str("error").is_err());
        assert!(Command::from_str("dance now").is_err());
        assert_eq!(Command::from_str("quit"), Ok(Command::Quit));
    }

    #[test]
    fn row_commands_map_to_surface_events() {
        let event = Command::Leave(3).surface_event("k".to_string());
        assert_eq!(event, Some(SurfaceEvent::PointerLeave("k".to_string())));
        assert_eq!(Command::Clear.surface_event("k".to_string()), None);
        assert_eq!(Command::Close(4).row(), Some(4));
    }
}
