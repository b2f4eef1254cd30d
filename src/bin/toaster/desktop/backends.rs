use toaster::error::NotifyError;

use super::{DesktopTimeout, DesktopUrgency};

pub(super) struct DesktopToast {
    pub summary: String,
    pub body: String,
    pub appname: String,
    pub urgency: DesktopUrgency,
    pub timeout: DesktopTimeout,
}

#[cfg(target_os = "linux")]
pub(super) fn send_toast(toast: &DesktopToast) -> std::result::Result<(), NotifyError> {
    linux::send_toast(toast)
}

#[cfg(not(target_os = "linux"))]
pub(super) fn send_toast(toast: &DesktopToast) -> std::result::Result<(), NotifyError> {
    let _ = (
        &toast.summary,
        &toast.body,
        &toast.appname,
        toast.urgency,
        toast.timeout,
    );
    Err(NotifyError::Backend(
        "desktop notifications are only supported on Linux".to_string(),
    ))
}

#[cfg(target_os = "linux")]
mod linux {
    use notify_rust::{Notification, Timeout as LibTimeout, Urgency as LibUrgency};
    use toaster::error::NotifyError;

    use super::super::{DesktopTimeout, DesktopUrgency};
    use super::DesktopToast;

    pub fn send_toast(toast: &DesktopToast) -> std::result::Result<(), NotifyError> {
        if toast.body.is_empty() {
            return Err(NotifyError::InvalidPayload("empty body".to_string()));
        }
        Notification::new()
            .summary(&toast.summary)
            .body(&toast.body)
            .appname(&toast.appname)
            .urgency(map_urgency(toast.urgency))
            .timeout(map_timeout(toast.timeout))
            .show()
            .map_err(|err| NotifyError::Backend(err.to_string()))?;
        Ok(())
    }

    const fn map_urgency(urgency: DesktopUrgency) -> LibUrgency {
        match urgency {
            DesktopUrgency::Low => LibUrgency::Low,
            DesktopUrgency::Normal => LibUrgency::Normal,
            DesktopUrgency::Critical => LibUrgency::Critical,
        }
    }

    const fn map_timeout(timeout: DesktopTimeout) -> LibTimeout {
        match timeout {
            DesktopTimeout::Never => LibTimeout::Never,
            DesktopTimeout::Milliseconds(ms) => LibTimeout::Milliseconds(ms),
        }
    }
}
