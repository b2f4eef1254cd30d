//! Text render surface for a [`Toaster`].

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::host::{ComponentRegistry, RenderSurface, SurfaceEvent};
use crate::toaster::{StoredToast, ToastList, Toaster};
use crate::types::ToastPosition;

/// Element id the container mounts under; install checks it to mount once.
pub const CONTAINER_ID: &str = "toast-container";

const PROGRESS_CELLS: u8 = 10;

/// Renders a single toast.
pub trait ToastComponent: Send + Sync {
    fn render(&self, toast: &StoredToast) -> String;
}

/// `[type] message [x] [#####-----]`
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultToast;

impl ToastComponent for DefaultToast {
    fn render(&self, toast: &StoredToast) -> String {
        let mut line = format!("[{}] {}", toast.options.kind, toast.message);
        if !toast.options.hide_close_button {
            line.push_str(" [x]");
        }
        if !toast.options.hide_progress {
            if let Some(progress) = toast.timer.progress() {
                let filled = (0..PROGRESS_CELLS)
                    .filter(|cell| f64::from(*cell) < progress * f64::from(PROGRESS_CELLS))
                    .count();
                let bar: String = (0..usize::from(PROGRESS_CELLS))
                    .map(|cell| if cell < filled { '#' } else { '-' })
                    .collect();
                let _ = write!(line, " [{bar}]");
            }
        }
        line
    }
}

/// Groups the toaster's toasts by position and forwards user interactions.
pub struct ToastContainer {
    toaster: Toaster,
    components: ComponentRegistry,
    fallback: Arc<dyn ToastComponent>,
}

impl ToastContainer {
    #[must_use]
    pub fn new(toaster: Toaster, components: ComponentRegistry) -> Self {
        Self {
            toaster,
            components,
            fallback: Arc::new(DefaultToast),
        }
    }

    /// Non-empty position groups, in [`ToastPosition::ALL`] order; toasts keep
    /// insertion order inside a group.
    #[must_use]
    pub fn groups(&self) -> Vec<(ToastPosition, ToastList)> {
        let toasts = self.toaster.toasts();
        ToastPosition::ALL
            .into_iter()
            .filter_map(|position| {
                let group: ToastList = toasts
                    .iter()
                    .filter(|t| t.options.position == position)
                    .cloned()
                    .collect();
                (!group.is_empty()).then_some((position, group))
            })
            .collect()
    }

    fn component_for(&self, toast: &StoredToast) -> &dyn ToastComponent {
        let Some(name) = toast.options.component.as_deref() else {
            return self.fallback.as_ref();
        };
        if let Some(component) = self.components.get(name) {
            return component.as_ref();
        }
        warn!(component = name, "unknown toast component, using default");
        self.fallback.as_ref()
    }

    /// Removes the toast when it is configured to close on click.
    pub fn click(&self, key: &str) -> bool {
        self.with_toast(key, |toast| {
            if !toast.options.close_on_click {
                return false;
            }
            self.toaster.remove_toast(toast);
            true
        })
    }

    /// Close button; absent when `hide_close_button` is set.
    pub fn close(&self, key: &str) -> bool {
        self.with_toast(key, |toast| {
            if toast.options.hide_close_button {
                return false;
            }
            self.toaster.remove_toast(toast);
            true
        })
    }

    pub fn pointer_enter(&self, key: &str) -> bool {
        self.with_toast(key, |toast| {
            if !toast.options.pause_on_hover {
                return false;
            }
            toast.timer.pause();
            true
        })
    }

    pub fn pointer_leave(&self, key: &str) -> bool {
        self.with_toast(key, |toast| {
            if !toast.options.pause_on_hover {
                return false;
            }
            toast.timer.resume();
            true
        })
    }

    fn with_toast(&self, key: &str, f: impl FnOnce(&StoredToast) -> bool) -> bool {
        let Some(toast) = self.toaster.find(key) else {
            debug!(%key, "interaction for a toast that is gone");
            return false;
        };
        f(&toast)
    }
}

impl RenderSurface for ToastContainer {
    fn render(&self) -> String {
        let mut out = String::new();
        for (position, toasts) in self.groups() {
            let _ = writeln!(out, "{position}");
            for toast in toasts {
                let _ = writeln!(out, "  {}", self.component_for(&toast).render(&toast));
            }
        }
        out
    }

    fn dispatch(&self, event: &SurfaceEvent) -> bool {
        match event {
            SurfaceEvent::Click(key) => self.click(key),
            SurfaceEvent::Close(key) => self.close(key),
            SurfaceEvent::PointerEnter(key) => self.pointer_enter(key),
            SurfaceEvent::PointerLeave(key) => self.pointer_leave(key),
        }
    }
}
