use std::fmt;
use std::sync::{Arc, LazyLock, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info};
use uuid::Uuid;

use crate::Result;
use crate::container::{CONTAINER_ID, ToastContainer};
use crate::error::Error;
use crate::host::{App, InjectionKey, Plugin};
use crate::options::{StoredToastOptions, ToastOverrides, ToasterOptions};
use crate::timer::Timer;
use crate::types::ToastType;

/// Name under which [`Toaster::install`] publishes the toaster on the host.
pub const GLOBAL_PROPERTY: &str = "$toaster";

static TOASTER_KEY: LazyLock<InjectionKey<Toaster>> =
    LazyLock::new(|| InjectionKey::new("toaster"));

/// Ordered snapshot of the live toasts, oldest first.
pub type ToastList = Vec<Arc<StoredToast>>;

/// A toast currently on screen.
#[derive(Debug)]
pub struct StoredToast {
    pub message: String,
    pub options: StoredToastOptions,
    /// Auto-dismiss countdown, owned by this toast alone.
    pub timer: Timer,
    /// Identifier for render surfaces to key toasts by; carries no meaning.
    pub transition_key: String,
}

impl StoredToast {
    #[must_use]
    pub const fn kind(&self) -> ToastType {
        self.options.kind
    }
}

struct Shared {
    options: ToasterOptions,
    toasts: watch::Sender<ToastList>,
    handle: Handle,
}

/// Owns the list of active toasts and their timers.
///
/// Cloning is cheap; all clones share the same list.
#[derive(Clone)]
pub struct Toaster {
    shared: Arc<Shared>,
}

impl Toaster {
    /// Creates a toaster bound to the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuntime`] when called outside a runtime, since
    /// toast timers could not be scheduled.
    pub fn new(options: ToasterOptions) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self::with_handle(options, handle))
    }

    #[must_use]
    pub fn with_handle(options: ToasterOptions, handle: Handle) -> Self {
        let (toasts, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                options,
                toasts,
                handle,
            }),
        }
    }

    /// Options the toaster was created with.
    #[must_use]
    pub fn options(&self) -> &ToasterOptions {
        &self.shared.options
    }

    #[must_use]
    pub fn toasts(&self) -> ToastList {
        self.shared.toasts.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.toasts.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shared.toasts.borrow().is_empty()
    }

    /// Looks a live toast up by its transition key.
    #[must_use]
    pub fn find(&self, transition_key: &str) -> Option<Arc<StoredToast>> {
        self.shared
            .toasts
            .borrow()
            .iter()
            .find(|t| t.transition_key == transition_key)
            .cloned()
    }

    #[must_use]
    pub fn subscribe(&self) -> ToastSubscription {
        ToastSubscription {
            rx: self.shared.toasts.subscribe(),
        }
    }

    /// Appends a toast and starts its auto-dismiss timer.
    pub fn show(
        &self,
        message: impl Into<String>,
        kind: ToastType,
        overrides: Option<ToastOverrides>,
    ) {
        let options = StoredToastOptions::resolve(
            &self.shared.options.toast,
            &overrides.unwrap_or_default(),
            kind,
        );
        let message = message.into();
        let shared = Arc::downgrade(&self.shared);
        let handle = self.shared.handle.clone();

        let toast = Arc::new_cyclic(|me: &Weak<StoredToast>| {
            let me = me.clone();
            let timer = Timer::new(handle, options.duration, move || {
                if let (Some(shared), Some(toast)) = (shared.upgrade(), me.upgrade()) {
                    Self { shared }.remove_toast(&toast);
                }
            });
            StoredToast {
                message,
                options,
                timer,
                transition_key: Uuid::now_v7().to_string(),
            }
        });

        self.shared
            .toasts
            .send_modify(|list| list.push(Arc::clone(&toast)));
        toast.timer.start();

        info!(
            kind = %toast.options.kind,
            key = %toast.transition_key,
            position = %toast.options.position,
            "toast shown"
        );
    }

    pub fn error(&self, message: impl Into<String>, overrides: Option<ToastOverrides>) {
        self.show(message, ToastType::Error, overrides);
    }

    pub fn info(&self, message: impl Into<String>, overrides: Option<ToastOverrides>) {
        self.show(message, ToastType::Info, overrides);
    }

    pub fn success(&self, message: impl Into<String>, overrides: Option<ToastOverrides>) {
        self.show(message, ToastType::Success, overrides);
    }

    pub fn warn(&self, message: impl Into<String>, overrides: Option<ToastOverrides>) {
        self.show(message, ToastType::Warn, overrides);
    }

    /// Removes `toast` and cancels its timer.
    ///
    /// Toasts are matched by identity, never by content. Removing a toast that
    /// is no longer listed does nothing and notifies no one, so a click racing
    /// the timer expiry is harmless.
    pub fn remove_toast(&self, toast: &StoredToast) {
        let mut removed = None;
        self.shared.toasts.send_if_modified(|list| {
            match list.iter().position(|t| std::ptr::eq(Arc::as_ptr(t), toast)) {
                Some(index) => {
                    removed = Some(list.remove(index));
                    true
                }
                None => false,
            }
        });

        if let Some(toast) = removed {
            toast.timer.cancel();
            debug!(key = %toast.transition_key, "toast removed");
        }
    }
}

impl Plugin for Toaster {
    /// Publishes the toaster on `app` and mounts the toast container once.
    ///
    /// A host without a document (headless rendering) only gets the
    /// registration.
    fn install(&self, app: &mut App) {
        app.set_global_property(GLOBAL_PROPERTY, self.clone());
        app.provide(&TOASTER_KEY, self.clone());

        if !self.shared.options.global_mount {
            return;
        }
        let components = app.components().clone();
        let Some(document) = app.document_mut() else {
            return;
        };
        if document.query_selector(CONTAINER_ID).is_some() {
            debug!("toast container already mounted");
            return;
        }
        document.mount(
            CONTAINER_ID,
            Arc::new(ToastContainer::new(self.clone(), components)),
        );
        debug!("toast container mounted");
    }
}

/// Returns the toaster installed on `app`.
///
/// # Errors
///
/// Returns [`Error::NotInstalled`] when no toaster was installed.
pub fn use_toaster(app: &App) -> Result<Toaster> {
    app.inject(&TOASTER_KEY).ok_or(Error::NotInstalled)
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toaster")
            .field("options", &self.shared.options)
            .field("toasts", &self.len())
            .finish_non_exhaustive()
    }
}

/// Change feed over a toaster's list.
#[derive(Debug)]
pub struct ToastSubscription {
    rx: watch::Receiver<ToastList>,
}

impl ToastSubscription {
    /// Waits for the next change. Returns `false` once the toaster is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Current list, marking it as seen.
    pub fn snapshot(&mut self) -> ToastList {
        self.rx.borrow_and_update().clone()
    }

    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::Toaster;
    use crate::error::Error;
    use crate::options::ToasterOptions;

    #[test]
    fn new_outside_runtime_fails() {
        let err = Toaster::new(ToasterOptions::default()).err();
        assert!(matches!(err, Some(Error::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn find_locates_toast_by_key() {
        let toaster = Toaster::new(ToasterOptions::default()).unwrap();
        toaster.info("a", None);
        toaster.warn("b", None);

        let second = toaster.toasts()[1].clone();
        let found = toaster.find(&second.transition_key).unwrap();
        assert_eq!(found.message, "b");
        assert!(toaster.find("missing").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn subscription_sees_changes() {
        let toaster = Toaster::new(ToasterOptions::default()).unwrap();
        let mut sub = toaster.subscribe();
        assert!(!sub.has_changed());

        toaster.success("saved", None);
        assert!(sub.changed().await);
        let list = sub.snapshot();
        assert_eq!(list.len(), 1);

        toaster.remove_toast(&list[0]);
        assert!(sub.has_changed());
        assert!(sub.snapshot().is_empty());

        toaster.remove_toast(&list[0]);
        assert!(!sub.has_changed());
    }
}
