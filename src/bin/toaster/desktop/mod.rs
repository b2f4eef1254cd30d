mod backends;

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use toaster::config::DesktopSettings;
use toaster::{AutoDismiss, StoredToast, ToastList, ToastSubscription, ToastType};
use tracing::{debug, warn};

use backends::DesktopToast;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DesktopUrgency {
    Low,
    Normal,
    Critical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DesktopTimeout {
    Never,
    Milliseconds(u32),
}

/// Sends every new toast to the desktop notification daemon.
///
/// Toasts are recognised by transition key, so redraws of the same list do
/// not notify twice.
pub async fn run_mirror(mut subscription: ToastSubscription, settings: DesktopSettings) {
    let capacity = NonZeroUsize::new(settings.seen_cache_size).unwrap_or(NonZeroUsize::MIN);
    let mut seen: LruCache<String, ()> = LruCache::new(capacity);

    loop {
        for toast in unseen(&mut seen, &subscription.snapshot()) {
            let payload = desktop_toast(&toast, &settings.appname);
            let key = toast.transition_key.clone();
            match tokio::task::spawn_blocking(move || backends::send_toast(&payload)).await {
                Ok(Ok(())) => debug!(%key, "desktop notification sent"),
                Ok(Err(err)) => warn!(error = %err, %key, "failed to send desktop notification"),
                Err(err) => warn!(error = %err, %key, "desktop notification task failed"),
            }
        }
        if !subscription.changed().await {
            break;
        }
    }
}

/// Toasts of `snapshot` not yet in `seen`, which then remembers them.
///
/// Every live key is refreshed before anything new goes in, and the cache
/// grows to hold at least the whole list, so eviction only ever drops keys of
/// toasts that are gone.
fn unseen(seen: &mut LruCache<String, ()>, snapshot: &ToastList) -> Vec<Arc<StoredToast>> {
    let fresh: Vec<Arc<StoredToast>> = snapshot
        .iter()
        .filter(|toast| seen.get(&toast.transition_key).is_none())
        .cloned()
        .collect();
    if let Some(needed) = NonZeroUsize::new(snapshot.len()).filter(|n| *n > seen.cap()) {
        debug!(capacity = needed.get(), "growing desktop dedup cache");
        seen.resize(needed);
    }
    for toast in &fresh {
        seen.put(toast.transition_key.clone(), ());
    }
    fresh
}

fn desktop_toast(toast: &StoredToast, appname: &str) -> DesktopToast {
    DesktopToast {
        summary: format!("{appname}: {}", toast.kind()),
        body: toast.message.clone(),
        appname: appname.to_string(),
        urgency: urgency_for(toast.kind()),
        timeout: timeout_for(toast.options.duration),
    }
}

const fn urgency_for(kind: ToastType) -> DesktopUrgency {
    match kind {
        ToastType::Error => DesktopUrgency::Critical,
        ToastType::Warn => DesktopUrgency::Normal,
        ToastType::Info | ToastType::Success => DesktopUrgency::Low,
    }
}

fn timeout_for(duration: AutoDismiss) -> DesktopTimeout {
    duration.duration().map_or(DesktopTimeout::Never, |d| {
        DesktopTimeout::Milliseconds(u32::try_from(d.as_millis()).unwrap_or(u32::MAX))
    })
}
