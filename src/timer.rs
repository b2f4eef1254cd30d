use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::options::AutoDismiss;

type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Lifecycle of a [`Timer`]. `Fired` and `Cancelled` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Fired,
    Cancelled,
}

impl TimerState {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Fired | Self::Cancelled)
    }
}

struct Inner {
    state: TimerState,
    /// Time left on the countdown as of `started_at`; `None` never expires.
    remaining: Option<Duration>,
    started_at: Option<Instant>,
    /// Bumped on every start and pause so a stale expiry can recognise itself.
    generation: u64,
    callback: Option<Callback>,
    pending: Option<JoinHandle<()>>,
}

/// Single-shot countdown that can be paused, resumed and cancelled.
///
/// The callback runs at most once, on the runtime the timer was created with.
/// A timer built with [`AutoDismiss::Never`] walks the same state machine but
/// never schedules an expiry.
pub struct Timer {
    duration: AutoDismiss,
    handle: Handle,
    inner: Arc<Mutex<Inner>>,
}

impl Timer {
    pub fn new<F>(handle: Handle, duration: AutoDismiss, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            duration,
            handle,
            inner: Arc::new(Mutex::new(Inner {
                state: TimerState::Idle,
                remaining: duration.duration(),
                started_at: None,
                generation: 0,
                callback: Some(Box::new(callback)),
                pending: None,
            })),
        }
    }

    /// Starts or resumes the countdown. No-op while running or once terminal.
    pub fn start(&self) {
        let mut inner = self.lock();
        if !matches!(inner.state, TimerState::Idle | TimerState::Paused) {
            return;
        }
        inner.state = TimerState::Running;
        inner.started_at = Some(Instant::now());
        inner.generation += 1;

        if let Some(remaining) = inner.remaining {
            let generation = inner.generation;
            let weak = Arc::downgrade(&self.inner);
            inner.pending = Some(self.handle.spawn(async move {
                sleep(remaining).await;
                fire(&weak, generation);
            }));
        }
        debug!(remaining_ms = ?inner.remaining.map(|d| d.as_millis()), "timer running");
    }

    /// Halts a running countdown, keeping the time left for [`Timer::resume`].
    pub fn pause(&self) {
        let mut inner = self.lock();
        if inner.state != TimerState::Running {
            return;
        }
        let elapsed = inner.started_at.take().map(|t| t.elapsed()).unwrap_or_default();
        inner.remaining = inner.remaining.map(|r| r.saturating_sub(elapsed));
        inner.state = TimerState::Paused;
        inner.generation += 1;
        if let Some(pending) = inner.pending.take() {
            pending.abort();
        }
        debug!(remaining_ms = ?inner.remaining.map(|d| d.as_millis()), "timer paused");
    }

    /// Same as [`Timer::start`]; resuming a timer that was never paused starts it.
    pub fn resume(&self) {
        self.start();
    }

    /// Guarantees the callback never runs. No-op once terminal.
    pub fn cancel(&self) {
        let mut inner = self.lock();
        if inner.state.is_terminal() {
            return;
        }
        if inner.state == TimerState::Running {
            let elapsed = inner.started_at.take().map(|t| t.elapsed()).unwrap_or_default();
            inner.remaining = inner.remaining.map(|r| r.saturating_sub(elapsed));
        }
        inner.state = TimerState::Cancelled;
        inner.callback = None;
        if let Some(pending) = inner.pending.take() {
            pending.abort();
        }
        debug!("timer cancelled");
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.lock().state
    }

    /// Configured total duration.
    #[must_use]
    pub const fn duration(&self) -> AutoDismiss {
        self.duration
    }

    /// Time left before expiry, `None` for a timer that never expires.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        let inner = self.lock();
        match inner.state {
            TimerState::Fired => Some(Duration::ZERO),
            TimerState::Running => {
                let elapsed = inner.started_at.map(|t| t.elapsed()).unwrap_or_default();
                inner.remaining.map(|r| r.saturating_sub(elapsed))
            }
            _ => inner.remaining,
        }
    }

    /// Fraction of the countdown still ahead, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        let total = self.duration.duration()?;
        let remaining = self.remaining()?;
        Some((remaining.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn fire(inner: &Weak<Mutex<Inner>>, generation: u64) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let callback = {
        let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.state != TimerState::Running || guard.generation != generation {
            return;
        }
        guard.state = TimerState::Fired;
        guard.pending = None;
        guard.remaining = Some(Duration::ZERO);
        guard.callback.take()
    };
    debug!("timer fired");
    if let Some(callback) = callback {
        callback();
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(pending) = self.lock().pending.take() {
            pending.abort();
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("duration", &self.duration)
            .field("state", &self.state())
            .field("remaining", &self.remaining())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Timer, TimerState};
    use crate::options::AutoDismiss;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::runtime::Handle;
    use tokio::time::{Instant, sleep};

    fn counting_timer(duration: AutoDismiss) -> (Timer, Arc<AtomicUsize>) {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let timer = Timer::new(Handle::current(), duration, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (timer, fired)
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_duration() {
        let (timer, fired) = counting_timer(AutoDismiss::After(ms(100)));
        assert_eq!(timer.state(), TimerState::Idle);
        timer.start();
        timer.start();

        sleep(ms(99)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        sleep(ms(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(timer.state(), TimerState::Fired);

        timer.start();
        sleep(ms(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let (timer, fired) = counting_timer(AutoDismiss::After(ms(100)));
        timer.start();
        sleep(ms(50)).await;
        timer.cancel();

        sleep(ms(200)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(timer.state(), TimerState::Cancelled);

        timer.resume();
        sleep(ms(200)).await;
        assert_eq!(timer.state(), TimerState::Cancelled);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_excludes_paused_time() {
        let (timer, fired) = counting_timer(AutoDismiss::After(ms(100)));
        let begin = Instant::now();
        timer.start();

        sleep(ms(40)).await;
        timer.pause();
        timer.pause();
        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.remaining(), Some(ms(60)));

        sleep(ms(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        timer.resume();

        sleep(ms(59)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        sleep(ms(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(begin.elapsed() >= ms(600));
    }

    #[tokio::test(start_paused = true)]
    async fn resume_without_pause_starts_fresh() {
        let (timer, fired) = counting_timer(AutoDismiss::After(ms(30)));
        timer.resume();
        assert_eq!(timer.state(), TimerState::Running);
        sleep(ms(31)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        timer.cancel();
        timer.pause();
        assert_eq!(timer.state(), TimerState::Fired);
    }

    #[tokio::test(start_paused = true)]
    async fn never_timer_does_not_expire() {
        let (timer, fired) = counting_timer(AutoDismiss::Never);
        timer.start();
        sleep(Duration::from_secs(3_600)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.remaining(), None);
        assert_eq!(timer.progress(), None);

        timer.pause();
        assert_eq!(timer.state(), TimerState::Paused);
        timer.cancel();
        assert_eq!(timer.state(), TimerState::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn progress_tracks_elapsed_time() {
        let (timer, _fired) = counting_timer(AutoDismiss::After(ms(200)));
        assert_eq!(timer.progress(), Some(1.0));
        timer.start();
        sleep(ms(100)).await;
        timer.pause();
        assert_eq!(timer.progress(), Some(0.5));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_timer_discards_pending_expiry() {
        let (timer, fired) = counting_timer(AutoDismiss::After(ms(10)));
        timer.start();
        drop(timer);
        sleep(ms(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
