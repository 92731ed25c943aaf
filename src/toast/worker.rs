//! The single consumer thread.
//!
//! The worker pulls requests off the queue one at a time, schedules their
//! show and hide on the UI dispatcher, then sleeps on the monitor until the
//! toast expires or something kicks it (preemption or a destroyed surface).
//! It exits as soon as the queue is empty; the next enqueue starts a new one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use super::dispatch::UiDispatcher;
use super::presenter::Presenter;
use super::queue::RequestQueue;
use super::request::{ToastId, ToastRequest};
use super::surface::{Overlay, SurfaceProvider};
use crate::config::ToastConfig;

/// Stand-in expiry for delays too long to represent as an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `now + after`, clamped to a far-future instant instead of overflowing
fn deadline(now: Instant, after: Duration) -> Instant {
    now.checked_add(after)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

/// A request that has started its display cycle
#[derive(Debug, Clone)]
pub struct ScheduledToast {
    request: ToastRequest,
    display_time: Duration,
    expiry: Instant,
}

impl ScheduledToast {
    /// Start the cycle now: the toast expires after its delay plus `display_time`
    pub fn start(request: ToastRequest, display_time: Duration, now: Instant) -> Self {
        let expiry = deadline(now, request.delay().saturating_add(display_time));
        Self {
            request,
            display_time,
            expiry,
        }
    }

    /// The overlay actually went up at `now`: count the display time from here
    pub fn mark_shown(&mut self, now: Instant) {
        self.expiry = deadline(now, self.display_time);
    }

    pub fn request(&self) -> &ToastRequest {
        &self.request
    }

    pub fn expiry(&self) -> Instant {
        self.expiry
    }

    /// Time left before expiry, zero once it has passed
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expiry.saturating_duration_since(now)
    }
}

struct Displaying {
    toast: ScheduledToast,
    presenter: Presenter,
}

/// Worker state guarded by the monitor
#[derive(Default)]
pub(crate) struct LoopState {
    running: bool,
    current: Option<Displaying>,
    /// Set by an immediate-mode enqueue
    preempt: bool,
    /// Set by the destroy callback of the current toast
    destroyed: bool,
}

impl LoopState {
    pub(crate) const fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn current_id(&self) -> Option<ToastId> {
        self.current.as_ref().map(|d| d.toast.request().id())
    }
}

/// Lock plus condition variable for the worker's timed wait
#[derive(Default)]
pub(crate) struct Monitor {
    state: Mutex<LoopState>,
    wake: Condvar,
}

impl Monitor {
    pub(crate) fn lock(&self) -> MutexGuard<'_, LoopState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Restart the expiry clock of toast `id` as its show runs. Returns the
    /// new expiry, or `None` if `id` is no longer current.
    fn mark_shown(&self, id: ToastId) -> Option<Instant> {
        let mut state = self.lock();
        let current = state.current.as_mut()?;
        if current.toast.request().id() != id {
            return None;
        }
        current.toast.mark_shown(Instant::now());
        Some(current.toast.expiry())
    }

    /// Wake the worker because the current toast's surface was destroyed.
    /// Ignored if `id` is no longer the current toast.
    fn kick_destroyed(&self, id: ToastId) {
        let mut state = self.lock();
        if state.current_id() == Some(id) {
            state.destroyed = true;
            self.wake.notify_one();
        }
    }
}

/// Everything the controller and the worker share
pub(crate) struct Shared {
    pub(crate) config: ToastConfig,
    pub(crate) queue: RequestQueue,
    pub(crate) monitor: Monitor,
    pub(crate) provider: Arc<dyn SurfaceProvider>,
    pub(crate) dispatcher: UiDispatcher,
    pub(crate) immediate: AtomicBool,
}

/// Called after every push: start a worker if none is running, otherwise
/// preempt the current toast when immediate mode is on.
pub(crate) fn notify_enqueued(shared: &Arc<Shared>) {
    let mut state = shared.monitor.lock();
    if !state.running {
        match spawn(Arc::clone(shared)) {
            Ok(()) => state.running = true,
            // Request stays queued, the next enqueue retries
            Err(e) => tracing::error!("Failed to spawn toast worker: {e}"),
        }
    } else if state.current.is_some() && shared.immediate.load(Ordering::SeqCst) {
        state.preempt = true;
        shared.monitor.wake.notify_one();
    }
}

fn spawn(shared: Arc<Shared>) -> std::io::Result<()> {
    thread::Builder::new()
        .name("toast-worker".to_string())
        .spawn(move || run(&shared))?;
    tracing::debug!("Toast worker started");
    Ok(())
}

/// Resets the loop state if the worker unwinds, so the next enqueue can
/// spawn a fresh one.
struct PanicGuard<'a>(&'a Shared);

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if !thread::panicking() {
            return;
        }
        tracing::error!("Toast worker panicked, resetting");
        let mut state = self.0.monitor.lock();
        state.running = false;
        state.preempt = false;
        state.destroyed = false;
        if let Some(current) = state.current.take() {
            let presenter = current.presenter;
            self.0.dispatcher.post(async move { presenter.hide(false).await });
        }
    }
}

fn run(shared: &Arc<Shared>) {
    let _guard = PanicGuard(shared.as_ref());

    loop {
        let (request, presenter) = {
            let state = shared.monitor.lock();
            let mut state = wait_out_current(shared, state);

            // Poll and exit under the same lock as `notify_enqueued`
            let Some(request) = shared.queue.poll() else {
                state.running = false;
                tracing::debug!("Toast queue drained, worker exiting");
                return;
            };

            let presenter = Presenter::new(
                Overlay::from(&request),
                shared.config.enter_duration(),
                shared.config.exit_duration(),
            );
            let display_time = shared.config.display_time(request.duration());
            state.current = Some(Displaying {
                toast: ScheduledToast::start(request.clone(), display_time, Instant::now()),
                presenter: presenter.clone(),
            });
            (request, presenter)
        };

        schedule(shared, &request, presenter);
    }
}

/// Block until the current toast (if any) is over: expired, preempted, or
/// its surface destroyed.
fn wait_out_current<'a>(
    shared: &'a Shared,
    mut state: MutexGuard<'a, LoopState>,
) -> MutexGuard<'a, LoopState> {
    while state.current.is_some() {
        if state.preempt {
            if let Some(current) = state.current.take() {
                tracing::debug!("Preempting toast {}", current.presenter.id());
                let presenter = current.presenter;
                shared
                    .dispatcher
                    .post(async move { presenter.hide(false).await });
            }
            break;
        }

        if state.destroyed {
            // The destroy callback already detached it
            state.current = None;
            break;
        }

        let remaining = state
            .current
            .as_ref()
            .map_or(Duration::ZERO, |c| c.toast.remaining(Instant::now()));
        if remaining.is_zero() {
            // Animated hide was scheduled alongside the show
            state.current = None;
            break;
        }

        state = shared
            .monitor
            .wake
            .wait_timeout(state, remaining)
            .unwrap_or_else(PoisonError::into_inner)
            .0;
    }

    state.preempt = false;
    state.destroyed = false;
    state
}

/// Hook the destroy notification and hand show/hide to the UI thread.
fn schedule(shared: &Arc<Shared>, request: &ToastRequest, presenter: Presenter) {
    let id = request.id();
    let delay = request.delay();
    let display_time = shared.config.display_time(request.duration());

    let on_destroy = presenter.clone();
    let weak = Arc::downgrade(shared);
    shared.provider.set_destroy_callback(Box::new(move || {
        on_destroy.hide_now();
        if let Some(shared) = weak.upgrade() {
            shared.monitor.kick_destroyed(id);
        }
    }));

    tracing::debug!("Scheduling toast {id} for {display_time:?} after {delay:?}");

    // Show, then hide once the display time has elapsed from the actual show
    let provider = Arc::clone(&shared.provider);
    let weak = Arc::downgrade(shared);
    shared.dispatcher.post_delayed(delay, async move {
        let Some(expiry) = weak.upgrade().and_then(|s| s.monitor.mark_shown(id)) else {
            tracing::debug!("Toast {id} is no longer current, skipping show");
            return;
        };
        presenter.show(provider).await;
        tokio::time::sleep_until(tokio::time::Instant::from_std(expiry)).await;
        presenter.hide(true).await;
    });
}
