//! Public façade of the toast scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use super::dispatch::UiDispatcher;
use super::queue::RequestQueue;
use super::request::{ToastDuration, ToastId, ToastRequest};
use super::surface::SurfaceProvider;
use super::worker::{self, Monitor, Shared};
use crate::config::ToastConfig;
use crate::error::ToastError;

/// Process-wide instance used by [`ToastController::init`]
static CONTROLLER: OnceLock<ToastController> = OnceLock::new();

/// Handle to the toast scheduler.
///
/// Create one at startup and clone it into every place that needs to show
/// toasts; all clones drive the same queue and worker.
#[derive(Clone)]
pub struct ToastController {
    shared: Arc<Shared>,
}

impl ToastController {
    /// Build a scheduler drawing surfaces from `provider`.
    ///
    /// Spawns the UI dispatcher thread; the worker thread is started lazily
    /// by the first enqueue.
    pub fn new(
        provider: Arc<dyn SurfaceProvider>,
        config: ToastConfig,
    ) -> Result<Self, ToastError> {
        config.validate()?;
        let dispatcher = UiDispatcher::spawn()?;

        Ok(Self {
            shared: Arc::new(Shared {
                queue: RequestQueue::new(config.max_pending),
                immediate: AtomicBool::new(config.immediate_mode),
                monitor: Monitor::default(),
                provider,
                dispatcher,
                config,
            }),
        })
    }

    /// Initialize the process-wide instance with the default config.
    ///
    /// Later calls return the existing instance untouched, whatever provider
    /// they pass.
    pub fn init(provider: Arc<dyn SurfaceProvider>) -> Result<&'static Self, ToastError> {
        if let Some(existing) = CONTROLLER.get() {
            return Ok(existing);
        }
        let controller = Self::new(provider, ToastConfig::default())?;
        // A concurrent init may have won the race; its instance is kept
        Ok(CONTROLLER.get_or_init(|| controller))
    }

    /// The process-wide instance, if [`ToastController::init`] has run
    pub fn global() -> Option<&'static Self> {
        CONTROLLER.get()
    }

    /// Queue a toast. Never waits for anything to be displayed.
    pub fn enqueue(&self, request: ToastRequest) -> ToastId {
        let id = request.id();
        if let Some(evicted) = self.shared.queue.push(request) {
            tracing::debug!("Toast queue full, dropped oldest toast {}", evicted.id());
        }
        worker::notify_enqueued(&self.shared);
        id
    }

    /// Queue a toast with the configured default placement
    pub fn show(&self, text: impl Into<String>, duration: ToastDuration) -> ToastId {
        let config = &self.shared.config;
        self.enqueue(
            ToastRequest::new(text)
                .with_duration(duration)
                .with_gravity(config.default_gravity)
                .with_offset(0, config.default_y_offset),
        )
    }

    /// Drop a toast that has not started displaying yet.
    ///
    /// Returns false for unknown ids and for toasts already taken by the
    /// worker, which are left alone.
    pub fn cancel(&self, id: ToastId) -> bool {
        let removed = self.shared.queue.remove(id);
        if removed {
            tracing::debug!("Cancelled toast {id}");
        }
        removed
    }

    /// Drop every pending toast. The one on screen is not affected.
    pub fn cancel_all(&self) -> usize {
        let n = self.shared.queue.clear();
        if n > 0 {
            tracing::debug!("Cancelled {n} pending toasts");
        }
        n
    }

    /// Toggle preemption of the displayed toast by new ones
    pub fn set_immediate_mode(&self, enabled: bool) {
        self.shared.immediate.store(enabled, Ordering::SeqCst);
    }

    pub fn immediate_mode(&self) -> bool {
        self.shared.immediate.load(Ordering::SeqCst)
    }

    /// Number of toasts waiting to be displayed
    pub fn pending_len(&self) -> usize {
        self.shared.queue.len()
    }

    /// Id of the toast currently in its display cycle
    pub fn current(&self) -> Option<ToastId> {
        self.shared.monitor.lock().current_id()
    }

    pub fn is_displaying(&self) -> bool {
        self.current().is_some()
    }

    /// Whether the worker thread has exited (nothing displaying or pending)
    pub fn is_idle(&self) -> bool {
        !self.shared.monitor.lock().is_running()
    }

    pub fn config(&self) -> &ToastConfig {
        &self.shared.config
    }
}
