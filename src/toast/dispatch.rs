//! UI execution context.
//!
//! Surface mutations must happen on one thread. The dispatcher owns that
//! thread: a single-threaded tokio runtime consuming a channel of tasks, so
//! the worker loop only ever *schedules* UI work and never waits for it.

use std::future::Future;
use std::pin::Pin;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::ToastError;

/// A unit of UI work
pub type UiTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Message for the UI thread
enum UiMessage {
    /// Run a task once `delay` has elapsed
    Run { delay: Duration, task: UiTask },
    /// Stop the UI thread, discarding pending tasks
    Shutdown,
}

/// Handle to the UI thread
pub struct UiDispatcher {
    sender: mpsc::UnboundedSender<UiMessage>,
}

impl UiDispatcher {
    /// Spawn the UI thread.
    pub fn spawn() -> Result<Self, ToastError> {
        let (tx, rx) = mpsc::unbounded_channel();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        thread::Builder::new()
            .name("toast-ui".to_string())
            .spawn(move || runtime.block_on(ui_loop(rx)))?;

        Ok(Self { sender: tx })
    }

    /// Run `task` on the UI thread as soon as possible.
    pub fn post<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.post_delayed(Duration::ZERO, task);
    }

    /// Run `task` on the UI thread after `delay`.
    pub fn post_delayed<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let msg = UiMessage::Run {
            delay,
            task: Box::pin(task),
        };
        if self.sender.send(msg).is_err() {
            tracing::warn!("UI dispatcher is gone, dropping task");
        }
    }
}

impl Drop for UiDispatcher {
    fn drop(&mut self) {
        let _ = self.sender.send(UiMessage::Shutdown);
    }
}

/// Consumer side: every task is spawned onto the current-thread runtime, so
/// all of them interleave on the single UI thread.
async fn ui_loop(mut rx: mpsc::UnboundedReceiver<UiMessage>) {
    while let Some(msg) = rx.recv().await {
        match msg {
            UiMessage::Run { delay, task } => {
                tokio::spawn(async move {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    task.await;
                });
            }
            UiMessage::Shutdown => {
                tracing::debug!("UI dispatcher shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc as std_mpsc;
    use std::time::Instant;

    #[test]
    fn test_tasks_run_on_ui_thread() {
        let dispatcher = UiDispatcher::spawn().unwrap();
        let (tx, rx) = std_mpsc::channel();

        dispatcher.post(async move {
            let name = thread::current().name().map(str::to_string);
            tx.send(name).unwrap();
        });

        let name = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(name.as_deref(), Some("toast-ui"));
    }

    #[test]
    fn test_delayed_tasks_respect_delay_and_order() {
        let dispatcher = UiDispatcher::spawn().unwrap();
        let (tx, rx) = std_mpsc::channel();
        let start = Instant::now();

        let late = tx.clone();
        dispatcher.post_delayed(Duration::from_millis(120), async move {
            late.send("late").unwrap();
        });
        dispatcher.post(async move {
            tx.send("now").unwrap();
        });

        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "now");
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "late");
        assert!(start.elapsed() >= Duration::from_millis(120));
    }

    #[test]
    fn test_drop_discards_pending_tasks() {
        let dispatcher = UiDispatcher::spawn().unwrap();
        let (tx, rx) = std_mpsc::channel::<()>();
        dispatcher.post_delayed(Duration::from_millis(200), async move {
            tx.send(()).unwrap();
        });
        drop(dispatcher);
        assert!(rx.recv_timeout(Duration::from_millis(400)).is_err());
    }
}
