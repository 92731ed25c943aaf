//! Test doubles for the surface seam.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::animation::Frame;
use super::request::ToastId;
use super::surface::{Overlay, Surface};
use crate::error::SurfaceError;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Attached { id: ToastId, text: String },
    Frame { id: ToastId, frame: Frame },
    Detached { id: ToastId },
}

/// Surface that records every call with a timestamp
#[derive(Default)]
pub struct RecordingSurface {
    log: Mutex<Vec<(Instant, SurfaceEvent)>>,
    reject: AtomicBool,
    reject_frames: AtomicBool,
}

impl RecordingSurface {
    fn push(&self, event: SurfaceEvent) {
        self.log.lock().unwrap().push((Instant::now(), event));
    }

    pub fn reject_attach(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    pub fn reject_frames(&self, reject: bool) {
        self.reject_frames.store(reject, Ordering::SeqCst);
    }

    pub fn timed_events(&self) -> Vec<(Instant, SurfaceEvent)> {
        self.log.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.timed_events().into_iter().map(|(_, e)| e).collect()
    }

    pub fn attached_texts(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Attached { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn detached_ids(&self) -> Vec<ToastId> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Detached { id } => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn attached_at(&self, text: &str) -> Option<Instant> {
        self.timed_events().into_iter().find_map(|(at, e)| match e {
            SurfaceEvent::Attached { text: t, .. } if t == text => Some(at),
            _ => None,
        })
    }

    pub fn detached_at(&self, id: ToastId) -> Option<Instant> {
        self.timed_events().into_iter().find_map(|(at, e)| match e {
            SurfaceEvent::Detached { id: d } if d == id => Some(at),
            _ => None,
        })
    }

    pub fn last_frame(&self, id: ToastId) -> Option<Frame> {
        self.events().into_iter().rev().find_map(|e| match e {
            SurfaceEvent::Frame { id: f, frame } if f == id => Some(frame),
            _ => None,
        })
    }

    /// Whether an exit fade was played: a frame below full opacity after the
    /// overlay had become fully visible.
    pub fn faded_out(&self, id: ToastId) -> bool {
        let alphas: Vec<f32> = self
            .events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Frame { id: f, frame } if f == id => Some(frame.alpha),
                _ => None,
            })
            .collect();
        alphas
            .iter()
            .position(|a| *a >= 1.0)
            .is_some_and(|visible| alphas[visible..].iter().any(|a| *a < 1.0))
    }
}

impl Surface for RecordingSurface {
    fn attach(&self, overlay: &Overlay) -> Result<(), SurfaceError> {
        if self.reject.load(Ordering::SeqCst) {
            return Err(SurfaceError::Rejected("test".to_string()));
        }
        self.push(SurfaceEvent::Attached {
            id: overlay.id,
            text: overlay.text.clone(),
        });
        Ok(())
    }

    fn apply_frame(&self, id: ToastId, frame: Frame) -> Result<(), SurfaceError> {
        if self.reject_frames.load(Ordering::SeqCst) {
            return Err(SurfaceError::Rejected("test".to_string()));
        }
        self.push(SurfaceEvent::Frame { id, frame });
        Ok(())
    }

    fn detach(&self, id: ToastId) -> Result<(), SurfaceError> {
        self.push(SurfaceEvent::Detached { id });
        Ok(())
    }
}

/// Poll `cond` until it holds or `timeout` elapses
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}
