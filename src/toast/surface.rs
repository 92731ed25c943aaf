//! Display surface seam.
//!
//! The host UI layer owns the actual surface (the current foreground screen).
//! The toast core never owns it: it asks a [`SurfaceProvider`] for the active
//! surface when a toast is about to show, keeps only a `Weak` reference while
//! the overlay is attached, and subscribes to a single destroy notification.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

use super::animation::Frame;
use super::request::{Gravity, ToastId, ToastRequest};
use crate::error::SurfaceError;

/// Callback fired by the host when the active surface becomes invalid
pub type DestroyCallback = Box<dyn Fn() + Send + Sync>;

/// Content and placement handed to [`Surface::attach`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Id of the toast this overlay belongs to
    pub id: ToastId,
    /// Message to display
    pub text: String,
    /// Anchor edge
    pub gravity: Gravity,
    /// Horizontal offset from the anchor, in pixels
    pub x_offset: i32,
    /// Vertical offset from the anchor, in pixels
    pub y_offset: i32,
}

impl From<&ToastRequest> for Overlay {
    fn from(request: &ToastRequest) -> Self {
        Self {
            id: request.id(),
            text: request.text().to_string(),
            gravity: request.gravity(),
            x_offset: request.x_offset(),
            y_offset: request.y_offset(),
        }
    }
}

/// A display surface overlays can be attached to.
///
/// All methods are invoked from the UI dispatcher thread, except when the
/// host's own destroy callback triggers a detach.
pub trait Surface: Send + Sync {
    /// Add the overlay to the surface
    fn attach(&self, overlay: &Overlay) -> Result<(), SurfaceError>;

    /// Update the overlay's opacity and offset during an animation
    fn apply_frame(&self, _id: ToastId, _frame: Frame) -> Result<(), SurfaceError> {
        Ok(())
    }

    /// Remove the overlay from the surface
    fn detach(&self, id: ToastId) -> Result<(), SurfaceError>;
}

/// Supplies the currently active surface, implemented by the host UI layer.
pub trait SurfaceProvider: Send + Sync {
    /// The active surface, if any
    fn current_surface(&self) -> Option<Arc<dyn Surface>>;

    /// Register the destroy callback, replacing any previous one
    fn set_destroy_callback(&self, callback: DestroyCallback);
}

/// Ready-made [`SurfaceProvider`] for hosts with a single foreground surface.
///
/// The slot only holds a `Weak` reference: when the host drops its surface
/// the slot reports none without any explicit call.
#[derive(Default)]
pub struct SurfaceSlot {
    active: RwLock<Option<Weak<dyn Surface>>>,
    on_destroy: Mutex<Option<DestroyCallback>>,
}

impl SurfaceSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    fn callback(&self) -> MutexGuard<'_, Option<DestroyCallback>> {
        self.on_destroy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_active(&self, surface: Option<&Arc<dyn Surface>>) {
        let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *active = surface.map(Arc::downgrade);
    }

    fn fire_destroy(&self) {
        let callback = self.callback();
        if let Some(callback) = callback.as_ref() {
            callback();
        }
    }

    /// Make `surface` the active one (e.g. a screen came to the foreground)
    pub fn activate(&self, surface: &Arc<dyn Surface>) {
        self.set_active(Some(surface));
    }

    /// Swap in a new foreground surface, notifying that the old one is gone.
    ///
    /// The new surface is installed before the destroy callback runs so the
    /// next toast can show on it right away.
    pub fn replace(&self, surface: &Arc<dyn Surface>) {
        self.set_active(Some(surface));
        self.fire_destroy();
    }

    /// The active surface was torn down and nothing replaces it
    pub fn destroy(&self) {
        self.set_active(None);
        self.fire_destroy();
    }
}

impl SurfaceProvider for SurfaceSlot {
    fn current_surface(&self) -> Option<Arc<dyn Surface>> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade)
    }

    fn set_destroy_callback(&self, callback: DestroyCallback) {
        *self.callback() = Some(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::testing::RecordingSurface;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_slot_holds_weak_reference() {
        let slot = SurfaceSlot::new();
        assert!(slot.current_surface().is_none());

        let surface: Arc<dyn Surface> = Arc::new(RecordingSurface::default());
        slot.activate(&surface);
        assert!(slot.current_surface().is_some());

        drop(surface);
        assert!(slot.current_surface().is_none());
    }

    #[test]
    fn test_destroy_fires_latest_callback() {
        let slot = SurfaceSlot::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&first);
        slot.set_destroy_callback(Box::new(move || {
            f.fetch_add(1, Ordering::SeqCst);
        }));
        let s = Arc::clone(&second);
        slot.set_destroy_callback(Box::new(move || {
            s.fetch_add(1, Ordering::SeqCst);
        }));

        let surface: Arc<dyn Surface> = Arc::new(RecordingSurface::default());
        slot.activate(&surface);
        slot.destroy();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert!(slot.current_surface().is_none());
    }

    #[test]
    fn test_replace_installs_before_notifying() {
        let slot = Arc::new(SurfaceSlot::new());
        let old: Arc<dyn Surface> = Arc::new(RecordingSurface::default());
        let new: Arc<dyn Surface> = Arc::new(RecordingSurface::default());
        slot.activate(&old);

        let seen = Arc::new(AtomicUsize::new(0));
        let (weak_slot, s) = (Arc::downgrade(&slot), Arc::clone(&seen));
        slot.set_destroy_callback(Box::new(move || {
            if let Some(slot) = weak_slot.upgrade()
                && slot.current_surface().is_some()
            {
                s.fetch_add(1, Ordering::SeqCst);
            }
        }));

        slot.replace(&new);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
