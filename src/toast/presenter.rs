//! Attaches one toast's overlay to the active surface and animates it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use super::animation::{Animation, FRAME_INTERVAL, Frame};
use super::request::ToastId;
use super::surface::{Overlay, Surface, SurfaceProvider};

/// Lifecycle of a presented overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterState {
    /// Not shown yet
    Idle,
    /// Attached, enter animation running
    Entering,
    /// Attached and fully visible
    Shown,
    /// Attached, exit animation running
    Exiting,
    /// Removed from the surface (or never attached). Terminal.
    Detached,
}

impl PresenterState {
    /// Only an idle presenter may attach its overlay
    pub const fn can_add(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The overlay is on a surface and may be detached
    pub const fn can_remove(self) -> bool {
        matches!(self, Self::Entering | Self::Shown | Self::Exiting)
    }
}

struct Inner {
    state: PresenterState,
    surface: Option<Weak<dyn Surface>>,
}

/// Presenter for a single toast.
///
/// Cloning yields another handle to the same overlay. `show` and `hide` run on
/// the UI dispatcher; [`Presenter::hide_now`] may also be called from the
/// host's destroy callback.
#[derive(Clone)]
pub struct Presenter {
    overlay: Arc<Overlay>,
    enter: Duration,
    exit: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl Presenter {
    /// Create an idle presenter with the given enter/exit animation lengths
    pub fn new(overlay: Overlay, enter: Duration, exit: Duration) -> Self {
        Self {
            overlay: Arc::new(overlay),
            enter,
            exit,
            inner: Arc::new(Mutex::new(Inner {
                state: PresenterState::Idle,
                surface: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> ToastId {
        self.overlay.id
    }

    pub fn state(&self) -> PresenterState {
        self.lock().state
    }

    /// Whether `show` would attach the overlay
    pub fn can_add(&self) -> bool {
        self.state().can_add()
    }

    /// Whether the overlay is attached and can be detached
    pub fn can_remove(&self) -> bool {
        self.state().can_remove()
    }

    /// Attach the overlay to the provider's current surface and play the
    /// enter animation. Without a surface the toast is dropped.
    pub async fn show(&self, provider: Arc<dyn SurfaceProvider>) {
        if !self.attach(provider.as_ref()) {
            return;
        }
        if self.play(Animation::enter(self.enter), PresenterState::Entering).await {
            let mut inner = self.lock();
            if inner.state == PresenterState::Entering {
                inner.state = PresenterState::Shown;
            }
        }
    }

    /// Remove the overlay, fading it out first when `animated`.
    pub async fn hide(&self, animated: bool) {
        if !animated {
            self.hide_now();
            return;
        }

        {
            let mut inner = self.lock();
            if inner.state.can_add() {
                // Never shown: cancel the pending show
                inner.state = PresenterState::Detached;
                return;
            }
            if !inner.state.can_remove() || inner.state == PresenterState::Exiting {
                return;
            }
            inner.state = PresenterState::Exiting;
        }

        if self.play(Animation::exit(self.exit), PresenterState::Exiting).await {
            let mut inner = self.lock();
            if inner.state == PresenterState::Exiting {
                self.release(&mut inner);
            }
        }
    }

    /// Detach immediately, skipping the exit animation.
    ///
    /// On a presenter that has not shown yet this cancels the pending show.
    pub fn hide_now(&self) {
        let mut inner = self.lock();
        if inner.state.can_add() {
            tracing::debug!("Toast {} hidden before it was shown", self.id());
            inner.state = PresenterState::Detached;
        } else if inner.state.can_remove() {
            self.release(&mut inner);
        }
    }

    fn attach(&self, provider: &dyn SurfaceProvider) -> bool {
        let mut inner = self.lock();
        if !inner.state.can_add() {
            tracing::debug!("Toast {} already {:?}, skipping show", self.id(), inner.state);
            return false;
        }

        let Some(surface) = provider.current_surface() else {
            tracing::warn!("No active surface, dropping toast {}", self.id());
            inner.state = PresenterState::Detached;
            return false;
        };

        if let Err(e) = surface.attach(&self.overlay) {
            tracing::warn!("Failed to attach toast {}: {e}", self.id());
            inner.state = PresenterState::Detached;
            return false;
        }

        if let Err(e) = surface.apply_frame(self.id(), Animation::enter(self.enter).first()) {
            tracing::debug!("Frame rejected for toast {}: {e}", self.id());
        }
        inner.surface = Some(Arc::downgrade(&surface));
        inner.state = PresenterState::Entering;
        true
    }

    /// Step through `animation` while the presenter stays in `phase`.
    /// Returns false when interrupted.
    async fn play(&self, animation: Animation, phase: PresenterState) -> bool {
        for frame in animation.frames() {
            tokio::time::sleep(FRAME_INTERVAL).await;
            if !self.apply(phase, frame) {
                return false;
            }
        }
        true
    }

    fn apply(&self, phase: PresenterState, frame: Frame) -> bool {
        let mut inner = self.lock();
        if inner.state != phase {
            return false;
        }
        let Some(surface) = inner.surface.as_ref().and_then(Weak::upgrade) else {
            tracing::debug!("Surface went away while animating toast {}", self.id());
            inner.surface = None;
            inner.state = PresenterState::Detached;
            return false;
        };
        if let Err(e) = surface.apply_frame(self.id(), frame) {
            tracing::debug!("Frame rejected for toast {}: {e}", self.id());
        }
        true
    }

    /// Detach from the surface and drop every reference to it.
    fn release(&self, inner: &mut Inner) {
        inner.state = PresenterState::Detached;
        match inner.surface.take().and_then(|weak| weak.upgrade()) {
            Some(surface) => {
                if let Err(e) = surface.detach(self.id()) {
                    tracing::warn!("Failed to detach toast {}: {e}", self.id());
                }
            }
            None => tracing::debug!("Surface already gone for toast {}", self.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::request::ToastRequest;
    use crate::toast::surface::SurfaceSlot;
    use crate::toast::testing::{RecordingSurface, SurfaceEvent};
    use tokio_test::block_on;

    const ANIM: Duration = Duration::from_millis(48);

    fn setup(text: &str) -> (Presenter, Arc<SurfaceSlot>, Arc<RecordingSurface>) {
        let recording = Arc::new(RecordingSurface::default());
        let slot = Arc::new(SurfaceSlot::new());
        let surface: Arc<dyn Surface> = recording.clone();
        slot.activate(&surface);
        let overlay = Overlay::from(&ToastRequest::new(text));
        (Presenter::new(overlay, ANIM, ANIM), slot, recording)
    }

    #[test]
    fn test_show_then_animated_hide() {
        let (presenter, slot, surface) = setup("Saved");
        assert!(presenter.can_add());

        block_on(presenter.show(slot));
        assert_eq!(presenter.state(), PresenterState::Shown);
        assert!(presenter.can_remove());
        assert_eq!(surface.attached_texts(), vec!["Saved"]);
        assert_eq!(surface.last_frame(presenter.id()), Some(Frame::VISIBLE));

        block_on(presenter.hide(true));
        assert_eq!(presenter.state(), PresenterState::Detached);
        assert_eq!(surface.detached_ids(), vec![presenter.id()]);
        assert!(surface.faded_out(presenter.id()));
    }

    #[test]
    fn test_state_guards() {
        use PresenterState::{Detached, Entering, Exiting, Idle, Shown};
        assert!(Idle.can_add());
        for state in [Entering, Shown, Exiting, Detached] {
            assert!(!state.can_add());
        }
        for state in [Entering, Shown, Exiting] {
            assert!(state.can_remove());
        }
        assert!(!Idle.can_remove());
        assert!(!Detached.can_remove());
    }

    #[test]
    fn test_rejected_first_frame_still_shows() {
        let (presenter, slot, surface) = setup("stubborn");
        surface.reject_frames(true);
        block_on(presenter.show(slot));
        assert_eq!(presenter.state(), PresenterState::Shown);
        assert_eq!(surface.attached_texts(), vec!["stubborn"]);
    }

    #[test]
    fn test_no_surface_drops_toast() {
        let (presenter, _slot, surface) = setup("lost");
        let empty = Arc::new(SurfaceSlot::new());

        block_on(presenter.show(empty));
        assert_eq!(presenter.state(), PresenterState::Detached);
        assert!(surface.events().is_empty());
    }

    #[test]
    fn test_double_show_attaches_once() {
        let (presenter, slot, surface) = setup("once");
        block_on(presenter.show(slot.clone()));
        block_on(presenter.show(slot));
        assert_eq!(surface.attached_texts().len(), 1);
    }

    #[test]
    fn test_double_hide_detaches_once() {
        let (presenter, slot, surface) = setup("twice");
        block_on(presenter.show(slot));
        presenter.hide_now();
        block_on(presenter.hide(true));
        presenter.hide_now();
        assert_eq!(surface.detached_ids().len(), 1);
        assert!(!surface.faded_out(presenter.id()));
    }

    #[test]
    fn test_hide_before_show_cancels_show() {
        let (presenter, slot, surface) = setup("late");
        presenter.hide_now();
        block_on(presenter.show(slot));
        assert_eq!(presenter.state(), PresenterState::Detached);
        assert!(surface.events().is_empty());
    }

    #[test]
    fn test_attach_error_clears_state() {
        let (presenter, slot, surface) = setup("rejected");
        surface.reject_attach(true);
        block_on(presenter.show(slot));
        assert_eq!(presenter.state(), PresenterState::Detached);
        assert!(!presenter.can_remove());
        block_on(presenter.hide(true));
        assert!(surface.detached_ids().is_empty());
    }

    #[test]
    fn test_surface_dropped_while_shown() {
        let (presenter, slot, surface) = setup("orphan");
        block_on(presenter.show(slot));
        drop(surface);

        // Nothing left to detach from; references are simply released
        presenter.hide_now();
        assert_eq!(presenter.state(), PresenterState::Detached);
    }

    #[test]
    fn test_enter_frames_applied_in_order() {
        let (presenter, slot, surface) = setup("fade");
        block_on(presenter.show(slot));
        let alphas: Vec<f32> = surface
            .events()
            .into_iter()
            .filter_map(|e| match e {
                SurfaceEvent::Frame { frame, .. } => Some(frame.alpha),
                _ => None,
            })
            .collect();
        assert_eq!(alphas.first().copied(), Some(0.0));
        assert_eq!(alphas.last().copied(), Some(1.0));
        assert!(alphas.windows(2).all(|w| w[0] <= w[1]));
    }
}
