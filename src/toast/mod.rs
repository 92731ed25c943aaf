//! Toast display scheduler
//!
//! Serializes short-lived overlays requested from any thread onto a single
//! host surface that may disappear at any time.
//!
//! ```text
//!  any thread ──enqueue──▶ RequestQueue ──poll──▶ worker thread
//!                                                    │ schedule
//!                                                    ▼
//!                              UiDispatcher (UI thread) ──▶ Presenter ──▶ Surface
//! ```

mod animation;
mod controller;
mod dispatch;
mod presenter;
mod queue;
mod request;
mod surface;
mod worker;

#[cfg(test)]
mod testing;

pub use animation::{Animation, ENTER_SHIFT, FRAME_INTERVAL, Frame};
pub use controller::ToastController;
pub use dispatch::{UiDispatcher, UiTask};
pub use presenter::{Presenter, PresenterState};
pub use queue::{MAX_LIMIT, RequestQueue};
pub use request::{
    Gravity, LONG_DURATION_MS, SHORT_DURATION_MS, ToastDuration, ToastId, ToastRequest,
};
pub use surface::{DestroyCallback, Overlay, Surface, SurfaceProvider, SurfaceSlot};
pub use worker::ScheduledToast;
