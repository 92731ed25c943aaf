//! # Perch Toast 🐦
//!
//! Transient notification (toast) scheduler for the Perch social client.
//!
//! ## Overview
//!
//! Any part of the app can ask for a short-lived overlay ("Post published",
//! "Retrying…"). Requests arrive from many threads at once, but only one toast
//! is on screen at a time and the screen it sits on can be torn down at any
//! moment. This crate serializes those requests onto a single surface.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ToastController                         │
//! │        enqueue · cancel · cancel_all · immediate mode       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │  RequestQueue   │ │  Worker thread  │ │  UiDispatcher   │
//! │                 │ │                 │ │                 │
//! │ • Bounded FIFO  │ │ • Timed wait    │ │ • UI thread     │
//! │ • Drop oldest   │ │ • Kick/preempt  │ │ • Delayed tasks │
//! │ • Cancel by id  │ │ • Lazy restart  │ │ • Animations    │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!                                                  │
//!                              ┌───────────────────┴───┐
//!                              ▼                       ▼
//!                     ┌─────────────────┐     ┌─────────────────┐
//!                     │    Presenter    │────▶│ SurfaceProvider │
//!                     │                 │     │                 │
//!                     │ • Attach/detach │     │ • Host-owned    │
//!                     │ • Fade in/out   │     │ • Destroy hook  │
//!                     └─────────────────┘     └─────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`toast`] — Queue, worker, presenter, and the surface seam
//! - [`config`] — Timings, capacity, and immediate mode
//! - [`error`] — Error types
//! - [`terminal`] — Terminal surface used by the demo binary
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use perch_toast::toast::{Surface, SurfaceSlot, ToastController, ToastDuration};
//! use perch_toast::{TerminalSurface, ToastConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let screen: Arc<dyn Surface> = Arc::new(TerminalSurface::new("timeline"));
//!     let slot = Arc::new(SurfaceSlot::new());
//!     slot.activate(&screen);
//!
//!     let toasts = ToastController::new(slot, ToastConfig::default())?;
//!     toasts.show("Post published", ToastDuration::Short);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/perch-toast/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod error;
pub mod paths;
pub mod terminal;
pub mod toast;

// Re-export main types for convenience
pub use config::ToastConfig;
pub use error::{SurfaceError, ToastError};
pub use terminal::TerminalSurface;
pub use toast::{
    Gravity, SurfaceProvider, SurfaceSlot, ToastController, ToastDuration, ToastId, ToastRequest,
};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Repository URL
pub const REPO_URL: &str = "https://github.com/ricardodantas/perch";
