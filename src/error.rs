//! Error types for the toast core

use thiserror::Error;

/// Failures reported by a [`Surface`](crate::toast::Surface) implementation.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The surface was torn down by the host
    #[error("surface is no longer available")]
    Gone,
    /// The host refused the operation
    #[error("surface rejected the overlay: {0}")]
    Rejected(String),
}

/// Errors raised while constructing or configuring the toast service.
#[derive(Debug, Error)]
pub enum ToastError {
    /// The UI dispatcher thread or its runtime could not be started
    #[error("failed to start UI dispatcher: {0}")]
    Dispatcher(#[from] std::io::Error),
    /// A configuration value is out of range
    #[error("invalid toast configuration: {0}")]
    InvalidConfig(String),
}
