//! Toast request value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Display time of a [`ToastDuration::Short`] toast, in milliseconds
pub const SHORT_DURATION_MS: u64 = 3000;

/// Display time of a [`ToastDuration::Long`] toast, in milliseconds
pub const LONG_DURATION_MS: u64 = 5000;

/// Unique identifier handed back by `enqueue`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastId(Uuid);

impl ToastId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell toasts apart in logs
        let s = self.0.simple().to_string();
        write!(f, "{}", &s[..8])
    }
}

/// How long a toast stays on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastDuration {
    /// ~3 seconds
    #[default]
    Short,
    /// ~5 seconds
    Long,
}

impl ToastDuration {
    /// Default display time, before any config override
    pub const fn default_millis(&self) -> u64 {
        match self {
            Self::Short => SHORT_DURATION_MS,
            Self::Long => LONG_DURATION_MS,
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "short" | "s" => Some(Self::Short),
            "long" | "l" => Some(Self::Long),
            _ => None,
        }
    }
}

/// Vertical anchor of the overlay on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gravity {
    /// Anchored to the top edge
    Top,
    /// Centered
    Center,
    /// Anchored to the bottom edge
    #[default]
    Bottom,
}

impl Gravity {
    /// Get the display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

/// One display request.
///
/// Built with [`ToastRequest::new`] and the `with_*` setters; read-only once
/// handed to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    id: ToastId,
    text: String,
    duration: ToastDuration,
    gravity: Gravity,
    x_offset: i32,
    y_offset: i32,
    delay: Duration,
}

impl ToastRequest {
    /// Create a short, bottom-anchored request with no delay
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ToastId::new(),
            text: text.into(),
            duration: ToastDuration::Short,
            gravity: Gravity::Bottom,
            x_offset: 0,
            y_offset: 0,
            delay: Duration::ZERO,
        }
    }

    /// Set the duration class
    pub fn with_duration(mut self, duration: ToastDuration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the gravity
    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the pixel offsets relative to the gravity anchor
    pub fn with_offset(mut self, x_offset: i32, y_offset: i32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Delay the show by `delay` once the request reaches the head of the queue
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn duration(&self) -> ToastDuration {
        self.duration
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn x_offset(&self) -> i32 {
        self.x_offset
    }

    pub fn y_offset(&self) -> i32 {
        self.y_offset
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ToastRequest::new("a");
        let b = ToastRequest::new("a");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_builder_keeps_id() {
        let req = ToastRequest::new("Saved");
        let id = req.id();
        let req = req
            .with_duration(ToastDuration::Long)
            .with_gravity(Gravity::Top)
            .with_offset(4, -8)
            .with_delay(Duration::from_millis(250));

        assert_eq!(req.id(), id);
        assert_eq!(req.text(), "Saved");
        assert_eq!(req.duration(), ToastDuration::Long);
        assert_eq!(req.gravity(), Gravity::Top);
        assert_eq!((req.x_offset(), req.y_offset()), (4, -8));
        assert_eq!(req.delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_duration_defaults() {
        assert_eq!(ToastDuration::Short.default_millis(), 3000);
        assert_eq!(ToastDuration::Long.default_millis(), 5000);
        assert_eq!(ToastDuration::from_str("LONG"), Some(ToastDuration::Long));
        assert_eq!(ToastDuration::from_str("forever"), None);
    }

    #[test]
    fn test_id_display_is_short() {
        assert_eq!(ToastId::new().to_string().len(), 8);
    }
}
