//! Enter/exit animation frames for toast overlays.

use std::time::Duration;

/// Time between two animation frames (~60 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Vertical distance, in pixels, the overlay slides up while entering
pub const ENTER_SHIFT: f32 = 12.0;

/// Visual state of an overlay at one point of an animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Opacity, 0.0 (invisible) to 1.0 (opaque)
    pub alpha: f32,
    /// Vertical translation in pixels relative to the resting position
    pub translate_y: f32,
}

impl Frame {
    /// Fully visible at the resting position
    pub const VISIBLE: Self = Self {
        alpha: 1.0,
        translate_y: 0.0,
    };

    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            alpha: (to.alpha - self.alpha).mul_add(t, self.alpha),
            translate_y: (to.translate_y - self.translate_y).mul_add(t, self.translate_y),
        }
    }
}

/// A finite tween between two frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    from: Frame,
    to: Frame,
    duration: Duration,
}

impl Animation {
    /// Fade in while sliding up into place
    pub const fn enter(duration: Duration) -> Self {
        Self {
            from: Frame {
                alpha: 0.0,
                translate_y: ENTER_SHIFT,
            },
            to: Frame::VISIBLE,
            duration,
        }
    }

    /// Fade out in place
    pub const fn exit(duration: Duration) -> Self {
        Self {
            from: Frame::VISIBLE,
            to: Frame {
                alpha: 0.0,
                translate_y: 0.0,
            },
            duration,
        }
    }

    /// The frame the animation starts from
    pub const fn first(&self) -> Frame {
        self.from
    }

    /// Number of frames after the initial one; a zero duration still yields one
    pub fn frame_count(&self) -> u32 {
        let steps = self.duration.as_millis().div_ceil(FRAME_INTERVAL.as_millis());
        u32::try_from(steps).unwrap_or(u32::MAX).max(1)
    }

    /// Frame at `progress` in `[0, 1]`, eased out
    pub fn frame_at(&self, progress: f32) -> Frame {
        let t = progress.clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from.lerp(self.to, eased)
    }

    /// Frames to apply, one per [`FRAME_INTERVAL`], ending exactly on the target
    pub fn frames(&self) -> impl Iterator<Item = Frame> + '_ {
        let n = self.frame_count();
        (1..=n).map(move |i| {
            if i == n {
                self.to
            } else {
                self.frame_at(i as f32 / n as f32)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_ends_visible() {
        let anim = Animation::enter(Duration::from_millis(200));
        let frames: Vec<Frame> = anim.frames().collect();
        assert_eq!(frames.len(), 13);
        assert_eq!(frames.last(), Some(&Frame::VISIBLE));
        assert_eq!(anim.first().alpha, 0.0);
        assert_eq!(anim.first().translate_y, ENTER_SHIFT);
    }

    #[test]
    fn test_alpha_is_monotonic() {
        let enter: Vec<f32> = Animation::enter(Duration::from_millis(100))
            .frames()
            .map(|f| f.alpha)
            .collect();
        assert!(enter.windows(2).all(|w| w[0] <= w[1]));

        let exit: Vec<f32> = Animation::exit(Duration::from_millis(100))
            .frames()
            .map(|f| f.alpha)
            .collect();
        assert!(exit.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(exit.last().copied(), Some(0.0));
    }

    #[test]
    fn test_zero_duration_single_frame() {
        let anim = Animation::exit(Duration::ZERO);
        assert_eq!(anim.frame_count(), 1);
        assert_eq!(anim.frames().next().map(|f| f.alpha), Some(0.0));
    }

    #[test]
    fn test_frame_at_clamps() {
        let anim = Animation::enter(Duration::from_millis(50));
        assert_eq!(anim.frame_at(-1.0), anim.first());
        assert_eq!(anim.frame_at(2.0), Frame::VISIBLE);
    }
}
