use glam::Vec3;
use web_time::{Duration, Instant};

use crate::util::easing::EasingFunction;

/// Camera eye and look-at point, the six channels a focus transition
/// interpolates in lockstep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position.
    pub eye: Vec3,
    /// Look-at point.
    pub look_at: Vec3,
}

impl CameraPose {
    /// Component-wise interpolation; `t = 0` gives `self`, `t = 1` gives
    /// `other`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            eye: self.eye.lerp(other.eye, t),
            look_at: self.look_at.lerp(other.look_at, t),
        }
    }
}

/// A time-boxed camera move between two poses.
///
/// Progress is evaluated against the tick clock passed to
/// [`sample`](Self::sample), so a tween never needs its own timer.
#[derive(Debug, Clone)]
pub struct CameraTween {
    /// Pose at the start of the move.
    pub from: CameraPose,
    /// Pose at the end of the move.
    pub to: CameraPose,
    /// When the move started.
    pub start_time: Instant,
    /// Total duration of the move.
    pub duration: Duration,
    /// Easing law applied to linear progress.
    pub easing: EasingFunction,
}

impl CameraTween {
    /// Create a tween starting at `start_time`.
    #[must_use]
    pub fn new(
        from: CameraPose,
        to: CameraPose,
        start_time: Instant,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            start_time,
            duration,
            easing,
        }
    }

    /// Calculate the progress of this tween (0.0 to 1.0).
    #[inline]
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start_time);
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Whether the full duration has elapsed at `now`.
    #[must_use]
    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start_time) >= self.duration
    }

    /// Interpolated pose at `now`. Returns exactly `to` once done.
    #[must_use]
    pub fn sample(&self, now: Instant) -> CameraPose {
        if self.is_done(now) {
            return self.to;
        }
        let t = self.easing.evaluate(self.progress(now));
        self.from.lerp(self.to, t)
    }
}
