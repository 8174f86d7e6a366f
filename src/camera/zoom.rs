//! Zoom accumulator.
//!
//! Input handlers only set a direction; the factor moves by one fixed step
//! per tick while a direction is active. Wheel input holds the direction
//! for a short burst measured against the tick clock.

use web_time::{Duration, Instant};

use crate::options::ControlOptions;

/// Which way the zoom factor is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Zoom in (factor grows).
    Plus,
    /// Zoom out (factor shrinks).
    Minus,
}

/// What set the current direction, and therefore what clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomSource {
    /// On-screen button; cleared on release.
    Button,
    /// Mouse wheel; cleared once the burst deadline passes.
    Wheel {
        /// Tick time at which the burst ends.
        until: Instant,
    },
    /// Two-finger pinch; cleared when the fingers lift.
    Pinch,
}

/// Zoom factor, bounds and the active direction.
#[derive(Debug, Clone)]
pub struct ZoomState {
    factor: f32,
    step: f32,
    min: f32,
    max: f32,
    burst: Duration,
    active: Option<(ZoomDirection, ZoomSource)>,
    pinch_distance: Option<f32>,
}

impl ZoomState {
    /// Zoom at factor 1, clamped into the configured bounds.
    #[must_use]
    pub fn new(controls: &ControlOptions) -> Self {
        Self {
            factor: 1.0_f32.clamp(controls.zoom_min, controls.zoom_max),
            step: controls.zoom_speed,
            min: controls.zoom_min,
            max: controls.zoom_max,
            burst: Duration::from_millis(controls.wheel_burst_ms),
            active: None,
            pinch_distance: None,
        }
    }

    /// Current zoom factor.
    #[must_use]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Active direction, if any.
    #[must_use]
    pub fn direction(&self) -> Option<ZoomDirection> {
        self.active.map(|(direction, _)| direction)
    }

    /// Active direction together with its source.
    #[must_use]
    pub fn active(&self) -> Option<(ZoomDirection, ZoomSource)> {
        self.active
    }

    // ── Buttons ──

    /// Zoom button pressed: zoom continuously until released.
    pub fn press(&mut self, direction: ZoomDirection) {
        self.active = Some((direction, ZoomSource::Button));
    }

    /// Zoom button released. Only clears a direction the button set.
    pub fn release(&mut self, direction: ZoomDirection) {
        if self.active == Some((direction, ZoomSource::Button)) {
            self.active = None;
        }
    }

    // ── Wheel ──

    /// Wheel scrolled at `now`. Negative deltas zoom in.
    pub fn wheel(&mut self, delta_y: f32, now: Instant) {
        let direction = if delta_y < 0.0 {
            ZoomDirection::Plus
        } else if delta_y > 0.0 {
            ZoomDirection::Minus
        } else {
            return;
        };
        self.active = Some((
            direction,
            ZoomSource::Wheel {
                until: now + self.burst,
            },
        ));
    }

    // ── Pinch ──

    /// Two fingers touched down `distance` pixels apart.
    pub fn pinch_start(&mut self, distance: f32) {
        self.pinch_distance = Some(distance);
    }

    /// Fingers moved to `distance` pixels apart. Spreading zooms in,
    /// pinching zooms out, an unchanged distance keeps the direction.
    pub fn pinch_move(&mut self, distance: f32) {
        if let Some(previous) = self.pinch_distance {
            if distance > previous {
                self.active = Some((ZoomDirection::Plus, ZoomSource::Pinch));
            } else if distance < previous {
                self.active = Some((ZoomDirection::Minus, ZoomSource::Pinch));
            }
        }
        self.pinch_distance = Some(distance);
    }

    /// Fingers lifted: stop zooming.
    pub fn pinch_end(&mut self) {
        self.pinch_distance = None;
        self.active = None;
    }

    // ── Tick ──

    /// Drop a wheel burst whose deadline has passed.
    pub fn expire(&mut self, now: Instant) {
        if let Some((_, ZoomSource::Wheel { until })) = self.active {
            if now >= until {
                self.active = None;
            }
        }
    }

    /// Move the factor one step in the active direction. Returns whether
    /// the factor changed.
    pub fn apply(&mut self) -> bool {
        let Some(direction) = self.direction() else {
            return false;
        };
        let delta = match direction {
            ZoomDirection::Plus => self.step,
            ZoomDirection::Minus => -self.step,
        };
        let previous = self.factor;
        self.factor = (self.factor + delta).clamp(self.min, self.max);
        self.factor != previous
    }

    /// Drop any active direction and pinch tracking.
    pub fn reset_input(&mut self) {
        self.active = None;
        self.pinch_distance = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoom() -> ZoomState {
        ZoomState::new(&ControlOptions::default())
    }

    #[test]
    fn factor_stays_in_bounds() {
        let mut zoom = zoom();
        zoom.press(ZoomDirection::Plus);
        for _ in 0..1000 {
            let _ = zoom.apply();
            assert!(zoom.factor() <= 4.0);
        }
        assert_eq!(zoom.factor(), 4.0);
        zoom.press(ZoomDirection::Minus);
        for _ in 0..1000 {
            let _ = zoom.apply();
            assert!(zoom.factor() >= 0.4);
        }
        assert_eq!(zoom.factor(), 0.4);
    }

    #[test]
    fn initial_factor_respects_bounds() {
        let controls = ControlOptions {
            zoom_min: 1.5,
            zoom_max: 3.0,
            ..ControlOptions::default()
        };
        assert_eq!(ZoomState::new(&controls).factor(), 1.5);
    }

    #[test]
    fn button_release_only_clears_its_own_direction() {
        let mut zoom = zoom();
        zoom.press(ZoomDirection::Plus);
        zoom.release(ZoomDirection::Minus);
        assert_eq!(zoom.direction(), Some(ZoomDirection::Plus));
        zoom.release(ZoomDirection::Plus);
        assert_eq!(zoom.direction(), None);
        assert!(!zoom.apply());
    }

    #[test]
    fn wheel_burst_expires_on_the_tick_clock() {
        let mut zoom = zoom();
        let t0 = Instant::now();
        zoom.wheel(-3.0, t0);
        assert_eq!(zoom.direction(), Some(ZoomDirection::Plus));

        zoom.expire(t0 + Duration::from_millis(150));
        assert!(zoom.apply());

        zoom.expire(t0 + Duration::from_millis(200));
        assert_eq!(zoom.direction(), None);

        zoom.wheel(2.0, t0);
        assert_eq!(zoom.direction(), Some(ZoomDirection::Minus));
    }

    #[test]
    fn shrinking_pinch_only_zooms_out() {
        let mut zoom = zoom();
        zoom.pinch_start(300.0);
        for distance in [280.0, 250.0, 250.0, 200.0, 120.0] {
            zoom.pinch_move(distance);
            assert_eq!(zoom.direction(), Some(ZoomDirection::Minus));
            let _ = zoom.apply();
        }
        assert!(zoom.factor() < 1.0);
        zoom.pinch_end();
        assert_eq!(zoom.direction(), None);
    }

    #[test]
    fn equal_distance_keeps_previous_direction() {
        let mut zoom = zoom();
        zoom.pinch_start(100.0);
        zoom.pinch_move(100.0);
        assert_eq!(zoom.direction(), None);
        zoom.pinch_move(120.0);
        zoom.pinch_move(120.0);
        assert_eq!(zoom.direction(), Some(ZoomDirection::Plus));
    }
}
