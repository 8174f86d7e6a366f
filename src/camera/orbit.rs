//! Spherical orbit around a look-at point.
//!
//! `phi` is an elevation-like angle (0 looks at the horizon, growing as the
//! pointer moves down); the polar angle handed to the camera is
//! `π/2 − phi`, clamped away from the poles so dragging past the top never
//! flips the horizontal drag direction.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};

use crate::options::{CameraOptions, ControlOptions};
use crate::util::spherical::from_spherical;

/// Orbit radius used while the camera sits inside a focused fruit.
pub const FOCUSED_ORBIT_RADIUS: f32 = 0.001;

/// Pointer position and angles captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    pointer: Vec2,
    phi: f32,
    theta: f32,
}

/// Orbit angles plus drag state.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    /// Elevation-like angle in radians.
    pub phi: f32,
    /// Azimuth in radians.
    pub theta: f32,
    radius: f32,
    radians_per_pixel: f32,
    min_polar_angle: f32,
    max_polar_angle: f32,
    drag: Option<DragAnchor>,
}

impl OrbitState {
    /// Orbit at the configured distance and starting angle.
    #[must_use]
    pub fn new(camera: &CameraOptions, controls: &ControlOptions) -> Self {
        Self {
            phi: camera.start_polar_angle,
            theta: 0.0,
            radius: camera.distance,
            radians_per_pixel: controls.radians_per_pixel(),
            min_polar_angle: camera.min_polar_angle,
            max_polar_angle: camera.max_polar_angle,
            drag: None,
        }
    }

    // ── Drag ──

    /// Start dragging from `pointer`, anchoring the current angles.
    pub fn begin_drag(&mut self, pointer: Vec2) {
        self.drag = Some(DragAnchor {
            pointer,
            phi: self.phi,
            theta: self.theta,
        });
    }

    /// Map the pointer offset from the drag anchor onto the angles.
    /// Ignored when no drag is active.
    pub fn drag_to(&mut self, pointer: Vec2) {
        let Some(anchor) = self.drag else {
            return;
        };
        let k = self.radians_per_pixel;
        self.phi = (pointer.y - anchor.pointer.y) * k + anchor.phi;
        self.theta = (anchor.pointer.x - pointer.x) * k + anchor.theta;
    }

    /// Stop dragging.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ── Ambient rotation ──

    /// Advance the azimuth by `step` unless the user is dragging.
    pub fn auto_rotate(&mut self, step: f32) {
        if self.drag.is_none() {
            self.theta += step;
        }
    }

    // ── Geometry ──

    /// Current orbit radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Replace the orbit radius. Non-positive values are ignored.
    pub fn set_radius(&mut self, radius: f32) {
        if radius > 0.0 {
            self.radius = radius;
        }
    }

    /// Polar angle fed to the camera, always inside the configured bounds.
    #[must_use]
    pub fn polar_angle(&self) -> f32 {
        (FRAC_PI_2 - self.phi).clamp(self.min_polar_angle, self.max_polar_angle)
    }

    /// Eye position for an orbit of `radius` around `look_at`.
    #[must_use]
    pub fn eye_at(&self, look_at: Vec3, radius: f32) -> Vec3 {
        look_at + from_spherical(radius, self.polar_angle(), self.theta)
    }

    /// Eye position for the current radius around `look_at`.
    #[must_use]
    pub fn eye(&self, look_at: Vec3) -> Vec3 {
        self.eye_at(look_at, self.radius)
    }

    /// Current `(phi, theta)`.
    #[must_use]
    pub fn angles(&self) -> (f32, f32) {
        (self.phi, self.theta)
    }

    /// Restore previously saved angles.
    pub fn set_angles(&mut self, (phi, theta): (f32, f32)) {
        self.phi = phi;
        self.theta = theta;
    }
}
