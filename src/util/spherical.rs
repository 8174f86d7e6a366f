//! Spherical-to-Cartesian conversion shared by the orbit camera and the
//! fruit layouts.

use glam::Vec3;

/// Point at `radius` from the origin with polar angle `phi` (measured from
/// +Y) and azimuth `theta` (measured from +Z towards +X).
#[inline]
#[must_use]
pub fn from_spherical(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi_radius = phi.sin() * radius;
    Vec3::new(
        sin_phi_radius * theta.sin(),
        phi.cos() * radius,
        sin_phi_radius * theta.cos(),
    )
}
