use glam::{Vec2, Vec3, Vec4};

use crate::camera::Camera;

/// World-space ray with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point (on the near plane for camera rays).
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from the camera through a point in normalized device
    /// coordinates (`x`, `y` in `[-1, 1]`, `y` up).
    #[must_use]
    pub fn from_camera(camera: &Camera, ndc: Vec2) -> Self {
        let inv_view_proj = camera.build_matrix().inverse();

        // Unproject near and far points (wgpu uses 0-1 depth range)
        let world_near = inv_view_proj * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let world_far = inv_view_proj * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);

        // Perspective divide
        let origin = world_near.truncate() / world_near.w;
        let far = world_far.truncate() / world_far.w;

        Self {
            origin,
            direction: (far - origin).normalize_or(camera.forward()),
        }
    }

    /// Distance along the ray to the first point on the sphere in front of
    /// the origin, if any.
    #[must_use]
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        if near > 0.0 {
            return Some(near);
        }
        // Origin inside the sphere: report the exit point.
        let far = -b + sqrt_d;
        (far > 0.0).then_some(far)
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Convert canvas pixels to normalized device coordinates. Returns `None`
/// for a zero-sized viewport.
#[must_use]
pub fn pixel_to_ndc(pixel: Vec2, viewport: Vec2) -> Option<Vec2> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        pixel.x / viewport.x * 2.0 - 1.0,
        1.0 - pixel.y / viewport.y * 2.0,
    ))
}
