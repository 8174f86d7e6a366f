use glam::{Mat4, Vec3};

use crate::options::CameraOptions;

/// Perspective camera defined by eye position, look-at target, zoom and
/// projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees, before zoom.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Zoom factor; values above 1 narrow the field of view.
    pub zoom: f32,
    /// Unit view direction. Kept separately so the view stays defined
    /// when the eye reaches the target at the end of a focus transition.
    forward: Vec3,
}

impl Camera {
    /// Camera at the origin looking down -Z, with projection parameters
    /// taken from `options`.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
            zoom: 1.0,
            forward: Vec3::NEG_Z,
        }
    }

    /// Point the camera at `target` from its current eye position.
    ///
    /// If the eye coincides with the target the previous view direction is
    /// kept.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        self.forward = (target - self.eye).normalize_or(self.forward);
    }

    /// Unit view direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Vertical field of view in degrees after applying the zoom factor.
    #[must_use]
    pub fn effective_fovy(&self) -> f32 {
        let half = (self.fovy.to_radians() * 0.5).tan() / self.zoom;
        (2.0 * half.atan()).to_degrees()
    }

    /// Update the aspect ratio from a viewport size. Zero-sized viewports
    /// are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// View matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye, self.forward, self.up)
    }

    /// Projection matrix including zoom.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.effective_fovy().to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction.
    pub forward: [f32; 3],
    /// Zoomed vertical field of view in degrees.
    pub fovy: f32,
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            forward: [0.0, 0.0, -1.0],
            fovy: 75.0,
        }
    }

    /// Uniform for the given camera's current state.
    #[must_use]
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.build_matrix().to_cols_array_2d(),
            position: camera.eye.to_array(),
            aspect: camera.aspect,
            forward: camera.forward.to_array(),
            fovy: camera.effective_fovy(),
        }
    }
}
