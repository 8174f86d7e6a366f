use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit geometry.
pub struct CameraOptions {
    /// Orbit radius: distance from the look-at point to the camera.
    #[schemars(title = "Camera Distance", range(min = 1.0, max = 100.0), extend("step" = 1.0))]
    pub distance: f32,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial vertical orbit angle (radians, 0 = horizon).
    #[schemars(skip)]
    pub start_polar_angle: f32,
    /// Smallest polar angle the camera may reach (radians from +Y).
    #[schemars(skip)]
    pub min_polar_angle: f32,
    /// Largest polar angle the camera may reach (radians from +Y).
    #[schemars(skip)]
    pub max_polar_angle: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            distance: 10.0,
            fovy: 75.0,
            znear: 0.01,
            zfar: 1000.0,
            start_polar_angle: 0.0,
            min_polar_angle: 0.001,
            max_polar_angle: std::f32::consts::PI - 0.001,
        }
    }
}
