//! Viewer configuration with TOML preset support.
//!
//! Every construction-time parameter (camera geometry, control speeds and
//! bounds, focus animation timing, background and buttons, fruit images and
//! arrangement) lives here. Options serialize to/from TOML so a whole
//! panorama can be described in one file.

mod animation;
mod camera;
mod controls;
mod display;
mod scene;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use controls::ControlOptions;
pub use display::{Background, ButtonKind, DisplayOptions};
use schemars::JsonSchema;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};

use crate::error::PanoramaError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit geometry.
    pub camera: CameraOptions,
    /// Pointer, rotation and zoom behavior.
    pub controls: ControlOptions,
    /// Focus transition timing.
    pub animation: AnimationOptions,
    /// Background, buttons and tessellation.
    pub display: DisplayOptions,
    /// Fruit images and arrangement.
    #[schemars(skip)]
    pub scene: SceneOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PanoramaError> {
        let content = std::fs::read_to_string(path).map_err(PanoramaError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, PanoramaError> {
        toml::from_str(content)
            .map_err(|e| PanoramaError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), PanoramaError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PanoramaError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PanoramaError::Io)?;
        }
        std::fs::write(path, content).map_err(PanoramaError::Io)
    }

    /// Check the invariants the interaction core relies on.
    ///
    /// Polar bounds must lie strictly inside `(0, π)` so the camera never
    /// reaches a pole, and the zoom range must be non-empty and positive.
    pub fn validate(&self) -> Result<(), PanoramaError> {
        let cam = &self.camera;
        if !(cam.distance.is_finite() && cam.distance > 0.0) {
            return Err(PanoramaError::InvalidOptions(format!(
                "camera.distance must be positive, got {}",
                cam.distance
            )));
        }
        if !(cam.min_polar_angle > 0.0
            && cam.min_polar_angle < cam.max_polar_angle
            && cam.max_polar_angle < std::f32::consts::PI)
        {
            return Err(PanoramaError::InvalidOptions(format!(
                "polar bounds must satisfy 0 < min < max < pi, got [{}, {}]",
                cam.min_polar_angle, cam.max_polar_angle
            )));
        }
        if !(cam.znear > 0.0 && cam.znear < cam.zfar) {
            return Err(PanoramaError::InvalidOptions(format!(
                "clip planes must satisfy 0 < znear < zfar, got [{}, {}]",
                cam.znear, cam.zfar
            )));
        }
        let ctl = &self.controls;
        if !(ctl.zoom_min > 0.0 && ctl.zoom_min < ctl.zoom_max) {
            return Err(PanoramaError::InvalidOptions(format!(
                "zoom bounds must satisfy 0 < zoom_min < zoom_max, got [{}, {}]",
                ctl.zoom_min, ctl.zoom_max
            )));
        }
        if self.display.segments == 0 {
            return Err(PanoramaError::InvalidOptions(
                "display.segments must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
