use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Pointer, rotation and zoom behavior.
pub struct ControlOptions {
    /// Whether dragging and ambient rotation move the orbit angles.
    #[schemars(title = "Enable Rotation")]
    pub enable_rotation: bool,
    /// Drag sensitivity; one pixel turns the orbit by
    /// `rotation_speed * 0.001` radians.
    #[schemars(title = "Rotation Speed", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub rotation_speed: f32,
    /// Whether ambient auto-rotation starts enabled.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Ambient rotation per tick, in thousandths of a radian.
    #[schemars(title = "Auto Rotate Speed", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub auto_rotate_speed: f32,
    /// Zoom factor change per tick while a zoom gesture is active.
    #[schemars(title = "Zoom Speed", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub zoom_speed: f32,
    /// Lower zoom factor bound.
    #[schemars(skip)]
    pub zoom_min: f32,
    /// Upper zoom factor bound.
    #[schemars(skip)]
    pub zoom_max: f32,
    /// How long a single wheel notch keeps zooming, in milliseconds.
    #[schemars(skip)]
    pub wheel_burst_ms: u64,
    /// Maximum pointer travel (pixels) between press and release that still
    /// counts as a click. Zero requires the exact same pixel.
    #[schemars(skip)]
    pub click_tolerance_px: f32,
}

impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            enable_rotation: true,
            rotation_speed: 5.0,
            auto_rotate: true,
            auto_rotate_speed: 1.0,
            zoom_speed: 0.01,
            zoom_min: 0.4,
            zoom_max: 4.0,
            wheel_burst_ms: 200,
            click_tolerance_px: 0.0,
        }
    }
}

impl ControlOptions {
    /// Radians of orbit per pixel of drag.
    #[must_use]
    pub fn radians_per_pixel(&self) -> f32 {
        self.rotation_speed * 0.001
    }

    /// Radians of ambient orbit per tick.
    #[must_use]
    pub fn auto_rotate_step(&self) -> f32 {
        self.auto_rotate_speed * 0.001
    }
}
