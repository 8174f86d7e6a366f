use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What is drawn behind the fruit.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Background {
    /// Transparent; the host page shows through.
    #[default]
    None,
    /// Flat CSS-style color string.
    Color(String),
    /// Static image URL stretched behind the canvas.
    Image(String),
    /// Equirectangular image URL mapped onto an inward-facing sphere
    /// ten times the camera distance in radius.
    Panorama(String),
}

/// On-screen controls the host may enable.
///
/// The "go back" control is not listed: it always exists and its
/// visibility follows the focus state.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    /// Zoom plus and zoom minus (hold to zoom).
    Zoom,
    /// Ambient rotation toggle.
    AutoRotate,
    /// Fullscreen toggle.
    FullScreen,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Background, on-screen controls and tessellation density.
pub struct DisplayOptions {
    /// Background behind the scene.
    #[schemars(skip)]
    pub background: Background,
    /// Enabled on-screen buttons.
    #[schemars(title = "Buttons")]
    pub buttons: Vec<ButtonKind>,
    /// Show a progress overlay until all textures are loaded.
    #[schemars(title = "Preloader")]
    pub enable_preloader: bool,
    /// Width/height segments used when tessellating spheres and
    /// decorations.
    #[schemars(title = "Segments", range(min = 4, max = 128))]
    pub segments: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: Background::None,
            buttons: vec![
                ButtonKind::Zoom,
                ButtonKind::AutoRotate,
                ButtonKind::FullScreen,
            ],
            enable_preloader: true,
            segments: 20,
        }
    }
}
