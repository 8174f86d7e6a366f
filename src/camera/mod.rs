//! Camera system: the perspective camera handle, the spherical orbit
//! controller and the zoom accumulator.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Drag and auto-rotate orbit controller.
pub mod orbit;
/// Wheel, pinch and button zoom.
pub mod zoom;

pub use self::core::{Camera, CameraUniform};
pub use orbit::{OrbitState, FOCUSED_ORBIT_RADIUS};
pub use zoom::{ZoomDirection, ZoomSource, ZoomState};
