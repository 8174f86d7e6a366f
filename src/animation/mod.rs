//! Time-based camera interpolation used by focus transitions.

mod tween;

pub use tween::{CameraPose, CameraTween};
