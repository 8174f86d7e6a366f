//! Input handling: event types, the pointer normalizer that folds mouse
//! and touch into one gesture vocabulary, and click detection.

/// Click-versus-drag detection.
pub(crate) mod click;
/// Platform-agnostic input events.
pub mod event;
/// Mouse/touch to gesture conversion.
pub mod pointer;

pub use event::{InputEvent, Modifiers};
pub use pointer::{Gesture, PointerNormalizer};
