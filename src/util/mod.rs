//! Shared utilities: easing curves and spherical coordinates.

pub mod easing;
pub mod spherical;
