//! Easing functions for camera animation.
//!
//! Both focus transitions share one temporal law; the other variants exist
//! so hosts driving their own tweens through [`CameraTween`] can pick a
//! different feel.
//!
//! [`CameraTween`]: crate::animation::CameraTween

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic ease-in/ease-out: slow start, fast middle, slow end.
    CubicInOut,
}

impl EasingFunction {
    /// Easing used by the focus transitions.
    pub const DEFAULT: EasingFunction = EasingFunction::CubicInOut;

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::CubicInOut => {
                let t2 = t * 2.0;
                if t2 < 1.0 {
                    0.5 * t2 * t2 * t2
                } else {
                    let s = t2 - 2.0;
                    0.5 * (s * s * s + 2.0)
                }
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_in_out_endpoints_and_midpoint() {
        let cubic = EasingFunction::CubicInOut;
        assert_eq!(cubic.evaluate(0.0), 0.0);
        assert!((cubic.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!((cubic.evaluate(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_in_out_is_symmetric() {
        let cubic = EasingFunction::CubicInOut;
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let mirrored = 1.0 - cubic.evaluate(1.0 - t);
            assert!(
                (cubic.evaluate(t) - mirrored).abs() < 1e-5,
                "asymmetric at t={t}"
            );
        }
    }

    #[test]
    fn test_cubic_in_out_slow_start() {
        // Ease-in: a quarter of the way through time, well under a quarter
        // of the distance.
        let cubic = EasingFunction::CubicInOut;
        assert!(cubic.evaluate(0.25) < 0.1);
        assert!(cubic.evaluate(0.75) > 0.9);
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let cubic = EasingFunction::CubicInOut;
        assert_eq!(cubic.evaluate(-0.5), 0.0);
        assert!((cubic.evaluate(1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.0), 0.0);
        assert_eq!(quad_out.evaluate(0.5), 0.75);
        assert_eq!(quad_out.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_default_is_cubic_in_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::CubicInOut);
    }
}
