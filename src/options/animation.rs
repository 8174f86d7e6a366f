use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Focus transition timing.
pub struct AnimationOptions {
    /// Duration of the fly-in and fly-out camera moves, in milliseconds.
    #[schemars(title = "Focus Duration (ms)", range(min = 0, max = 10000), extend("step" = 100))]
    pub focus_duration_ms: u64,
    /// Easing law shared by both transitions.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            focus_duration_ms: 2000,
            easing: EasingFunction::DEFAULT,
        }
    }
}

impl AnimationOptions {
    /// Focus transition duration.
    #[must_use]
    pub fn focus_duration(&self) -> Duration {
        Duration::from_millis(self.focus_duration_ms)
    }
}
