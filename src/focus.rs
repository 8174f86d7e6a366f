//! Orbit ⇄ focused mode state machine.
//!
//! ```text
//!   Orbiting ──click on fruit──▶ TransitioningIn ──duration──▶ Focused
//!      ▲                                                         │
//!      └──────duration────── TransitioningOut ◀──go back─────────┘
//! ```
//!
//! The engine owns side effects (orbit radius, auto-rotate, affordances,
//! notifications); this module only sequences states and owns the tween
//! while one is in flight.

use glam::Vec3;
use web_time::{Duration, Instant};

use crate::animation::{CameraPose, CameraTween};
use crate::scene::MeshId;
use crate::util::easing::EasingFunction;

/// Interaction mode of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusState {
    /// Free orbit around the fruit; picking active.
    #[default]
    Orbiting,
    /// Camera flying into a picked fruit.
    TransitioningIn,
    /// Camera resting inside a fruit.
    Focused,
    /// Camera flying back out to the orbit.
    TransitioningOut,
}

impl FocusState {
    /// Whether a tween currently owns the camera.
    #[must_use]
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::TransitioningIn | Self::TransitioningOut)
    }
}

/// Result of advancing the state machine by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusStep {
    /// Camera pose dictated by the in-flight tween, if any.
    pub pose: Option<CameraPose>,
    /// State entered on this tick because a tween finished.
    pub entered: Option<FocusState>,
}

/// Sequencer for focus transitions.
#[derive(Debug, Clone)]
pub struct FocusEngine {
    state: FocusState,
    tween: Option<CameraTween>,
    target: Option<MeshId>,
    saved_angles: Option<(f32, f32)>,
    duration: Duration,
    easing: EasingFunction,
}

impl FocusEngine {
    /// Start in [`FocusState::Orbiting`].
    #[must_use]
    pub fn new(duration: Duration, easing: EasingFunction) -> Self {
        Self {
            state: FocusState::Orbiting,
            tween: None,
            target: None,
            saved_angles: None,
            duration,
            easing,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Fruit being focused (or last focused while flying out).
    #[must_use]
    pub fn target(&self) -> Option<MeshId> {
        self.target
    }

    /// Orbit angles captured when the current focus began.
    #[must_use]
    pub fn saved_angles(&self) -> Option<(f32, f32)> {
        self.saved_angles
    }

    /// In-flight tween.
    #[must_use]
    pub fn tween(&self) -> Option<&CameraTween> {
        self.tween.as_ref()
    }

    /// Start flying into `target`, whose world position is `position`.
    ///
    /// Only honored while orbiting. `angles` are the orbit angles to come
    /// back to later.
    pub fn begin_focus(
        &mut self,
        target: MeshId,
        position: Vec3,
        from: CameraPose,
        angles: (f32, f32),
        now: Instant,
    ) -> bool {
        if self.state != FocusState::Orbiting {
            return false;
        }
        let to = CameraPose {
            eye: position,
            look_at: position,
        };
        self.tween = Some(CameraTween::new(from, to, now, self.duration, self.easing));
        self.target = Some(target);
        self.saved_angles = Some(angles);
        self.state = FocusState::TransitioningIn;
        log::debug!("focus: flying into {target:?}");
        true
    }

    /// Start flying back out so the camera ends at `eye` looking at the
    /// origin.
    ///
    /// Only honored while focused; a request during the fly-in is
    /// dropped.
    pub fn begin_return(&mut self, from: CameraPose, eye: Vec3, now: Instant) -> bool {
        if self.state != FocusState::Focused {
            log::debug!("focus: go back ignored in {:?}", self.state);
            return false;
        }
        let to = CameraPose {
            eye,
            look_at: Vec3::ZERO,
        };
        self.tween = Some(CameraTween::new(from, to, now, self.duration, self.easing));
        self.state = FocusState::TransitioningOut;
        log::debug!("focus: flying back out");
        true
    }

    /// Sample the in-flight tween at `now` and complete it when its
    /// duration has elapsed.
    pub fn advance(&mut self, now: Instant) -> FocusStep {
        let Some(tween) = &self.tween else {
            return FocusStep {
                pose: None,
                entered: None,
            };
        };
        let pose = tween.sample(now);
        if !tween.is_done(now) {
            return FocusStep {
                pose: Some(pose),
                entered: None,
            };
        }

        self.tween = None;
        self.state = match self.state {
            FocusState::TransitioningIn => FocusState::Focused,
            FocusState::TransitioningOut => {
                self.target = None;
                FocusState::Orbiting
            }
            other => other,
        };
        log::debug!("focus: entered {:?}", self.state);
        FocusStep {
            pose: Some(pose),
            entered: Some(self.state),
        }
    }

    /// Take the saved angles, leaving none behind. Used when the orbit is
    /// restored after flying out.
    pub fn take_saved_angles(&mut self) -> Option<(f32, f32)> {
        self.saved_angles.take()
    }
}
