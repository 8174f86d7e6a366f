use glam::Vec2;

/// Modifier keys held while a mouse event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Alt / Option.
    pub alt: bool,
    /// Control.
    pub ctrl: bool,
    /// Shift.
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        alt: false,
        ctrl: false,
        shift: false,
    };

    /// Whether any modifier is held. Such mouse presses and moves are left
    /// to the host page.
    #[must_use]
    pub fn any(self) -> bool {
        self.alt || self.ctrl || self.shift
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::Modifiers> for Modifiers {
    fn from(modifiers: winit::event::Modifiers) -> Self {
        let state = modifiers.state();
        Self {
            alt: state.alt_key(),
            ctrl: state.control_key(),
            shift: state.shift_key(),
        }
    }
}

/// Platform-agnostic pointer events, in canvas-relative pixels.
///
/// These are fed into a [`PointerNormalizer`](super::PointerNormalizer)
/// which reduces mouse and touch input to a common set of
/// [`Gesture`](super::Gesture)s.
///
/// # Example
///
/// ```ignore
/// panorama.handle_input(InputEvent::MousePressed {
///     x: 100.0,
///     y: 200.0,
///     modifiers: Modifiers::NONE,
/// });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary mouse button pressed.
    MousePressed {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// Cursor moved (pressed or not).
    MouseMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// Primary mouse button released.
    MouseReleased {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Cursor left the canvas.
    MouseLeft,
    /// Wheel scrolled. Negative `delta_y` scrolls up (zoom in), as in the
    /// DOM convention.
    Wheel {
        /// Vertical scroll amount.
        delta_y: f32,
    },
    /// One or more fingers touched down; `touches` lists every active
    /// touch.
    TouchStart {
        /// Active touch positions.
        touches: Vec<Vec2>,
    },
    /// Active touches moved.
    TouchMove {
        /// Active touch positions.
        touches: Vec<Vec2>,
    },
    /// A finger lifted; `touches` lists the touches still down.
    TouchEnd {
        /// Remaining touch positions.
        touches: Vec<Vec2>,
    },
}
