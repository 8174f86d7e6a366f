//! Reduces mouse and touch events to one gesture vocabulary.
//!
//! A single finger behaves like the mouse (orbit drag plus click
//! candidate); two fingers form a pinch that drives zoom. The normalizer
//! only remembers how many fingers started the current touch gesture.

use glam::Vec2;

use super::event::InputEvent;

/// Normalized pointer gesture consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Pointer went down: start an orbit drag and arm a click candidate.
    Press(Vec2),
    /// Pointer moved.
    Move {
        /// New pointer position.
        position: Vec2,
        /// Whether the click candidate should follow this move.
        track_click: bool,
    },
    /// Pointer went up: end the drag and resolve the click candidate.
    Release {
        /// Release position, if the event carried one.
        position: Option<Vec2>,
        /// Whether this release may produce a click.
        click_eligible: bool,
    },
    /// Pointer left the surface: end the drag, drop the click candidate.
    Cancel,
    /// Two fingers down, with their initial distance.
    PinchStart(f32),
    /// Two fingers moved, with their current distance.
    PinchMove(f32),
    /// Pinch finished.
    PinchEnd,
    /// Wheel scrolled (DOM sign convention).
    Wheel(f32),
}

// ─────────────────────────────────────────────────────────────────────────────
// PointerNormalizer
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw [`InputEvent`]s into [`Gesture`]s.
#[derive(Debug, Default)]
pub struct PointerNormalizer {
    /// Number of fingers down when the current touch gesture began.
    touch_start_fingers: usize,
}

fn finger_distance(touches: &[Vec2]) -> f32 {
    touches[0].distance(touches[1])
}

impl PointerNormalizer {
    /// Create a normalizer with no touch gesture in progress.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finger count recorded at the last touch start.
    #[must_use]
    pub fn touch_start_fingers(&self) -> usize {
        self.touch_start_fingers
    }

    /// Translate one event into zero or more gestures.
    ///
    /// Malformed or irrelevant events (modified mouse input, zero touches,
    /// three-finger moves, zero wheel delta) produce nothing.
    #[must_use]
    pub fn normalize(&mut self, event: &InputEvent) -> Vec<Gesture> {
        match event {
            InputEvent::MousePressed { x, y, modifiers } => {
                if modifiers.any() {
                    return Vec::new();
                }
                vec![Gesture::Press(Vec2::new(*x, *y))]
            }
            InputEvent::MouseMoved { x, y, modifiers } => {
                if modifiers.any() {
                    return Vec::new();
                }
                vec![Gesture::Move {
                    position: Vec2::new(*x, *y),
                    track_click: true,
                }]
            }
            InputEvent::MouseReleased { x, y } => vec![Gesture::Release {
                position: Some(Vec2::new(*x, *y)),
                click_eligible: true,
            }],
            InputEvent::MouseLeft => vec![Gesture::Cancel],
            InputEvent::Wheel { delta_y } => {
                if *delta_y == 0.0 {
                    Vec::new()
                } else {
                    vec![Gesture::Wheel(*delta_y)]
                }
            }
            InputEvent::TouchStart { touches } => self.touch_start(touches),
            InputEvent::TouchMove { touches } => self.touch_move(touches),
            InputEvent::TouchEnd { .. } => self.touch_end(),
        }
    }

    fn touch_start(&mut self, touches: &[Vec2]) -> Vec<Gesture> {
        if touches.is_empty() {
            return Vec::new();
        }
        self.touch_start_fingers = touches.len();
        match touches.len() {
            1 => vec![Gesture::Press(touches[0])],
            2 => vec![Gesture::PinchStart(finger_distance(touches))],
            _ => Vec::new(),
        }
    }

    fn touch_move(&self, touches: &[Vec2]) -> Vec<Gesture> {
        match touches.len() {
            1 => vec![Gesture::Move {
                position: touches[0],
                track_click: self.touch_start_fingers == 1,
            }],
            2 => vec![Gesture::PinchMove(finger_distance(touches))],
            _ => Vec::new(),
        }
    }

    fn touch_end(&self) -> Vec<Gesture> {
        let click_eligible = self.touch_start_fingers == 1;
        vec![
            Gesture::Release {
                position: None,
                click_eligible,
            },
            Gesture::PinchEnd,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    #[test]
    fn modified_mouse_press_and_move_are_dropped() {
        let mut norm = PointerNormalizer::new();
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert!(norm
            .normalize(&InputEvent::MousePressed {
                x: 1.0,
                y: 1.0,
                modifiers: ctrl,
            })
            .is_empty());
        assert!(norm
            .normalize(&InputEvent::MouseMoved {
                x: 1.0,
                y: 1.0,
                modifiers: ctrl,
            })
            .is_empty());
        // Release is never filtered.
        assert_eq!(norm.normalize(&InputEvent::MouseReleased { x: 1.0, y: 1.0 }).len(), 1);
    }

    #[test]
    fn single_touch_acts_like_mouse() {
        let mut norm = PointerNormalizer::new();
        let start = norm.normalize(&InputEvent::TouchStart {
            touches: vec![Vec2::new(5.0, 5.0)],
        });
        assert_eq!(start, vec![Gesture::Press(Vec2::new(5.0, 5.0))]);

        let moved = norm.normalize(&InputEvent::TouchMove {
            touches: vec![Vec2::new(6.0, 5.0)],
        });
        assert_eq!(
            moved,
            vec![Gesture::Move {
                position: Vec2::new(6.0, 5.0),
                track_click: true,
            }]
        );

        let end = norm.normalize(&InputEvent::TouchEnd { touches: vec![] });
        assert_eq!(
            end[0],
            Gesture::Release {
                position: None,
                click_eligible: true,
            }
        );
        assert_eq!(end[1], Gesture::PinchEnd);
    }

    #[test]
    fn two_fingers_pinch_and_never_click() {
        let mut norm = PointerNormalizer::new();
        let start = norm.normalize(&InputEvent::TouchStart {
            touches: vec![Vec2::ZERO, Vec2::new(3.0, 4.0)],
        });
        assert_eq!(start, vec![Gesture::PinchStart(5.0)]);

        let moved = norm.normalize(&InputEvent::TouchMove {
            touches: vec![Vec2::ZERO, Vec2::new(6.0, 8.0)],
        });
        assert_eq!(moved, vec![Gesture::PinchMove(10.0)]);

        // One finger lifts; the remaining finger orbits without tracking
        // the click candidate.
        let moved = norm.normalize(&InputEvent::TouchMove {
            touches: vec![Vec2::ONE],
        });
        assert_eq!(
            moved,
            vec![Gesture::Move {
                position: Vec2::ONE,
                track_click: false,
            }]
        );

        let end = norm.normalize(&InputEvent::TouchEnd { touches: vec![] });
        assert!(matches!(
            end[0],
            Gesture::Release {
                click_eligible: false,
                ..
            }
        ));
    }

    #[test]
    fn empty_touch_lists_are_ignored() {
        let mut norm = PointerNormalizer::new();
        assert!(norm.normalize(&InputEvent::TouchStart { touches: vec![] }).is_empty());
        assert!(norm.normalize(&InputEvent::TouchMove { touches: vec![] }).is_empty());
        assert_eq!(norm.touch_start_fingers(), 0);
        assert!(norm.normalize(&InputEvent::Wheel { delta_y: 0.0 }).is_empty());
    }
}
