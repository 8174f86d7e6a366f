//! Input dispatch for [`FruitPanorama`].

use glam::Vec2;

use super::{FocusRequest, FruitPanorama};
use crate::focus::FocusState;
use crate::input::{Gesture, InputEvent};
use crate::picking::pixel_to_ndc;

// ── Unified input handler ──

impl FruitPanorama {
    /// Process a platform-agnostic input event.
    ///
    /// This is the primary input entry point. Hosts forward raw pointer
    /// events as [`InputEvent`] variants; the panorama reduces them to
    /// gestures and dispatches to orbit drag, zoom, picking and click
    /// detection. Nothing here reads the clock: a click on a fruit or a
    /// wheel notch takes effect at the next [`update`](Self::update).
    ///
    /// Ignored entirely while event listening is disabled with
    /// [`set_event_listeners`](Self::set_event_listeners).
    ///
    /// # Example
    ///
    /// ```ignore
    /// panorama.handle_input(InputEvent::MouseMoved { x, y, modifiers });
    /// panorama.handle_input(InputEvent::Wheel { delta_y: -100.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.listening {
            return;
        }
        for gesture in self.normalizer.normalize(&event) {
            self.dispatch_gesture(gesture);
        }
    }

    fn dispatch_gesture(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Press(position) => self.dispatch_press(position),
            Gesture::Move {
                position,
                track_click,
            } => {
                self.set_pointer(position);
                if track_click {
                    self.click.track(position);
                }
                self.orbit.drag_to(position);
            }
            Gesture::Release {
                position,
                click_eligible,
            } => {
                self.orbit.end_drag();
                let click = self.click.release(position);
                if click_eligible {
                    if let Some(position) = click {
                        self.dispatch_click(position);
                    }
                }
            }
            Gesture::Cancel => {
                self.orbit.end_drag();
                self.click.cancel();
            }
            Gesture::PinchStart(distance) => self.zoom.pinch_start(distance),
            Gesture::PinchMove(distance) => self.zoom.pinch_move(distance),
            Gesture::PinchEnd => self.zoom.pinch_end(),
            Gesture::Wheel(delta_y) => self.pending_wheel = Some(delta_y),
        }
    }

    /// Pointer down: arm a click candidate and start an orbit drag unless
    /// a transition owns the camera.
    fn dispatch_press(&mut self, position: Vec2) {
        self.set_pointer(position);
        self.click.press(position);
        if self.focus.state().is_transitioning() {
            log::debug!("drag rejected during {:?}", self.focus.state());
            return;
        }
        if self.options.controls.enable_rotation {
            self.orbit.begin_drag(position);
        }
    }

    /// Click at `position`: re-run picking with the current camera and
    /// queue a focus transition onto whatever fruit is under it.
    fn dispatch_click(&mut self, position: Vec2) {
        if self.focus.state() != FocusState::Orbiting {
            return;
        }
        let Some(ndc) = pixel_to_ndc(position, self.viewport) else {
            return;
        };
        self.pick.set_pointer(ndc);
        self.pick
            .update(self.caster.as_ref(), &self.camera, self.scene.pickable());
        match self.pick.hovered() {
            Some(id) => {
                log::debug!("clicked {id:?}");
                self.pending_focus = Some(FocusRequest::Enter(id));
            }
            None => log::debug!("click hit no fruit"),
        }
    }

    fn set_pointer(&mut self, position: Vec2) {
        if let Some(ndc) = pixel_to_ndc(position, self.viewport) {
            self.pick.set_pointer(ndc);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::input::Modifiers;
    use crate::options::Options;

    fn panorama() -> FruitPanorama {
        FruitPanorama::new(Options::default(), 800, 600).unwrap()
    }

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::MousePressed {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    fn mouse_move(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn drag_maps_pixels_onto_angles() {
        let mut panorama = panorama();
        panorama.handle_input(press(100.0, 100.0));
        panorama.handle_input(mouse_move(80.0, 130.0));
        let (phi, theta) = panorama.orbit().angles();
        // rotation_speed 5 → 0.005 rad per pixel
        assert!((phi - 30.0 * 0.005).abs() < 1e-6);
        assert!((theta - 20.0 * 0.005).abs() < 1e-6);
        panorama.handle_input(InputEvent::MouseReleased { x: 80.0, y: 130.0 });
        assert!(!panorama.orbit().is_dragging());
    }

    #[test]
    fn modified_mouse_input_is_left_alone() {
        let mut panorama = panorama();
        panorama.handle_input(InputEvent::MousePressed {
            x: 100.0,
            y: 100.0,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
        });
        assert!(!panorama.orbit().is_dragging());
    }

    #[test]
    fn disabled_rotation_ignores_drag() {
        let mut options = Options::default();
        options.controls.enable_rotation = false;
        let mut panorama = FruitPanorama::new(options, 800, 600).unwrap();
        panorama.handle_input(press(100.0, 100.0));
        panorama.handle_input(mouse_move(0.0, 0.0));
        assert_eq!(panorama.orbit().angles(), (0.0, 0.0));
    }

    #[test]
    fn disabled_listeners_ignore_everything() {
        let mut panorama = panorama();
        panorama.set_event_listeners(false);
        panorama.handle_input(press(100.0, 100.0));
        panorama.handle_input(InputEvent::Wheel { delta_y: -1.0 });
        assert!(!panorama.orbit().is_dragging());
        assert_eq!(panorama.pending_wheel, None);
        assert_eq!(panorama.pick.pointer(), None);
    }

    #[test]
    fn leaving_the_canvas_ends_the_drag_without_a_click() {
        let mut panorama = panorama();
        panorama.handle_input(press(400.0, 300.0));
        panorama.handle_input(InputEvent::MouseLeft);
        assert!(!panorama.orbit().is_dragging());
        assert!(!panorama.click.is_armed());
    }

    #[test]
    fn single_finger_touch_orbits() {
        let mut panorama = panorama();
        panorama.handle_input(InputEvent::TouchStart {
            touches: vec![Vec2::new(200.0, 200.0)],
        });
        panorama.handle_input(InputEvent::TouchMove {
            touches: vec![Vec2::new(200.0, 260.0)],
        });
        assert!((panorama.orbit().phi - 60.0 * 0.005).abs() < 1e-6);
        panorama.handle_input(InputEvent::TouchEnd {
            touches: Vec::new(),
        });
        assert!(!panorama.orbit().is_dragging());
        assert_eq!(panorama.camera().target, Vec3::ZERO);
    }
}
