//! Per-frame sequencing and the renderer hand-off.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use web_time::Instant;

use super::{FocusRequest, FruitPanorama, PanoramaEvent};
use crate::animation::CameraPose;
use crate::camera::{Camera, CameraUniform, FOCUSED_ORBIT_RADIUS};
use crate::focus::FocusState;
use crate::options::ButtonKind;
use crate::scene::{MeshId, Scene};
use crate::util::spherical::from_spherical;

/// Which overlays the host should draw on top of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affordances<'a> {
    /// Enabled on-screen buttons.
    pub buttons: &'a [ButtonKind],
    /// Whether the "go back" control is shown.
    pub go_back: bool,
    /// Preloader progress while textures are still loading.
    pub preloader: Option<u8>,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Camera after this tick's update.
    pub camera: &'a Camera,
    /// GPU-ready camera uniform.
    pub uniform: CameraUniform,
    /// Scene to draw; [`Scene::is_dirty`] tells whether meshes changed
    /// since the previous frame.
    pub scene: &'a Scene,
    /// Radius of the inward-facing background sphere.
    pub background_radius: f32,
    /// Current focus state.
    pub focus: FocusState,
    /// Fruit under the pointer.
    pub hovered: Option<MeshId>,
    /// Overlays.
    pub affordances: Affordances<'a>,
}

/// Draws frames. Implemented by the host's GPU backend.
pub trait FrameRenderer {
    /// Draw `frame`.
    fn submit(&mut self, frame: &Frame<'_>);
}

// ── Tick ──

impl FruitPanorama {
    /// Advance every controller to `now` without rendering.
    ///
    /// Order: pending input → focus tween → auto-rotate → orbit position →
    /// zoom → look-at → picking.
    pub fn update(&mut self, now: Instant) {
        if let Some(delta_y) = self.pending_wheel.take() {
            self.zoom.wheel(delta_y, now);
        }
        self.zoom.expire(now);
        if let Some(request) = self.pending_focus.take() {
            self.start_transition(request, now);
        }

        self.advance_focus(now);
        let state = self.focus.state();

        if !state.is_transitioning() {
            if self.auto_rotate && self.options.controls.enable_rotation {
                self.orbit.auto_rotate(self.options.controls.auto_rotate_step());
            }
            self.camera.eye = self.orbit.eye(self.look_at);
        }

        if state == FocusState::Orbiting && self.zoom.apply() {
            self.camera.zoom = self.zoom.factor();
        }

        self.camera.look_at(self.look_at);

        if state == FocusState::Orbiting {
            self.pick.update(
                self.caster.as_ref(),
                &self.camera,
                self.scene.pickable(),
            );
        } else {
            self.pick.clear();
        }
    }

    /// Run one frame: [`update`](Self::update), the tick hook, then hand
    /// the frame to `renderer`.
    ///
    /// ```ignore
    /// panorama.tick(Instant::now(), &mut renderer);
    /// ```
    pub fn tick(&mut self, now: Instant, renderer: &mut dyn FrameRenderer) {
        self.update(now);
        let frame = Frame {
            camera: &self.camera,
            uniform: CameraUniform::from_camera(&self.camera),
            scene: &self.scene,
            background_radius: self.options.camera.distance * 10.0,
            focus: self.focus.state(),
            hovered: self.pick.hovered(),
            affordances: Affordances {
                buttons: &self.buttons,
                go_back: self.go_back_visible,
                preloader: (self.options.display.enable_preloader
                    && !self.loading.is_complete())
                .then(|| self.loading.progress().unwrap_or(0)),
            },
        };
        if let Some(hook) = self.tick_hook.as_mut() {
            hook(&frame);
        }
        renderer.submit(&frame);
        self.scene.mark_rendered();
    }

    /// Run `hook` on every [`tick`](Self::tick), before the frame is
    /// submitted. Replaces any previous hook.
    pub fn set_tick_hook(&mut self, hook: impl FnMut(&Frame<'_>) + 'static) {
        self.tick_hook = Some(Box::new(hook));
    }

    /// Remove the tick hook.
    pub fn clear_tick_hook(&mut self) {
        self.tick_hook = None;
    }

    // ── Focus transitions ──

    fn start_transition(&mut self, request: FocusRequest, now: Instant) {
        let from = CameraPose {
            eye: self.camera.eye,
            look_at: self.look_at,
        };
        match request {
            FocusRequest::Enter(id) => {
                let Some(position) = self.scene.world_position(id) else {
                    log::debug!("{id:?} vanished before the transition");
                    return;
                };
                if self.focus.begin_focus(
                    id,
                    position,
                    from,
                    self.orbit.angles(),
                    now,
                ) {
                    self.enter_transition(FocusState::TransitioningIn);
                }
            }
            FocusRequest::Leave => {
                let (phi, theta) =
                    self.focus.saved_angles().unwrap_or_else(|| self.orbit.angles());
                let camera = &self.options.camera;
                let polar = (FRAC_PI_2 - phi)
                    .clamp(camera.min_polar_angle, camera.max_polar_angle);
                let eye = from_spherical(camera.distance, polar, theta);
                if self.focus.begin_return(from, eye, now) {
                    self.enter_transition(FocusState::TransitioningOut);
                }
            }
        }
    }

    fn enter_transition(&mut self, state: FocusState) {
        self.orbit.end_drag();
        self.click.cancel();
        self.zoom.reset_input();
        self.pick.clear();
        self.emit(PanoramaEvent::FocusChanged {
            state,
            target: self.focus.target(),
        });
    }

    fn advance_focus(&mut self, now: Instant) {
        let step = self.focus.advance(now);
        if let Some(pose) = step.pose {
            self.camera.eye = pose.eye;
            self.look_at = pose.look_at;
        }
        match step.entered {
            Some(FocusState::Focused) => {
                self.orbit.set_radius(FOCUSED_ORBIT_RADIUS);
                self.auto_rotate = self.options.controls.auto_rotate;
                self.go_back_visible = true;
                self.emit(PanoramaEvent::FocusChanged {
                    state: FocusState::Focused,
                    target: self.focus.target(),
                });
            }
            Some(FocusState::Orbiting) => {
                if let Some(angles) = self.focus.take_saved_angles() {
                    self.orbit.set_angles(angles);
                }
                self.orbit.set_radius(self.options.camera.distance);
                self.auto_rotate = self.options.controls.auto_rotate;
                self.go_back_visible = false;
                self.look_at = Vec3::ZERO;
                self.emit(PanoramaEvent::FocusChanged {
                    state: FocusState::Orbiting,
                    target: None,
                });
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use web_time::Duration;

    use super::*;
    use crate::input::{InputEvent, Modifiers};
    use crate::options::Options;
    use crate::scene::{Arrangement, CustomArrangement, GroupKind};

    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    /// One fruit at the origin, straight ahead of the starting camera.
    fn one_fruit() -> Options {
        let mut options = Options::default();
        options.scene.images = vec!["peach.jpg".into()];
        options.scene.arrangement = Arrangement::Custom(CustomArrangement::default());
        options
    }

    fn click(panorama: &mut FruitPanorama, at: Vec2) {
        panorama.handle_input(InputEvent::MousePressed {
            x: at.x,
            y: at.y,
            modifiers: Modifiers::NONE,
        });
        panorama.handle_input(InputEvent::MouseReleased { x: at.x, y: at.y });
    }

    fn ms(t0: Instant, millis: u64) -> Instant {
        t0 + Duration::from_millis(millis)
    }

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        last_eye: Option<Vec3>,
        last_go_back: bool,
    }

    impl FrameRenderer for Recorder {
        fn submit(&mut self, frame: &Frame<'_>) {
            self.frames += 1;
            self.last_eye = Some(frame.camera.eye);
            self.last_go_back = frame.affordances.go_back;
        }
    }

    #[test]
    fn polar_angle_stays_clamped_under_any_drag() {
        let mut panorama = FruitPanorama::new(Options::default(), 800, 600).unwrap();
        let t0 = Instant::now();
        panorama.handle_input(InputEvent::MousePressed {
            x: 0.0,
            y: 0.0,
            modifiers: Modifiers::NONE,
        });
        for (i, y) in [100_000.0, -100_000.0, 3.0, 1e7].into_iter().enumerate() {
            panorama.handle_input(InputEvent::MouseMoved {
                x: 0.0,
                y,
                modifiers: Modifiers::NONE,
            });
            panorama.update(ms(t0, 16 * i as u64));
            let polar = panorama.orbit().polar_angle();
            assert!((0.001..=std::f32::consts::PI - 0.001).contains(&polar));
            let eye = panorama.camera().eye;
            assert!(eye.x.is_finite() && eye.y.is_finite() && eye.z.is_finite());
        }
    }

    #[test]
    fn idle_ticks_rotate_monotonically() {
        let mut panorama = FruitPanorama::new(Options::default(), 800, 600).unwrap();
        let t0 = Instant::now();
        let mut previous = panorama.orbit().theta;
        for i in 1..=1000 {
            panorama.update(ms(t0, 16 * i));
            let theta = panorama.orbit().theta;
            assert!(theta > previous);
            previous = theta;
            let polar = panorama.orbit().polar_angle();
            assert!((0.001..=std::f32::consts::PI - 0.001).contains(&polar));
        }
        assert!((previous - 1.0).abs() < 1e-3);
    }

    #[test]
    fn click_on_empty_space_changes_nothing() {
        let mut panorama = FruitPanorama::new(one_fruit(), 800, 600).unwrap();
        let t0 = Instant::now();
        click(&mut panorama, Vec2::new(5.0, 5.0));
        panorama.update(t0);
        assert_eq!(panorama.focus_state(), FocusState::Orbiting);
        assert!(!panorama.go_back_visible());
    }

    #[test]
    fn drag_release_is_not_a_click() {
        let mut panorama = FruitPanorama::new(one_fruit(), 800, 600).unwrap();
        let t0 = Instant::now();
        panorama.handle_input(InputEvent::MousePressed {
            x: CENTER.x,
            y: CENTER.y,
            modifiers: Modifiers::NONE,
        });
        panorama.handle_input(InputEvent::MouseMoved {
            x: CENTER.x + 1.0,
            y: CENTER.y,
            modifiers: Modifiers::NONE,
        });
        panorama.handle_input(InputEvent::MouseReleased {
            x: CENTER.x + 1.0,
            y: CENTER.y,
        });
        panorama.update(t0);
        assert_eq!(panorama.focus_state(), FocusState::Orbiting);
    }

    #[test]
    fn focus_round_trip_restores_the_orbit() {
        let mut options = one_fruit();
        options.controls.auto_rotate = false;
        let mut panorama = FruitPanorama::new(options, 800, 600).unwrap();
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);
        let _ = panorama.subscribe(move |e| {
            if let PanoramaEvent::FocusChanged { state, .. } = e {
                sink.borrow_mut().push(*state);
            }
        });

        let t0 = Instant::now();
        panorama.update(t0);
        assert!(panorama.hovered().is_none());
        panorama.orbit.set_angles((0.2, 0.3));
        panorama.update(ms(t0, 16));
        let angles = panorama.orbit().angles();

        click(&mut panorama, CENTER);
        panorama.update(ms(t0, 32));
        assert_eq!(panorama.focus_state(), FocusState::TransitioningIn);
        assert_eq!(
            panorama.focused(),
            Some(MeshId {
                group: GroupKind::Pickable,
                index: 0
            })
        );

        // Mid-flight: no picking, drag rejected.
        panorama.update(ms(t0, 1032));
        assert!(panorama.hovered().is_none());
        panorama.handle_input(InputEvent::MousePressed {
            x: 0.0,
            y: 0.0,
            modifiers: Modifiers::NONE,
        });
        assert!(!panorama.orbit().is_dragging());
        panorama.handle_input(InputEvent::MouseReleased { x: 0.0, y: 0.0 });

        // Go back while flying in is dropped.
        assert!(!panorama.go_back());

        panorama.update(ms(t0, 2032));
        assert_eq!(panorama.focus_state(), FocusState::Focused);
        assert!(panorama.go_back_visible());
        assert_eq!(panorama.orbit().radius(), FOCUSED_ORBIT_RADIUS);
        assert!(panorama.camera().eye.length() < 0.01);

        assert!(panorama.go_back());
        panorama.update(ms(t0, 3000));
        assert_eq!(panorama.focus_state(), FocusState::TransitioningOut);
        panorama.update(ms(t0, 5000));
        assert_eq!(panorama.focus_state(), FocusState::Orbiting);
        assert!(!panorama.go_back_visible());
        assert_eq!(panorama.orbit().angles(), angles);
        assert_eq!(panorama.orbit().radius(), 10.0);
        assert_eq!(panorama.camera().target, Vec3::ZERO);
        assert!((panorama.camera().eye.length() - 10.0).abs() < 1e-3);

        assert_eq!(
            *states.borrow(),
            vec![
                FocusState::TransitioningIn,
                FocusState::Focused,
                FocusState::TransitioningOut,
                FocusState::Orbiting,
            ]
        );
    }

    #[test]
    fn arriving_focused_resumes_rotation_and_drag() {
        let mut panorama = FruitPanorama::new(one_fruit(), 800, 600).unwrap();
        assert!(panorama.auto_rotate());
        let t0 = Instant::now();
        panorama.update(t0);
        click(&mut panorama, CENTER);
        panorama.update(ms(t0, 16));
        assert_eq!(panorama.focus_state(), FocusState::TransitioningIn);

        let frozen = panorama.orbit().theta;
        panorama.update(ms(t0, 500));
        assert_eq!(panorama.orbit().theta, frozen);
        panorama.update(ms(t0, 1500));
        assert_eq!(panorama.orbit().theta, frozen);

        panorama.update(ms(t0, 2016));
        assert_eq!(panorama.focus_state(), FocusState::Focused);
        assert!(panorama.auto_rotate());
        let focused = panorama.orbit().theta;
        panorama.update(ms(t0, 2032));
        assert!(panorama.orbit().theta > focused);

        panorama.handle_input(InputEvent::MousePressed {
            x: CENTER.x,
            y: CENTER.y,
            modifiers: Modifiers::NONE,
        });
        assert!(panorama.orbit().is_dragging());
    }

    #[test]
    fn focused_view_suppresses_zoom() {
        let mut panorama = FruitPanorama::new(one_fruit(), 800, 600).unwrap();
        let t0 = Instant::now();
        panorama.update(t0);
        click(&mut panorama, CENTER);
        panorama.update(ms(t0, 16));
        panorama.update(ms(t0, 3000));
        assert_eq!(panorama.focus_state(), FocusState::Focused);

        panorama.handle_input(InputEvent::Wheel { delta_y: -100.0 });
        panorama.update(ms(t0, 3016));
        panorama.update(ms(t0, 3032));
        assert_eq!(panorama.zoom().factor(), 1.0);
        assert_eq!(panorama.camera().zoom, 1.0);
    }

    #[test]
    fn wheel_burst_zooms_for_a_limited_time() {
        let mut panorama = FruitPanorama::new(Options::default(), 800, 600).unwrap();
        let t0 = Instant::now();
        panorama.handle_input(InputEvent::Wheel { delta_y: -100.0 });
        panorama.update(t0);
        assert!(panorama.zoom().factor() > 1.0);
        for i in 1..=12 {
            panorama.update(ms(t0, 16 * i));
        }
        let after_burst = panorama.zoom().factor();
        panorama.update(ms(t0, 400));
        panorama.update(ms(t0, 416));
        assert_eq!(panorama.zoom().factor(), after_burst);
        assert!(after_burst <= 4.0);
    }

    #[test]
    fn pinch_in_zooms_out() {
        let mut panorama = FruitPanorama::new(Options::default(), 800, 600).unwrap();
        let t0 = Instant::now();
        panorama.handle_input(InputEvent::TouchStart {
            touches: vec![Vec2::new(100.0, 100.0), Vec2::new(300.0, 100.0)],
        });
        panorama.handle_input(InputEvent::TouchMove {
            touches: vec![Vec2::new(150.0, 100.0), Vec2::new(250.0, 100.0)],
        });
        panorama.update(t0);
        assert!(panorama.zoom().factor() < 1.0);
        panorama.handle_input(InputEvent::TouchEnd {
            touches: Vec::new(),
        });
        let released = panorama.zoom().factor();
        panorama.update(ms(t0, 16));
        assert_eq!(panorama.zoom().factor(), released);
    }

    #[test]
    fn tick_runs_hook_then_renderer() {
        let mut panorama = FruitPanorama::new(one_fruit(), 800, 600).unwrap();
        let hooked = Rc::new(RefCell::new(0_usize));
        let sink = Rc::clone(&hooked);
        panorama.set_tick_hook(move |frame| {
            assert_eq!(frame.focus, FocusState::Orbiting);
            *sink.borrow_mut() += 1;
        });
        let mut renderer = Recorder::default();
        let t0 = Instant::now();
        assert!(panorama.scene().is_dirty());
        panorama.tick(t0, &mut renderer);
        panorama.tick(ms(t0, 16), &mut renderer);
        assert_eq!(renderer.frames, 2);
        assert_eq!(*hooked.borrow(), 2);
        assert_eq!(renderer.last_eye, Some(panorama.camera().eye));
        assert!(!renderer.last_go_back);
        assert!(!panorama.scene().is_dirty());

        panorama.clear_tick_hook();
        panorama.tick(ms(t0, 32), &mut renderer);
        assert_eq!(*hooked.borrow(), 2);
    }
}
