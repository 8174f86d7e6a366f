//! Read-only queries and runtime setters for [`FruitPanorama`].

use glam::Vec2;

use super::{FocusRequest, FruitPanorama, PanoramaEvent};
use crate::camera::{Camera, OrbitState, ZoomDirection, ZoomState};
use crate::focus::FocusState;
use crate::loading::{LoadEvent, LoadOutcome};
use crate::options::{Background, ButtonKind, Options};
use crate::scene::{GroupKind, MeshId, Scene};

// ── Queries ──

impl FruitPanorama {
    /// Options the panorama was built with, including runtime changes.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Camera as of the last update.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Orbit angles and drag state.
    #[must_use]
    pub fn orbit(&self) -> &OrbitState {
        &self.orbit
    }

    /// Zoom factor and active direction.
    #[must_use]
    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current focus state.
    #[must_use]
    pub fn focus_state(&self) -> FocusState {
        self.focus.state()
    }

    /// Fruit being focused, or flown into / out of.
    #[must_use]
    pub fn focused(&self) -> Option<MeshId> {
        self.focus.target()
    }

    /// Fruit under the pointer as of the last update.
    #[must_use]
    pub fn hovered(&self) -> Option<MeshId> {
        self.pick.hovered()
    }

    /// Whether the "go back" control is shown.
    #[must_use]
    pub fn go_back_visible(&self) -> bool {
        self.go_back_visible
    }

    /// Whether ambient rotation is on.
    #[must_use]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Enabled on-screen buttons.
    #[must_use]
    pub fn buttons(&self) -> &[ButtonKind] {
        &self.buttons
    }

    /// Whether the preloader overlay should be drawn.
    #[must_use]
    pub fn preloader_visible(&self) -> bool {
        self.options.display.enable_preloader && !self.loading.is_complete()
    }

    /// Texture load percentage, once anything was queued.
    #[must_use]
    pub fn load_progress(&self) -> Option<u8> {
        self.loading.progress()
    }
}

// ── Setters ──

impl FruitPanorama {
    /// Replace the background.
    pub fn set_background(&mut self, background: Background) {
        self.options.display.background = background.clone();
        self.scene.set_background(background);
    }

    /// Replace the set of enabled on-screen buttons. Removing the zoom
    /// buttons stops any zoom they were holding.
    pub fn set_buttons(&mut self, buttons: Vec<ButtonKind>) {
        if !buttons.contains(&ButtonKind::Zoom) {
            self.zoom.release(ZoomDirection::Plus);
            self.zoom.release(ZoomDirection::Minus);
        }
        self.options.display.buttons.clone_from(&buttons);
        self.buttons = buttons;
    }

    /// Texture the `index`-th fruit, or drop its texture with `None`.
    /// Returns `false` if there is no such fruit.
    pub fn set_texture(&mut self, index: usize, url: Option<&str>) -> bool {
        let id = MeshId {
            group: GroupKind::Pickable,
            index,
        };
        if !self.scene.set_texture(id, url) {
            return false;
        }
        if let (Some(image), Some(url)) =
            (self.options.scene.images.get_mut(index), url)
        {
            url.clone_into(image);
        }
        true
    }

    /// Paint the `index`-th fruit a flat color. Returns `false` if there is
    /// no such fruit.
    pub fn set_color(&mut self, index: usize, color: &str) -> bool {
        self.scene.set_color(
            MeshId {
                group: GroupKind::Pickable,
                index,
            },
            color,
        )
    }

    /// Attach (`true`) or detach (`false`) input handling. Detaching ends
    /// any drag and drops pending click, focus and zoom input.
    pub fn set_event_listeners(&mut self, enabled: bool) {
        if self.listening == enabled {
            return;
        }
        self.listening = enabled;
        if !enabled {
            self.orbit.end_drag();
            self.click.cancel();
            self.zoom.reset_input();
            self.pending_wheel = None;
            self.pending_focus = None;
        }
        log::debug!("event listeners {}", if enabled { "on" } else { "off" });
    }

    /// Change the orbit distance. Takes effect immediately while orbiting,
    /// otherwise when the camera returns. Non-positive distances are
    /// ignored.
    pub fn set_camera_distance(&mut self, distance: f32) {
        if !(distance.is_finite() && distance > 0.0) {
            log::debug!("ignoring camera distance {distance}");
            return;
        }
        self.options.camera.distance = distance;
        if self.focus.state() == FocusState::Orbiting {
            self.orbit.set_radius(distance);
        }
    }

    /// Turn ambient rotation on or off, and make that the default restored
    /// after each focus transition.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.options.controls.auto_rotate = enabled;
        self.auto_rotate = enabled;
    }

    /// Flip ambient rotation for now; the configured default is kept.
    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
        log::debug!("auto-rotate {}", if self.auto_rotate { "on" } else { "off" });
    }

    /// The canvas was resized.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.resize(width, height);
        self.viewport = Vec2::new(width as f32, height as f32);
    }

    /// Leave the focused fruit. Only honored while focused; returns whether
    /// the fly-out was queued for the next tick.
    pub fn go_back(&mut self) -> bool {
        if self.focus.state() != FocusState::Focused {
            log::debug!("go back ignored in {:?}", self.focus.state());
            return false;
        }
        self.pending_focus = Some(FocusRequest::Leave);
        true
    }

    /// Fold a host texture-load report into progress tracking.
    ///
    /// A failed texture rebuilds the scene a few times before giving up.
    pub fn report_load(&mut self, event: &LoadEvent) {
        match self.loading.record(event) {
            LoadOutcome::Pending => {}
            LoadOutcome::Progress(pct) => {
                self.emit(PanoramaEvent::LoadProgress(pct));
            }
            LoadOutcome::Complete => {
                self.emit(PanoramaEvent::LoadProgress(100));
                self.emit(PanoramaEvent::LoadComplete);
            }
            LoadOutcome::Rebuild => self.rebuild_scene(),
            LoadOutcome::GiveUp => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_time::Instant;

    use super::*;
    use crate::engine::Button;
    use crate::scene::{Arrangement, CustomArrangement};

    fn with_fruit(n: usize) -> FruitPanorama {
        let mut options = Options::default();
        options.scene.images = (0..n).map(|i| format!("{i}.jpg")).collect();
        options.scene.arrangement = Arrangement::Custom(CustomArrangement::default());
        FruitPanorama::new(options, 800, 600).unwrap()
    }

    #[test]
    fn texture_and_color_target_fruit_by_index() {
        let mut panorama = with_fruit(2);
        assert!(panorama.set_texture(1, Some("kiwi.jpg")));
        let id = MeshId {
            group: GroupKind::Pickable,
            index: 1,
        };
        let mesh = panorama.scene().mesh(id).unwrap();
        assert_eq!(mesh.material.texture.as_deref(), Some("kiwi.jpg"));
        assert_eq!(panorama.options().scene.images[1], "kiwi.jpg");

        assert!(panorama.set_color(1, "orange"));
        let mesh = panorama.scene().mesh(id).unwrap();
        assert_eq!(mesh.material.texture, None);
        assert_eq!(mesh.material.color, "orange");

        assert!(!panorama.set_texture(5, Some("x.jpg")));
        assert!(!panorama.set_color(5, "red"));
    }

    #[test]
    fn camera_distance_applies_to_the_orbit() {
        let mut panorama = with_fruit(1);
        panorama.set_camera_distance(20.0);
        panorama.update(Instant::now());
        assert!((panorama.camera().eye.length() - 20.0).abs() < 1e-3);
        panorama.set_camera_distance(-1.0);
        assert_eq!(panorama.orbit().radius(), 20.0);
    }

    #[test]
    fn auto_rotate_setter_changes_the_default_toggle_does_not() {
        let mut panorama = with_fruit(1);
        panorama.toggle_auto_rotate();
        assert!(!panorama.auto_rotate());
        assert!(panorama.options().controls.auto_rotate);
        panorama.set_auto_rotate(false);
        assert!(!panorama.options().controls.auto_rotate);
        panorama.toggle_auto_rotate();
        assert!(panorama.auto_rotate());
    }

    #[test]
    fn removing_zoom_buttons_stops_zooming() {
        let mut panorama = with_fruit(1);
        let _ = panorama.handle_button(Button::ZoomPlus, true);
        panorama.set_buttons(vec![ButtonKind::FullScreen]);
        assert_eq!(panorama.zoom().direction(), None);
        assert_eq!(panorama.buttons(), &[ButtonKind::FullScreen]);
    }

    #[test]
    fn background_reaches_the_scene() {
        let mut panorama = with_fruit(1);
        let background = Background::Panorama("sky.jpg".into());
        panorama.set_background(background.clone());
        assert_eq!(panorama.scene().background(), &background);
        assert_eq!(panorama.options().display.background, background);
    }

    #[test]
    fn load_progress_hides_the_preloader() {
        let mut panorama = with_fruit(2);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let _ = panorama.subscribe(move |e| sink.borrow_mut().push(*e));

        assert!(panorama.preloader_visible());
        for url in ["0.jpg", "1.jpg"] {
            panorama.report_load(&LoadEvent::Queued { url: url.into() });
        }
        panorama.report_load(&LoadEvent::Loaded { url: "0.jpg".into() });
        assert_eq!(panorama.load_progress(), Some(50));
        assert!(panorama.preloader_visible());
        panorama.report_load(&LoadEvent::Loaded { url: "1.jpg".into() });
        assert!(!panorama.preloader_visible());
        assert_eq!(
            *events.borrow(),
            vec![
                PanoramaEvent::LoadProgress(50),
                PanoramaEvent::LoadProgress(100),
                PanoramaEvent::LoadComplete,
            ]
        );
    }

    #[test]
    fn failed_texture_rebuilds_the_scene() {
        let mut panorama = with_fruit(2);
        assert!(panorama.set_color(0, "red"));
        panorama.report_load(&LoadEvent::Failed { url: "0.jpg".into() });
        let id = MeshId {
            group: GroupKind::Pickable,
            index: 0,
        };
        // Rebuilt from the configured images, so the color is gone.
        let mesh = panorama.scene().mesh(id).unwrap();
        assert_eq!(mesh.material.texture.as_deref(), Some("0.jpg"));
        assert_eq!(panorama.scene().pickable().len(), 2);
    }

    #[test]
    fn detached_listeners_drop_the_drag() {
        let mut panorama = with_fruit(1);
        panorama.handle_input(crate::input::InputEvent::MousePressed {
            x: 1.0,
            y: 1.0,
            modifiers: crate::input::Modifiers::NONE,
        });
        assert!(panorama.orbit().is_dragging());
        panorama.set_event_listeners(false);
        assert!(!panorama.orbit().is_dragging());
        panorama.set_event_listeners(true);
        assert!(!panorama.orbit().is_dragging());
    }

    #[test]
    fn detaching_drops_a_queued_fly_in() {
        let mut panorama = with_fruit(1);
        let t0 = Instant::now();
        panorama.update(t0);
        panorama.handle_input(crate::input::InputEvent::MousePressed {
            x: 400.0,
            y: 300.0,
            modifiers: crate::input::Modifiers::NONE,
        });
        panorama.handle_input(crate::input::InputEvent::MouseReleased {
            x: 400.0,
            y: 300.0,
        });
        assert!(panorama.pending_focus.is_some());
        panorama.set_event_listeners(false);
        panorama.update(t0 + web_time::Duration::from_millis(16));
        assert_eq!(panorama.focus_state(), FocusState::Orbiting);
        assert_eq!(panorama.focused(), None);
    }

    #[test]
    fn resize_updates_aspect_and_ignores_zero() {
        let mut panorama = with_fruit(1);
        panorama.resize(1000, 500);
        assert_eq!(panorama.camera().aspect, 2.0);
        panorama.resize(0, 500);
        assert_eq!(panorama.camera().aspect, 2.0);
    }
}
