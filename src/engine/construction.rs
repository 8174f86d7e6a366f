//! Engine construction and scene (re)building.

use glam::{Vec2, Vec3};

use super::FruitPanorama;
use crate::camera::{Camera, OrbitState, ZoomState};
use crate::error::PanoramaError;
use crate::focus::FocusEngine;
use crate::input::click::ClickTracker;
use crate::input::PointerNormalizer;
use crate::loading::LoadTracker;
use crate::options::Options;
use crate::picking::{BoundingSphereCaster, PickState, RayCaster};
use crate::scene::Scene;

impl FruitPanorama {
    /// Create a panorama for a `width` × `height` pixel canvas.
    ///
    /// Fails only when `options` violate an invariant the interaction core
    /// relies on. An arrangement that cannot lay out the given images is
    /// logged and leaves the scene empty.
    pub fn new(
        options: Options,
        width: u32,
        height: u32,
    ) -> Result<Self, PanoramaError> {
        options.validate()?;

        let aspect = if width > 0 && height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };
        let mut camera = Camera::new(&options.camera, aspect);
        let orbit = OrbitState::new(&options.camera, &options.controls);
        let zoom = ZoomState::new(&options.controls);
        camera.eye = orbit.eye(Vec3::ZERO);
        camera.zoom = zoom.factor();
        camera.look_at(Vec3::ZERO);

        let mut scene = Scene::new();
        scene.set_background(options.display.background.clone());

        let mut panorama = Self {
            camera,
            orbit,
            zoom,
            pick: PickState::new(),
            click: ClickTracker::new(options.controls.click_tolerance_px),
            normalizer: PointerNormalizer::new(),
            focus: FocusEngine::new(
                options.animation.focus_duration(),
                options.animation.easing,
            ),
            scene,
            caster: Box::new(BoundingSphereCaster),
            look_at: Vec3::ZERO,
            viewport: Vec2::new(width as f32, height as f32),
            auto_rotate: options.controls.auto_rotate,
            buttons: options.display.buttons.clone(),
            go_back_visible: false,
            listening: true,
            pending_wheel: None,
            pending_focus: None,
            loading: LoadTracker::new(),
            listeners: Vec::new(),
            next_listener: 0,
            tick_hook: None,
            options,
        };
        panorama.build_scene();
        log::debug!(
            "fruit panorama ready: {} fruit, {} decorations",
            panorama.scene.pickable().len(),
            panorama.scene.decoration().len()
        );
        Ok(panorama)
    }

    /// Replace the ray-intersection query used for picking.
    #[must_use]
    pub fn with_ray_caster(mut self, caster: Box<dyn RayCaster>) -> Self {
        self.caster = caster;
        self
    }

    /// Populate the scene from the configured arrangement.
    pub(super) fn build_scene(&mut self) {
        let scene_options = &self.options.scene;
        if let Err(e) = scene_options.arrangement.build(
            &scene_options.images,
            self.options.display.segments,
            &mut self.scene,
        ) {
            log::warn!("{e}");
        }
    }

    /// Throw away every mesh and lay the arrangement out again.
    pub(super) fn rebuild_scene(&mut self) {
        self.scene.clear();
        self.pick.clear();
        self.loading.reset_counts();
        self.build_scene();
    }
}
