//! Standalone window backed by winit.
//!
//! Translates window events into [`InputEvent`]s and key presses into
//! on-screen [`Button`]s, and ticks the panorama on every redraw. Drawing
//! is delegated to a [`FrameRenderer`]; without one, frames are only
//! logged.
//!
//! ```no_run
//! # use fruitpano::viewer::Viewer;
//! Viewer::builder()
//!     .with_title("Grapes")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```
//!
//! Keys: `Z`/`X` hold to zoom in/out, `R` toggles auto-rotation, `F`
//! toggles fullscreen, `Escape` or `Backspace` leaves a focused fruit.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;
use web_time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{
    ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase,
    WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

use crate::engine::{Button, Frame, FrameRenderer, FruitPanorama, PanoramaEvent};
use crate::error::PanoramaError;
use crate::input::{InputEvent, Modifiers};
use crate::options::Options;

/// Pixels of DOM-style wheel delta per winit line step.
const LINE_DELTA_PX: f32 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    renderer: Option<Box<dyn FrameRenderer>>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Fruit Panorama".into(),
            renderer: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Draw frames with `renderer` instead of logging them.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn FrameRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
            renderer: self.renderer.unwrap_or_else(|| Box::new(LogRenderer)),
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window hosting one panorama.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    renderer: Box<dyn FrameRenderer>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), PanoramaError> {
        self.options.validate()?;
        let event_loop = EventLoop::new()
            .map_err(|e| PanoramaError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            panorama: None,
            renderer: self.renderer,
            options: Some(self.options),
            title: self.title,
            cursor: Vec2::ZERO,
            modifiers: Modifiers::NONE,
            touches: BTreeMap::new(),
            fullscreen_requested: Rc::new(Cell::new(false)),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| PanoramaError::Viewer(e.to_string()))
    }
}

/// Renderer used when the host supplies none.
struct LogRenderer;

impl FrameRenderer for LogRenderer {
    fn submit(&mut self, frame: &Frame<'_>) {
        if frame.scene.is_dirty() {
            log::debug!(
                "scene changed: {} fruit, {} decorations, background {:?}",
                frame.scene.pickable().len(),
                frame.scene.decoration().len(),
                frame.scene.background()
            );
        }
        log::trace!(
            "frame: eye {:?} {:?} hovered {:?}",
            frame.camera.eye,
            frame.focus,
            frame.hovered
        );
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    panorama: Option<FruitPanorama>,
    renderer: Box<dyn FrameRenderer>,
    options: Option<Options>,
    title: String,
    cursor: Vec2,
    modifiers: Modifiers,
    /// Active touch points by finger id, in start order.
    touches: BTreeMap<u64, Vec2>,
    fullscreen_requested: Rc<Cell<bool>>,
}

fn viewport_size(inner: PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

fn key_button(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::KeyZ => Some(Button::ZoomPlus),
        KeyCode::KeyX => Some(Button::ZoomMinus),
        KeyCode::KeyR => Some(Button::AutoRotate),
        KeyCode::KeyF => Some(Button::FullScreen),
        KeyCode::Escape | KeyCode::Backspace => Some(Button::GoBack),
        _ => None,
    }
}

impl ViewerApp {
    fn touch_event(&mut self, touch: Touch) -> Option<InputEvent> {
        let location =
            Vec2::new(touch.location.x as f32, touch.location.y as f32);
        match touch.phase {
            TouchPhase::Started => {
                let _ = self.touches.insert(touch.id, location);
                Some(InputEvent::TouchStart {
                    touches: self.touches.values().copied().collect(),
                })
            }
            TouchPhase::Moved => {
                let _ = self.touches.insert(touch.id, location);
                Some(InputEvent::TouchMove {
                    touches: self.touches.values().copied().collect(),
                })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let _ = self.touches.remove(&touch.id)?;
                Some(InputEvent::TouchEnd {
                    touches: self.touches.values().copied().collect(),
                })
            }
        }
    }

    fn toggle_fullscreen(&self) {
        let Some(window) = &self.window else {
            return;
        };
        if window.fullscreen().is_some() {
            window.set_fullscreen(None);
        } else {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = Window::default_attributes().with_title(&self.title);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let options = self.options.take().unwrap_or_default();
        let mut panorama = match FruitPanorama::new(options, vp_w, vp_h) {
            Ok(p) => p,
            Err(e) => {
                log::error!("Failed to initialize panorama: {e}");
                event_loop.exit();
                return;
            }
        };

        let fullscreen = Rc::clone(&self.fullscreen_requested);
        let _ = panorama.subscribe(move |event| match event {
            PanoramaEvent::FullscreenToggleRequested => fullscreen.set(true),
            PanoramaEvent::FocusChanged { state, target } => {
                log::info!("focus: {state:?} {target:?}");
            }
            _ => {}
        });

        window.request_redraw();
        self.window = Some(window);
        self.panorama = Some(panorama);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let input = match event {
            WindowEvent::Resized(size) => {
                let (vp_w, vp_h) = viewport_size(size);
                if let Some(panorama) = &mut self.panorama {
                    panorama.resize(vp_w, vp_h);
                }
                None
            }

            WindowEvent::RedrawRequested => {
                if let Some(panorama) = &mut self.panorama {
                    panorama.tick(Instant::now(), self.renderer.as_mut());
                }
                if self.fullscreen_requested.replace(false) {
                    self.toggle_fullscreen();
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
                None
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.into();
                None
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(InputEvent::MouseMoved {
                    x: self.cursor.x,
                    y: self.cursor.y,
                    modifiers: self.modifiers,
                })
            }

            WindowEvent::CursorLeft { .. } => Some(InputEvent::MouseLeft),

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => Some(match state {
                ElementState::Pressed => InputEvent::MousePressed {
                    x: self.cursor.x,
                    y: self.cursor.y,
                    modifiers: self.modifiers,
                },
                ElementState::Released => InputEvent::MouseReleased {
                    x: self.cursor.x,
                    y: self.cursor.y,
                },
            }),

            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports scrolling up as positive; the panorama uses
                // the DOM convention where negative zooms in.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_DELTA_PX,
                    MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32),
                };
                Some(InputEvent::Wheel { delta_y })
            }

            WindowEvent::Touch(touch) => self.touch_event(touch),

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if event.repeat {
                    return;
                }
                if let (Some(button), Some(panorama)) =
                    (key_button(code), &mut self.panorama)
                {
                    let pressed = event.state == ElementState::Pressed;
                    let _ = panorama.handle_button(button, pressed);
                }
                None
            }

            _ => None,
        };

        if let (Some(input), Some(panorama)) = (input, &mut self.panorama) {
            panorama.handle_input(input);
        }
    }
}
