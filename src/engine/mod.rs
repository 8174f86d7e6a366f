//! The viewer instance: owns every piece of interaction state and sequences
//! it once per frame.
//!
//! Input handlers and setters only mutate state records. Anything that
//! depends on time (wheel bursts, focus transitions) is resolved by the
//! next [`update`](FruitPanorama::update) against the clock the host
//! passes in.

mod accessors;
mod buttons;
mod construction;
mod events;
mod input;
mod tick;

use glam::{Vec2, Vec3};

pub use self::buttons::Button;
pub use self::events::{ListenerId, PanoramaEvent};
pub use self::tick::{Affordances, Frame, FrameRenderer};
use crate::camera::{Camera, OrbitState, ZoomState};
use crate::focus::FocusEngine;
use crate::input::click::ClickTracker;
use crate::input::PointerNormalizer;
use crate::loading::LoadTracker;
use crate::options::{ButtonKind, Options};
use crate::picking::{PickState, RayCaster};
use crate::scene::{MeshId, Scene};

type Listener = Box<dyn FnMut(&PanoramaEvent)>;
type TickHook = Box<dyn FnMut(&Frame<'_>)>;

/// Transition request recorded by input and started on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusRequest {
    /// Fly into the picked fruit.
    Enter(MeshId),
    /// Fly back out to the orbit.
    Leave,
}

/// An interactive fruit panorama.
///
/// Owns the camera, orbit and zoom controllers, picking, the focus state
/// machine and the scene. Hosts feed it [`InputEvent`]s and button presses,
/// call [`tick`](Self::tick) once per frame, and draw the [`Frame`] handed
/// to their [`FrameRenderer`].
///
/// [`InputEvent`]: crate::input::InputEvent
pub struct FruitPanorama {
    options: Options,
    camera: Camera,
    orbit: OrbitState,
    zoom: ZoomState,
    pick: PickState,
    click: ClickTracker,
    normalizer: PointerNormalizer,
    focus: FocusEngine,
    scene: Scene,
    caster: Box<dyn RayCaster>,
    /// Point the camera looks at: the origin while orbiting, the focused
    /// fruit while focused.
    look_at: Vec3,
    /// Canvas size in pixels.
    viewport: Vec2,

    // Affordances
    auto_rotate: bool,
    buttons: Vec<ButtonKind>,
    go_back_visible: bool,
    listening: bool,

    // Deferred until the next tick
    pending_wheel: Option<f32>,
    pending_focus: Option<FocusRequest>,

    loading: LoadTracker,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    tick_hook: Option<TickHook>,
}
