//! Typed notifications delivered to registered listeners.

use super::FruitPanorama;
use crate::focus::FocusState;
use crate::scene::MeshId;

/// Notification emitted by the panorama.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanoramaEvent {
    /// The focus state machine entered a new state.
    FocusChanged {
        /// State just entered.
        state: FocusState,
        /// Fruit involved in the transition, if any.
        target: Option<MeshId>,
    },
    /// Texture loading progressed (percentage, truncated).
    LoadProgress(u8),
    /// Every queued texture has loaded.
    LoadComplete,
    /// The fullscreen button was pressed; the host owns the window.
    FullscreenToggleRequested,
}

/// Handle returned by [`FruitPanorama::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl FruitPanorama {
    /// Register a listener for every subsequent [`PanoramaEvent`].
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&PanoramaEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub(super) fn emit(&mut self, event: PanoramaEvent) {
        log::debug!("event: {event:?}");
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}
