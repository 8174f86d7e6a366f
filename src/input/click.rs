use glam::Vec2;

/// Tells a click (press and release in place) from a drag.
///
/// The candidate is armed on press, follows every tracked move, and is
/// resolved on release: it is a click only if the last pointer position is
/// within `tolerance` pixels of the press position.
#[derive(Debug, Clone)]
pub(crate) struct ClickTracker {
    start: Option<Vec2>,
    last: Vec2,
    tolerance: f32,
}

impl ClickTracker {
    pub(crate) fn new(tolerance: f32) -> Self {
        Self {
            start: None,
            last: Vec2::ZERO,
            tolerance: tolerance.max(0.0),
        }
    }

    /// Arm a click candidate at `position`.
    pub(crate) fn press(&mut self, position: Vec2) {
        self.start = Some(position);
        self.last = position;
    }

    /// Follow the pointer while a candidate is armed.
    pub(crate) fn track(&mut self, position: Vec2) {
        if self.start.is_some() {
            self.last = position;
        }
    }

    /// Resolve the candidate. Returns the click position when the pointer
    /// stayed in place.
    pub(crate) fn release(&mut self, position: Option<Vec2>) -> Option<Vec2> {
        let start = self.start.take()?;
        if let Some(position) = position {
            self.last = position;
        }
        (start.distance(self.last) <= self.tolerance).then_some(self.last)
    }

    /// Drop the candidate without producing a click.
    pub(crate) fn cancel(&mut self) {
        self.start = None;
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.start.is_some()
    }
}
