//! On-screen controls.

use super::{FruitPanorama, PanoramaEvent};
use crate::camera::ZoomDirection;
use crate::options::ButtonKind;

/// A single on-screen control as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Zoom in while held.
    ZoomPlus,
    /// Zoom out while held.
    ZoomMinus,
    /// Toggle ambient rotation.
    AutoRotate,
    /// Ask the host to toggle fullscreen.
    FullScreen,
    /// Leave the focused fruit.
    GoBack,
}

impl Button {
    /// Configuration entry that enables this control. "Go back" has none;
    /// it follows the focus state instead.
    #[must_use]
    pub fn kind(self) -> Option<ButtonKind> {
        match self {
            Self::ZoomPlus | Self::ZoomMinus => Some(ButtonKind::Zoom),
            Self::AutoRotate => Some(ButtonKind::AutoRotate),
            Self::FullScreen => Some(ButtonKind::FullScreen),
            Self::GoBack => None,
        }
    }
}

impl FruitPanorama {
    /// Whether `button` is currently shown.
    #[must_use]
    pub fn is_button_visible(&self, button: Button) -> bool {
        match button.kind() {
            Some(kind) => self.buttons.contains(&kind),
            None => self.go_back_visible,
        }
    }

    /// Forward a press (`pressed = true`) or release of an on-screen
    /// control. Returns `false` when the control is hidden and the event
    /// was dropped.
    ///
    /// Zoom buttons zoom for as long as they are held; the other controls
    /// act on press and ignore the release.
    pub fn handle_button(&mut self, button: Button, pressed: bool) -> bool {
        if !self.is_button_visible(button) {
            log::debug!("{button:?} is hidden, ignoring");
            return false;
        }
        match (button, pressed) {
            (Button::ZoomPlus, true) => self.zoom.press(ZoomDirection::Plus),
            (Button::ZoomPlus, false) => self.zoom.release(ZoomDirection::Plus),
            (Button::ZoomMinus, true) => self.zoom.press(ZoomDirection::Minus),
            (Button::ZoomMinus, false) => {
                self.zoom.release(ZoomDirection::Minus);
            }
            (Button::AutoRotate, true) => self.toggle_auto_rotate(),
            (Button::FullScreen, true) => {
                self.emit(PanoramaEvent::FullscreenToggleRequested);
            }
            (Button::GoBack, true) => {
                let _ = self.go_back();
            }
            (_, false) => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use web_time::{Duration, Instant};

    use super::*;
    use crate::options::Options;

    fn panorama() -> FruitPanorama {
        FruitPanorama::new(Options::default(), 800, 600).unwrap()
    }

    #[test]
    fn zoom_button_zooms_while_held() {
        let mut panorama = panorama();
        let t0 = Instant::now();
        assert!(panorama.handle_button(Button::ZoomPlus, true));
        for i in 1..=10 {
            panorama.update(t0 + Duration::from_millis(16 * i));
        }
        let held = panorama.zoom().factor();
        assert!((held - 1.1).abs() < 1e-4);

        assert!(panorama.handle_button(Button::ZoomPlus, false));
        panorama.update(t0 + Duration::from_millis(500));
        assert_eq!(panorama.zoom().factor(), held);
        assert_eq!(panorama.camera().zoom, held);
    }

    #[test]
    fn releasing_the_other_button_keeps_zooming() {
        let mut panorama = panorama();
        let _ = panorama.handle_button(Button::ZoomMinus, true);
        let _ = panorama.handle_button(Button::ZoomPlus, false);
        assert_eq!(panorama.zoom().direction(), Some(ZoomDirection::Minus));
    }

    #[test]
    fn hidden_buttons_are_ignored() {
        let mut panorama = panorama();
        panorama.set_buttons(vec![ButtonKind::AutoRotate]);
        assert!(!panorama.handle_button(Button::ZoomPlus, true));
        assert_eq!(panorama.zoom().direction(), None);
        assert!(!panorama.handle_button(Button::GoBack, true));
        assert!(!panorama.is_button_visible(Button::FullScreen));
    }

    #[test]
    fn auto_rotate_button_toggles_on_press_only() {
        let mut panorama = panorama();
        assert!(panorama.auto_rotate());
        let _ = panorama.handle_button(Button::AutoRotate, true);
        assert!(!panorama.auto_rotate());
        let _ = panorama.handle_button(Button::AutoRotate, false);
        assert!(!panorama.auto_rotate());
    }

    #[test]
    fn fullscreen_button_notifies_the_host() {
        let mut panorama = panorama();
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        let _ = panorama.subscribe(move |e| {
            if *e == PanoramaEvent::FullscreenToggleRequested {
                sink.set(sink.get() + 1);
            }
        });
        let _ = panorama.handle_button(Button::FullScreen, true);
        let _ = panorama.handle_button(Button::FullScreen, false);
        assert_eq!(count.get(), 1);
    }
}
