//! Enigo-backed OS injection.

use enigo::{Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};

use handwave_common::error::{HandwaveError, HandwaveResult};
use handwave_gesture_core::{Action, VolumeDirection};
use handwave_hand_model::geometry::ScreenSize;

use crate::InputInjector;

/// Injects pointer moves, left clicks, and volume key taps through the
/// OS automation layer.
pub struct EnigoInjector {
    enigo: Enigo,
}

impl EnigoInjector {
    /// Connect to the OS input layer.
    pub fn new() -> HandwaveResult<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| HandwaveError::injection(format!("Failed to initialize enigo: {e}")))?;
        Ok(Self { enigo })
    }

    /// Size of the main display, for pointer mapping.
    pub fn main_display(&self) -> HandwaveResult<ScreenSize> {
        let (width, height) = self
            .enigo
            .main_display()
            .map_err(|e| HandwaveError::injection(format!("Failed to query display: {e}")))?;
        if width <= 0 || height <= 0 {
            return Err(HandwaveError::injection(format!(
                "Implausible display size {width}x{height}"
            )));
        }
        Ok(ScreenSize::new(width as u32, height as u32))
    }
}

impl InputInjector for EnigoInjector {
    fn dispatch(&mut self, action: &Action) -> HandwaveResult<()> {
        let result = match action {
            Action::PointerMove { x, y } => self.enigo.move_mouse(*x, *y, Coordinate::Abs),
            Action::Click => self.enigo.button(Button::Left, Direction::Click),
            Action::Volume { direction } => {
                let key = match direction {
                    VolumeDirection::Up => Key::VolumeUp,
                    VolumeDirection::Down => Key::VolumeDown,
                };
                self.enigo.key(key, Direction::Click)
            }
        };

        result.map_err(|e| HandwaveError::injection(format!("Failed to dispatch {action}: {e}")))
    }

    fn name(&self) -> &str {
        "enigo"
    }
}
