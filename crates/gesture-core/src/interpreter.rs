//! The gesture interpreter: mode classification and action dispatch.
//!
//! One invocation per captured frame. The interpreter decides WHAT input
//! actions to request; performing them is the injector's job. All state
//! (current mode, click debounce) travels through [`InterpreterState`],
//! in and out of every call.

use serde::{Deserialize, Serialize};

use handwave_common::config::GestureDefaults;
use handwave_hand_model::geometry::{pixel_to_screen, ScreenSize};
use handwave_hand_model::landmark::{landmarks, LandmarkFrame};
use handwave_hand_model::stream::TimestampNs;

/// The interpreter's operating mode. Sticky: persists across frames until
/// a switch gesture is recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Index fingertip drives the pointer; thumb-index pinch clicks.
    #[default]
    Mouse,
    /// Thumb-index pinch distance drives volume keys.
    Volume,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Mouse => write!(f, "mouse"),
            Mode::Volume => write!(f, "volume"),
        }
    }
}

/// Direction of a volume key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeDirection {
    Up,
    Down,
}

/// An input-device action requested by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Move the pointer to absolute screen coordinates.
    PointerMove { x: i32, y: i32 },

    /// Left mouse click at the current pointer position.
    Click,

    /// Tap a volume key.
    Volume { direction: VolumeDirection },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::PointerMove { x, y } => write!(f, "pointer_move({x}, {y})"),
            Action::Click => write!(f, "click"),
            Action::Volume {
                direction: VolumeDirection::Up,
            } => write!(f, "volume_up"),
            Action::Volume {
                direction: VolumeDirection::Down,
            } => write!(f, "volume_down"),
        }
    }
}

/// Gesture thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Thumb-to-index distance (pixels) below which a pinch is recognized.
    /// The comparison is strict: a distance exactly at the threshold is
    /// not a pinch.
    pub pinch_distance_px: f64,

    /// Minimum time between synthesized clicks, in seconds (strict `>`).
    pub click_debounce_secs: f64,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            pinch_distance_px: 50.0,
            click_debounce_secs: 0.3,
        }
    }
}

impl From<GestureDefaults> for InterpreterConfig {
    fn from(defaults: GestureDefaults) -> Self {
        Self {
            pinch_distance_px: defaults.pinch_distance_px,
            click_debounce_secs: defaults.click_debounce_secs,
        }
    }
}

impl InterpreterConfig {
    fn click_debounce_ns(&self) -> u64 {
        (self.click_debounce_secs * 1_000_000_000.0) as u64
    }
}

/// Interpreter state carried across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterpreterState {
    /// Current operating mode.
    pub mode: Mode,

    /// Timestamp of the last synthesized click, if any.
    pub last_click_ns: Option<TimestampNs>,
}

/// The switch-to-volume gesture: thumb tip below the index tip while the
/// middle tip sits above both (image coordinates, y grows downward).
pub fn volume_switch_gesture(frame: &LandmarkFrame) -> bool {
    let thumb = frame.point(landmarks::THUMB_TIP);
    let index = frame.point(landmarks::INDEX_FINGER_TIP);
    let middle = frame.point(landmarks::MIDDLE_FINGER_TIP);
    thumb.y > index.y && middle.y < index.y && middle.y < thumb.y
}

/// The switch-to-mouse gesture: open hand, all five fingers extended.
pub fn open_hand_gesture(frame: &LandmarkFrame) -> bool {
    frame.extended_finger_count() == 5
}

/// The gesture interpreter.
pub struct GestureInterpreter {
    config: InterpreterConfig,
}

impl GestureInterpreter {
    /// Create an interpreter with the given thresholds.
    pub fn new(config: InterpreterConfig) -> Self {
        Self { config }
    }

    /// Create an interpreter with the reference thresholds.
    pub fn with_defaults() -> Self {
        Self::new(InterpreterConfig::default())
    }

    /// The active thresholds.
    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Evaluate both mode-switch rules against a frame.
    ///
    /// Both rules are checked every invocation; when both fire the
    /// open-hand rule wins because it is evaluated last. Neither rule
    /// leaves the current mode unchanged.
    pub fn classify_mode(&self, frame: &LandmarkFrame, current: Mode) -> Mode {
        let mut mode = current;
        if volume_switch_gesture(frame) {
            mode = Mode::Volume;
        }
        if open_hand_gesture(frame) {
            mode = Mode::Mouse;
        }
        mode
    }

    /// Process one frame: classify the mode, then dispatch for it.
    ///
    /// `None` (no hand detected) is an idle pass-through: the returned
    /// state equals the input state and no actions are produced.
    pub fn step(
        &self,
        state: InterpreterState,
        frame: Option<&LandmarkFrame>,
        now_ns: TimestampNs,
        screen: ScreenSize,
    ) -> (InterpreterState, Vec<Action>) {
        let Some(frame) = frame else {
            return (state, Vec::new());
        };

        let mode = self.classify_mode(frame, state.mode);
        let mut next = InterpreterState { mode, ..state };
        let mut actions = Vec::new();

        let thumb = frame.pixel(landmarks::THUMB_TIP);
        let index = frame.pixel(landmarks::INDEX_FINGER_TIP);
        let pinch = thumb.distance_to(&index);

        match mode {
            Mode::Mouse => {
                let (x, y) = pixel_to_screen(index, frame.width(), frame.height(), screen);
                actions.push(Action::PointerMove { x, y });

                if pinch < self.config.pinch_distance_px && self.click_allowed(&next, now_ns) {
                    actions.push(Action::Click);
                    next.last_click_ns = Some(now_ns);
                }
            }
            Mode::Volume => {
                // No debounce: a sustained pinch repeats at frame rate.
                let direction = if pinch < self.config.pinch_distance_px {
                    VolumeDirection::Down
                } else {
                    VolumeDirection::Up
                };
                actions.push(Action::Volume { direction });
            }
        }

        (next, actions)
    }

    fn click_allowed(&self, state: &InterpreterState, now_ns: TimestampNs) -> bool {
        match state.last_click_ns {
            None => true,
            Some(last) => now_ns.saturating_sub(last) > self.config.click_debounce_ns(),
        }
    }
}
