//! Handwave Input Injection
//!
//! Performs the actions the interpreter requests against the OS input
//! layer. Uses a pluggable injector architecture:
//!
//! - **Enigo:** real OS injection (pointer, mouse button, volume keys)
//! - **Recording:** collects actions in memory for tests and replays
//! - **Null:** drops actions (dry runs)
//!
//! The interpreter never talks to an injector directly; the controller
//! loop connects the two.

pub mod os;

use handwave_common::error::HandwaveResult;
use handwave_gesture_core::Action;

pub use os::EnigoInjector;

/// Trait for input injection backends.
pub trait InputInjector {
    /// Perform one requested action.
    fn dispatch(&mut self, action: &Action) -> HandwaveResult<()>;

    /// Injector name for logging.
    fn name(&self) -> &str;
}

/// Collects dispatched actions in memory. Used in tests and for
/// inspecting what a replay would have done.
#[derive(Debug, Default)]
pub struct RecordingInjector {
    actions: Vec<Action>,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions dispatched so far, in order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Drain the recorded actions.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }
}

impl InputInjector for RecordingInjector {
    fn dispatch(&mut self, action: &Action) -> HandwaveResult<()> {
        self.actions.push(*action);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Drops every action, logging at debug level. Used for dry runs.
#[derive(Debug, Default)]
pub struct NullInjector;

impl NullInjector {
    pub fn new() -> Self {
        Self
    }
}

impl InputInjector for NullInjector {
    fn dispatch(&mut self, action: &Action) -> HandwaveResult<()> {
        tracing::debug!(action = %action, "Dropping action (dry run)");
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}
