//! Handwave Controller
//!
//! The host loop: read frame, run the interpreter, dispatch OS actions.
//! One iteration per captured frame, single consumer of the interpreter
//! state. Cancellation is external via the stop flag (set from e.g. a
//! Ctrl-C handler).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use handwave_common::error::HandwaveResult;
use handwave_gesture_core::{GestureInterpreter, InterpreterState};
use handwave_hand_model::geometry::ScreenSize;
use handwave_input_inject::InputInjector;
use handwave_landmark_source::{LandmarkSource, SourcePoll};

/// Connects a landmark source to an input injector through the
/// gesture interpreter.
pub struct Controller {
    source: Box<dyn LandmarkSource>,
    injector: Box<dyn InputInjector>,
    interpreter: GestureInterpreter,
    state: InterpreterState,
    screen: ScreenSize,
    stop_flag: Arc<AtomicBool>,
    frames_processed: u64,
}

impl Controller {
    /// Create a new controller.
    pub fn new(
        source: Box<dyn LandmarkSource>,
        injector: Box<dyn InputInjector>,
        interpreter: GestureInterpreter,
        screen: ScreenSize,
    ) -> Self {
        Self {
            source,
            injector,
            interpreter,
            state: InterpreterState::default(),
            screen,
            stop_flag: Arc::new(AtomicBool::new(false)),
            frames_processed: 0,
        }
    }

    /// Run the control loop until the stop flag is set or the source is
    /// exhausted. Returns the number of frames processed.
    ///
    /// Injection failures are logged and skipped; source failures
    /// terminate the loop.
    pub async fn run(&mut self) -> HandwaveResult<u64> {
        tracing::info!(
            source = %self.source.name(),
            injector = %self.injector.name(),
            screen_width = self.screen.width,
            screen_height = self.screen.height,
            "Controller started"
        );

        while !self.stop_flag.load(Ordering::Relaxed) {
            match self.source.poll()? {
                SourcePoll::Frame(timed) => {
                    let (next, actions) = self.interpreter.step(
                        self.state,
                        Some(&timed.frame),
                        timed.timestamp_ns,
                        self.screen,
                    );

                    if next.mode != self.state.mode {
                        tracing::info!(mode = %next.mode, "Mode switched");
                    }
                    self.state = next;
                    self.frames_processed += 1;

                    for action in &actions {
                        if let Err(e) = self.injector.dispatch(action) {
                            tracing::warn!(error = %e, action = %action, "Injection failed");
                        }
                    }
                }
                SourcePoll::Pending => {
                    // No frame available, yield briefly
                    tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                }
                SourcePoll::Eof => {
                    tracing::info!("Landmark source exhausted");
                    break;
                }
            }
        }

        tracing::info!(frames = self.frames_processed, "Controller stopped");
        Ok(self.frames_processed)
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Interpreter state after the most recent frame.
    pub fn state(&self) -> InterpreterState {
        self.state
    }

    /// Number of frames processed so far.
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}
