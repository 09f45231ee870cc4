//! Handwave Gesture Core — The Interpreter
//!
//! Consumes hand-landmark frames and produces input-device actions plus a
//! mode label:
//! - **Mode classification:** sticky two-mode state machine (mouse/volume)
//!   driven by finger-position rules
//! - **Mouse dispatch:** index-fingertip pointer mapping and debounced
//!   pinch-to-click
//! - **Volume dispatch:** pinch-distance volume up/down, repeated at frame
//!   rate
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data. State is passed in and
//! returned, never held in globals.

pub mod interpreter;

pub use interpreter::{
    Action, GestureInterpreter, InterpreterConfig, InterpreterState, Mode, VolumeDirection,
};
