//! Handwave Hand Model
//!
//! Core data model for hand-landmark frames:
//! - **Landmarks:** the fixed 21-point hand skeleton and its indices
//! - **Geometry:** pixel/screen coordinate mapping
//! - **Streams:** recorded frame streams in append-only JSONL format
//!
//! This crate is pure data — no I/O beyond serde, no platform dependencies.

pub mod geometry;
pub mod landmark;
pub mod stream;

pub use geometry::{Point2D, ScreenSize};
pub use landmark::{landmarks, Landmark, LandmarkFrame};
pub use stream::TimedFrame;
