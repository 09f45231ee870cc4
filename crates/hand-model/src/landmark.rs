//! The 21-point hand skeleton.
//!
//! Landmark indices follow the MediaPipe hand-landmark convention: the
//! wrist is index 0, each finger runs base-to-tip, and every fingertip's
//! lower joint sits two indices below the tip.

use serde::{Deserialize, Serialize};

use handwave_common::error::{HandwaveError, HandwaveResult};

use crate::geometry::Point2D;

/// Number of landmarks in a detected hand.
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices within the 21-point hand skeleton.
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;

    /// All five fingertip indices.
    pub const FINGERTIPS: [usize; 5] = [
        THUMB_TIP,
        INDEX_FINGER_TIP,
        MIDDLE_FINGER_TIP,
        RING_FINGER_TIP,
        PINKY_TIP,
    ];

    /// The lower joint paired with a fingertip for extension checks.
    pub const fn lower_joint(tip: usize) -> usize {
        tip - 2
    }
}

/// A single tracked hand point.
///
/// Coordinates are normalized to `[0.0, 1.0]` against the capture frame,
/// with the image convention that y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One detected hand: an ordered, immutable set of 21 landmarks plus the
/// capture frame dimensions needed to derive pixel coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLandmarkFrame")]
pub struct LandmarkFrame {
    width: u32,
    height: u32,
    points: Vec<Landmark>,
}

/// Wire shape for a frame, validated into [`LandmarkFrame`] on decode.
#[derive(Debug, Deserialize)]
struct RawLandmarkFrame {
    width: u32,
    height: u32,
    points: Vec<Landmark>,
}

impl TryFrom<RawLandmarkFrame> for LandmarkFrame {
    type Error = HandwaveError;

    fn try_from(raw: RawLandmarkFrame) -> Result<Self, Self::Error> {
        LandmarkFrame::new(raw.width, raw.height, raw.points)
    }
}

impl LandmarkFrame {
    /// Create a frame, rejecting malformed landmark data.
    ///
    /// A frame with fewer (or more) than 21 points, zero dimensions, or
    /// non-finite coordinates is a precondition violation reported to the
    /// caller, never silently recovered.
    pub fn new(width: u32, height: u32, points: Vec<Landmark>) -> HandwaveResult<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(HandwaveError::gesture(format!(
                "Expected {LANDMARK_COUNT} landmarks, got {}",
                points.len()
            )));
        }
        if width == 0 || height == 0 {
            return Err(HandwaveError::gesture(format!(
                "Invalid frame dimensions {width}x{height}"
            )));
        }
        if let Some(p) = points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(HandwaveError::gesture(format!(
                "Non-finite landmark coordinate ({}, {})",
                p.x, p.y
            )));
        }
        Ok(Self {
            width,
            height,
            points,
        })
    }

    /// Capture frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Capture frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Normalized landmark at the given skeleton index.
    pub fn point(&self, index: usize) -> Landmark {
        self.points[index]
    }

    /// Landmark at the given skeleton index in pixel coordinates.
    pub fn pixel(&self, index: usize) -> Point2D {
        let p = self.points[index];
        Point2D::new(p.x * self.width as f64, p.y * self.height as f64)
    }

    /// Whether the finger with the given tip index is extended, i.e. the
    /// tip sits above its lower joint in image coordinates.
    pub fn finger_extended(&self, tip: usize) -> bool {
        self.point(tip).y < self.point(landmarks::lower_joint(tip)).y
    }

    /// Number of extended fingers across all five fingertips.
    pub fn extended_finger_count(&self) -> usize {
        landmarks::FINGERTIPS
            .iter()
            .filter(|&&tip| self.finger_extended(tip))
            .count()
    }
}
