//! Recorded landmark-frame streams.
//!
//! Streams are recorded in append-only JSONL format for crash safety.
//! The first line is a `# `-prefixed JSON header describing the capture;
//! each following line is one timestamped frame.

use serde::{Deserialize, Serialize};

use crate::landmark::LandmarkFrame;

/// Monotonic timestamp in nanoseconds since session start.
pub type TimestampNs = u64;

/// A single landmark frame with its capture timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedFrame {
    /// Monotonic nanoseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The detected hand.
    #[serde(flatten)]
    pub frame: LandmarkFrame,
}

impl TimedFrame {
    pub fn new(timestamp_ns: TimestampNs, frame: LandmarkFrame) -> Self {
        Self {
            timestamp_ns,
            frame,
        }
    }

    /// Timestamp as fractional seconds since session start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

/// Stream metadata written as the header line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Name of the detector that produced the stream.
    pub detector: String,

    /// Capture frame dimensions in pixels.
    pub frame_width: u32,
    pub frame_height: u32,

    /// Wall-clock time at session start (ISO 8601).
    pub epoch_wall: String,
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<TimedFrame>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Parse the `# `-prefixed header line of a recorded stream, if present.
pub fn parse_header(jsonl: &str) -> Option<FrameStreamHeader> {
    let line = jsonl.lines().next()?.trim();
    let json = line.strip_prefix('#')?.trim();
    serde_json::from_str(json).ok()
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[TimedFrame]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, LANDMARK_COUNT};

    fn sample_frame(t: TimestampNs) -> TimedFrame {
        let points = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        TimedFrame::new(t, LandmarkFrame::new(640, 480, points).unwrap())
    }

    #[test]
    fn test_frame_roundtrip() {
        let frame = sample_frame(1_000_000_000);
        let json = serde_json::to_string(&frame).unwrap();
        let parsed: TimedFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, parsed);
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let frames = vec![
            sample_frame(0),
            sample_frame(33_000_000),
            sample_frame(66_000_000),
        ];
        let jsonl = serialize_frames(&frames).unwrap();
        let parsed = parse_frames(&jsonl).unwrap();
        assert_eq!(frames, parsed);
    }

    #[test]
    fn test_parse_frames_skips_header_comment() {
        let mut jsonl = String::from(
            "# {\"schema_version\":\"1.0\",\"detector\":\"mediapipe\",\
             \"frame_width\":640,\"frame_height\":480,\
             \"epoch_wall\":\"2026-01-01T00:00:00Z\"}\n",
        );
        jsonl.push_str(&serialize_frames(&[sample_frame(42)]).unwrap());

        let parsed = parse_frames(&jsonl).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].timestamp_ns, 42);

        let header = parse_header(&jsonl).unwrap();
        assert_eq!(header.detector, "mediapipe");
        assert_eq!(header.frame_width, 640);
    }

    #[test]
    fn test_malformed_frame_line_is_an_error() {
        let jsonl = "{\"t\":0,\"width\":640,\"height\":480,\"points\":[]}\n";
        assert!(parse_frames(jsonl).is_err());
    }

    #[test]
    fn test_timestamp_secs() {
        let frame = sample_frame(1_500_000_000);
        assert!((frame.timestamp_secs() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_wire_format_field_names() {
        let json = serde_json::to_string(&sample_frame(7)).unwrap();
        assert!(json.contains("\"t\":7"));
        assert!(json.contains("\"width\":640"));
        assert!(json.contains("\"points\":["));
    }
}
