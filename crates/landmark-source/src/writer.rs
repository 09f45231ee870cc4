//! Append-only frame writer for crash-safe stream recording.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use handwave_common::error::{HandwaveError, HandwaveResult};
use handwave_hand_model::stream::{FrameStreamHeader, TimedFrame};

/// Writes landmark frames to a JSONL file in append-only mode.
pub struct FrameWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    frames_written: u64,
}

impl FrameWriter {
    /// Create a new frame writer, writing the header as the first line.
    pub fn new(path: PathBuf, header: FrameStreamHeader) -> HandwaveResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        // Write header as a comment line (prefixed with #)
        let header_json = serde_json::to_string(&header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| HandwaveError::detector(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            frames_written: 0,
        })
    }

    /// Write a single frame as a JSONL line.
    pub fn write_frame(&mut self, frame: &TimedFrame) -> HandwaveResult<()> {
        let json = serde_json::to_string(frame)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| HandwaveError::detector(format!("Failed to write frame: {e}")))?;
        self.frames_written += 1;

        // Flush every 100 frames for crash safety
        if self.frames_written % 100 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> HandwaveResult<()> {
        self.writer
            .flush()
            .map_err(|e| HandwaveError::detector(format!("Failed to flush frames: {e}")))?;
        Ok(())
    }

    /// Number of frames written.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Path to the output file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for FrameWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handwave_hand_model::landmark::{Landmark, LandmarkFrame, LANDMARK_COUNT};
    use handwave_hand_model::stream::parse_frames;

    fn sample_frame(t: u64) -> TimedFrame {
        let points = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        TimedFrame::new(t, LandmarkFrame::new(640, 480, points).unwrap())
    }

    fn sample_header() -> FrameStreamHeader {
        FrameStreamHeader {
            schema_version: "1.0".to_string(),
            detector: "test".to_string(),
            frame_width: 640,
            frame_height: 480,
            epoch_wall: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_frame_writer_roundtrip() {
        let dir = std::env::temp_dir().join("handwave_test_writer");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let path = dir.join("frames.jsonl");
        {
            let mut writer = FrameWriter::new(path.clone(), sample_header()).unwrap();
            writer.write_frame(&sample_frame(0)).unwrap();
            writer.write_frame(&sample_frame(33_000_000)).unwrap();
            writer.write_frame(&sample_frame(66_000_000)).unwrap();
            assert_eq!(writer.frames_written(), 3);
        }

        // Read back and verify
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4); // 1 header + 3 frames
        assert!(lines[0].starts_with("# "));

        let frames = parse_frames(&content).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1].timestamp_ns, 33_000_000);

        std::fs::remove_dir_all(&dir).ok();
    }
}
