//! Handwave Landmark Sources
//!
//! Supplies the interpreter with timestamped landmark frames. Uses a
//! pluggable source architecture:
//!
//! - **Detector:** external hand-landmark helper process (one JSON frame
//!   per stdout line)
//! - **Stdin:** the same line protocol read from this process's stdin
//! - **Replay:** a recorded JSONL frame stream
//!
//! Recorded streams are written in append-only JSONL format for crash
//! safety.

pub mod sources;
pub mod writer;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use handwave_common::error::HandwaveResult;
use handwave_hand_model::stream::{FrameStreamHeader, TimedFrame};

/// Result of polling a landmark source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourcePoll {
    /// A hand was detected in a new frame.
    Frame(TimedFrame),
    /// No frame available yet; poll again later.
    Pending,
    /// The source is exhausted (detector exited cleanly, stream ended).
    Eof,
}

/// Trait for landmark frame sources.
pub trait LandmarkSource: Send {
    /// Poll for the next frame without blocking.
    fn poll(&mut self) -> HandwaveResult<SourcePoll>;

    /// Source name for logging.
    fn name(&self) -> &str;

    /// Stream metadata describing this source's capture.
    fn header(&self) -> FrameStreamHeader;
}

/// Records a landmark stream from a source to a JSONL file.
pub struct FrameRecorder {
    source: Box<dyn LandmarkSource>,
    writer: writer::FrameWriter,
    stop_flag: Arc<AtomicBool>,
    frames_logged: u64,
}

impl FrameRecorder {
    /// Create a new recorder writing to `output_path`.
    pub fn new(source: Box<dyn LandmarkSource>, output_path: PathBuf) -> HandwaveResult<Self> {
        let writer = writer::FrameWriter::new(output_path, source.header())?;

        Ok(Self {
            source,
            writer,
            stop_flag: Arc::new(AtomicBool::new(false)),
            frames_logged: 0,
        })
    }

    /// Run the recording loop until the stop flag is set or the source
    /// is exhausted. Returns the number of frames recorded.
    pub async fn run(&mut self) -> HandwaveResult<u64> {
        tracing::info!(source = %self.source.name(), "Frame recorder started");

        while !self.stop_flag.load(Ordering::Relaxed) {
            match self.source.poll()? {
                SourcePoll::Frame(frame) => {
                    self.writer.write_frame(&frame)?;
                    self.frames_logged += 1;
                }
                SourcePoll::Pending => {
                    // No frame available, yield briefly
                    tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
                }
                SourcePoll::Eof => break,
            }
        }

        self.writer.flush()?;
        tracing::info!(frames = self.frames_logged, "Frame recorder stopped");
        Ok(self.frames_logged)
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Number of frames recorded so far.
    pub fn frames_logged(&self) -> u64 {
        self.frames_logged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handwave_hand_model::landmark::{Landmark, LandmarkFrame, LANDMARK_COUNT};
    use handwave_hand_model::stream::parse_frames;

    fn test_header(detector: &str) -> FrameStreamHeader {
        FrameStreamHeader {
            schema_version: "1.0".to_string(),
            detector: detector.to_string(),
            frame_width: 640,
            frame_height: 480,
            epoch_wall: String::new(),
        }
    }

    fn sample_frame(t: u64) -> TimedFrame {
        let points = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        TimedFrame::new(t, LandmarkFrame::new(640, 480, points).unwrap())
    }

    struct ScriptSource {
        frames: std::vec::IntoIter<TimedFrame>,
    }

    impl LandmarkSource for ScriptSource {
        fn poll(&mut self) -> HandwaveResult<SourcePoll> {
            match self.frames.next() {
                Some(frame) => Ok(SourcePoll::Frame(frame)),
                None => Ok(SourcePoll::Eof),
            }
        }

        fn name(&self) -> &str {
            "script"
        }

        fn header(&self) -> FrameStreamHeader {
            test_header("script")
        }
    }

    #[tokio::test]
    async fn recorder_writes_source_frames_until_eof() {
        let dir = std::env::temp_dir().join("handwave_test_recorder_eof");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("frames.jsonl");

        let source = ScriptSource {
            frames: vec![sample_frame(0), sample_frame(33_000_000)].into_iter(),
        };
        let mut recorder = FrameRecorder::new(Box::new(source), path.clone()).unwrap();

        let recorded = recorder.run().await.unwrap();
        assert_eq!(recorded, 2);
        assert_eq!(recorder.frames_logged(), 2);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# "));
        let frames = parse_frames(&content).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].timestamp_ns, 33_000_000);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn stop_flag_halts_recording_from_a_pending_source() {
        struct ForeverPending;
        impl LandmarkSource for ForeverPending {
            fn poll(&mut self) -> HandwaveResult<SourcePoll> {
                Ok(SourcePoll::Pending)
            }
            fn name(&self) -> &str {
                "pending"
            }
            fn header(&self) -> FrameStreamHeader {
                test_header("pending")
            }
        }

        let dir = std::env::temp_dir().join("handwave_test_recorder_stop");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("frames.jsonl");

        let mut recorder = FrameRecorder::new(Box::new(ForeverPending), path).unwrap();

        let stop = recorder.stop_flag();
        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
            stop.store(true, Ordering::SeqCst);
        });

        let recorded = recorder.run().await.unwrap();
        assert_eq!(recorded, 0);

        std::fs::remove_dir_all(&dir).ok();
    }
}
