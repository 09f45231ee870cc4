//! Landmark source implementations.
//!
//! Each source provides a different way to obtain hand-landmark frames.
//! Live sources (detector subprocess, stdin) read one JSON frame per line
//! on a reader thread and stamp frames with the session clock at dequeue;
//! the replay source yields pre-recorded timestamps.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{Receiver, TryRecvError};

use handwave_common::clock::SessionClock;
use handwave_common::config::DetectorConfig;
use handwave_common::error::{HandwaveError, HandwaveResult};
use handwave_hand_model::landmark::LandmarkFrame;
use handwave_hand_model::stream::{parse_frames, parse_header, FrameStreamHeader, TimedFrame};

use crate::{LandmarkSource, SourcePoll};

const STREAM_SCHEMA_VERSION: &str = "1.0";

/// Read JSON frame lines into a channel on a background thread.
///
/// Malformed lines are logged and skipped; the detector keeps running.
fn spawn_line_reader<R: BufRead + Send + 'static>(reader: R) -> Receiver<LandmarkFrame> {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match serde_json::from_str::<LandmarkFrame>(trimmed) {
                Ok(frame) => {
                    if tx.send(frame).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding malformed landmark frame");
                }
            }
        }
    });
    rx
}

/// Frames from an external detector helper process.
///
/// The helper (e.g. a MediaPipe Python script) writes one JSON frame per
/// stdout line. The child is killed when the source is dropped.
pub struct DetectorProcessSource {
    child: Child,
    rx: Receiver<LandmarkFrame>,
    clock: SessionClock,
    config: DetectorConfig,
}

impl DetectorProcessSource {
    /// Spawn the detector helper described by `config`.
    pub fn spawn(config: DetectorConfig, clock: SessionClock) -> HandwaveResult<Self> {
        if !config.script.exists() {
            return Err(HandwaveError::FileNotFound {
                path: config.script.clone(),
            });
        }

        let mut child = Command::new(&config.command)
            .arg(&config.script)
            .arg("--width")
            .arg(config.frame_width.to_string())
            .arg("--height")
            .arg(config.frame_height.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| {
                HandwaveError::detector(format!("Failed to spawn {}: {e}", config.command))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HandwaveError::detector("Detector stdout was not captured"))?;
        let rx = spawn_line_reader(BufReader::new(stdout));

        Ok(Self {
            child,
            rx,
            clock,
            config,
        })
    }

    /// Whether the configured helper script is present.
    pub fn is_supported(config: &DetectorConfig) -> bool {
        config.script.exists()
    }
}

impl LandmarkSource for DetectorProcessSource {
    fn poll(&mut self) -> HandwaveResult<SourcePoll> {
        match self.rx.try_recv() {
            Ok(frame) => Ok(SourcePoll::Frame(TimedFrame::new(
                self.clock.elapsed_ns(),
                frame,
            ))),
            Err(TryRecvError::Empty) => Ok(SourcePoll::Pending),
            Err(TryRecvError::Disconnected) => match self.child.try_wait()? {
                Some(status) if status.success() => Ok(SourcePoll::Eof),
                Some(status) => Err(HandwaveError::detector(format!(
                    "Detector exited with {status}"
                ))),
                None => Err(HandwaveError::detector("Detector closed its output stream")),
            },
        }
    }

    fn name(&self) -> &str {
        "detector"
    }

    fn header(&self) -> FrameStreamHeader {
        FrameStreamHeader {
            schema_version: STREAM_SCHEMA_VERSION.to_string(),
            detector: self.config.script.display().to_string(),
            frame_width: self.config.frame_width,
            frame_height: self.config.frame_height,
            epoch_wall: self.clock.epoch_wall().to_string(),
        }
    }
}

impl Drop for DetectorProcessSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Frames piped into this process's stdin, one JSON frame per line.
/// Lets any detector be plugged in without subprocess management.
pub struct StdinSource {
    rx: Receiver<LandmarkFrame>,
    clock: SessionClock,
    frame_width: u32,
    frame_height: u32,
}

impl StdinSource {
    pub fn new(frame_width: u32, frame_height: u32, clock: SessionClock) -> Self {
        let rx = spawn_line_reader(BufReader::new(std::io::stdin()));
        Self {
            rx,
            clock,
            frame_width,
            frame_height,
        }
    }
}

impl LandmarkSource for StdinSource {
    fn poll(&mut self) -> HandwaveResult<SourcePoll> {
        match self.rx.try_recv() {
            Ok(frame) => Ok(SourcePoll::Frame(TimedFrame::new(
                self.clock.elapsed_ns(),
                frame,
            ))),
            Err(TryRecvError::Empty) => Ok(SourcePoll::Pending),
            Err(TryRecvError::Disconnected) => Ok(SourcePoll::Eof),
        }
    }

    fn name(&self) -> &str {
        "stdin"
    }

    fn header(&self) -> FrameStreamHeader {
        FrameStreamHeader {
            schema_version: STREAM_SCHEMA_VERSION.to_string(),
            detector: "stdin".to_string(),
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            epoch_wall: self.clock.epoch_wall().to_string(),
        }
    }
}

/// Frames replayed from a recorded JSONL stream.
#[derive(Debug)]
pub struct ReplaySource {
    frames: std::vec::IntoIter<TimedFrame>,
    header: FrameStreamHeader,
    total: usize,
}

impl ReplaySource {
    /// Load a recorded stream from disk.
    pub fn from_path(path: &Path) -> HandwaveResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HandwaveError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                e.into()
            }
        })?;

        let frames = parse_frames(&content)?;
        let header = parse_header(&content).unwrap_or_else(|| FrameStreamHeader {
            schema_version: STREAM_SCHEMA_VERSION.to_string(),
            detector: "replay".to_string(),
            frame_width: frames.first().map(|f| f.frame.width()).unwrap_or(640),
            frame_height: frames.first().map(|f| f.frame.height()).unwrap_or(480),
            epoch_wall: String::new(),
        });

        let total = frames.len();
        Ok(Self {
            frames: frames.into_iter(),
            header,
            total,
        })
    }

    /// Total number of frames in the recording.
    pub fn frame_count(&self) -> usize {
        self.total
    }
}

impl LandmarkSource for ReplaySource {
    fn poll(&mut self) -> HandwaveResult<SourcePoll> {
        match self.frames.next() {
            Some(frame) => Ok(SourcePoll::Frame(frame)),
            None => Ok(SourcePoll::Eof),
        }
    }

    fn name(&self) -> &str {
        "replay"
    }

    fn header(&self) -> FrameStreamHeader {
        self.header.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handwave_hand_model::landmark::{Landmark, LANDMARK_COUNT};
    use handwave_hand_model::stream::serialize_frames;

    fn sample_frame(t: u64) -> TimedFrame {
        let points = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
        TimedFrame::new(t, LandmarkFrame::new(640, 480, points).unwrap())
    }

    #[test]
    fn test_replay_source_yields_frames_then_eof() {
        let dir = std::env::temp_dir().join("handwave_test_replay");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("frames.jsonl");

        let frames = vec![sample_frame(0), sample_frame(33_000_000)];
        std::fs::write(&path, serialize_frames(&frames).unwrap()).unwrap();

        let mut source = ReplaySource::from_path(&path).unwrap();
        assert_eq!(source.frame_count(), 2);

        assert_eq!(
            source.poll().unwrap(),
            SourcePoll::Frame(frames[0].clone())
        );
        assert_eq!(
            source.poll().unwrap(),
            SourcePoll::Frame(frames[1].clone())
        );
        assert_eq!(source.poll().unwrap(), SourcePoll::Eof);
        assert_eq!(source.poll().unwrap(), SourcePoll::Eof);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_replay_source_reports_missing_file() {
        let missing = Path::new("/nonexistent/handwave/frames.jsonl");
        match ReplaySource::from_path(missing) {
            Err(HandwaveError::FileNotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_detector_is_supported_checks_script_presence() {
        let config = DetectorConfig {
            script: "/nonexistent/handwave/detector.py".into(),
            ..DetectorConfig::default()
        };
        assert!(!DetectorProcessSource::is_supported(&config));
    }

    #[cfg(unix)]
    #[test]
    fn test_detector_process_source_reads_frames_until_exit() {
        let dir = std::env::temp_dir().join("handwave_test_detector");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        // Fake detector: emit one frame and exit cleanly.
        let frame_json = serde_json::to_string(&sample_frame(0).frame).unwrap();
        let script = dir.join("fake_detector.sh");
        std::fs::write(&script, format!("echo '{frame_json}'\n")).unwrap();

        let config = DetectorConfig {
            command: "sh".to_string(),
            script: script.clone(),
            frame_width: 640,
            frame_height: 480,
        };
        assert!(DetectorProcessSource::is_supported(&config));

        let mut source = DetectorProcessSource::spawn(config, SessionClock::start()).unwrap();

        let mut got_frame = false;
        for _ in 0..500 {
            match source.poll().unwrap() {
                SourcePoll::Frame(frame) => {
                    assert_eq!(frame.frame.width(), 640);
                    got_frame = true;
                }
                SourcePoll::Pending => {
                    std::thread::sleep(std::time::Duration::from_millis(2));
                }
                SourcePoll::Eof => break,
            }
        }
        assert!(got_frame);

        std::fs::remove_dir_all(&dir).ok();
    }
}
