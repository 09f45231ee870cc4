//! Record landmark frames to a JSONL stream.

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use handwave_common::clock::SessionClock;
use handwave_common::config::AppConfig;
use handwave_landmark_source::sources::{DetectorProcessSource, StdinSource};
use handwave_landmark_source::{FrameRecorder, LandmarkSource};

pub async fn run(output: PathBuf, stdin: bool) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let clock = SessionClock::start();

    let source: Box<dyn LandmarkSource> = if stdin {
        Box::new(StdinSource::new(
            config.detector.frame_width,
            config.detector.frame_height,
            clock,
        ))
    } else {
        Box::new(DetectorProcessSource::spawn(config.detector.clone(), clock)?)
    };

    let mut recorder = FrameRecorder::new(source, output.clone())?;

    let stop = recorder.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.store(true, Ordering::SeqCst);
        }
    });

    println!(
        "Recording landmark frames to {}. Press Ctrl+C to stop...",
        output.display()
    );
    let frames = recorder.run().await?;
    println!("Recorded {frames} frames.");

    Ok(())
}
