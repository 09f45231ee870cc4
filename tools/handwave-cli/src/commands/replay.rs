//! Replay a recorded stream through the interpreter.

use std::path::PathBuf;

use handwave_common::config::AppConfig;
use handwave_gesture_core::{GestureInterpreter, InterpreterConfig, InterpreterState};
use handwave_hand_model::geometry::ScreenSize;
use handwave_input_inject::{EnigoInjector, InputInjector};
use handwave_landmark_source::sources::ReplaySource;
use handwave_landmark_source::{LandmarkSource, SourcePoll};

pub fn run(path: PathBuf, inject: bool) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let mut source = ReplaySource::from_path(&path)?;
    let header = source.header();

    println!(
        "Replaying {} frames from {} ({}x{} capture, detector: {})",
        source.frame_count(),
        path.display(),
        header.frame_width,
        header.frame_height,
        header.detector
    );

    let mut injector = if inject {
        Some(EnigoInjector::new()?)
    } else {
        None
    };

    let screen = match (config.screen, &injector) {
        (Some(s), _) => ScreenSize::new(s.width, s.height),
        (None, Some(enigo)) => enigo.main_display()?,
        (None, None) => ScreenSize::default(),
    };

    let interpreter = GestureInterpreter::new(InterpreterConfig::from(config.gestures));
    let mut state = InterpreterState::default();

    loop {
        match source.poll()? {
            SourcePoll::Frame(timed) => {
                let (next, actions) =
                    interpreter.step(state, Some(&timed.frame), timed.timestamp_ns, screen);

                if next.mode != state.mode {
                    println!("[{:8.3}s] mode -> {}", timed.timestamp_secs(), next.mode);
                }
                for action in &actions {
                    println!("[{:8.3}s] {action}", timed.timestamp_secs());
                    if let Some(enigo) = injector.as_mut() {
                        enigo.dispatch(action)?;
                    }
                }
                state = next;
            }
            SourcePoll::Pending => {}
            SourcePoll::Eof => break,
        }
    }

    println!("Final mode: {}", state.mode);
    Ok(())
}
