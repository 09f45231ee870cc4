//! Start live gesture control.

use std::sync::atomic::Ordering;

use handwave_common::clock::SessionClock;
use handwave_common::config::AppConfig;
use handwave_controller::Controller;
use handwave_gesture_core::{GestureInterpreter, InterpreterConfig};
use handwave_hand_model::geometry::ScreenSize;
use handwave_input_inject::{EnigoInjector, InputInjector, NullInjector};
use handwave_landmark_source::sources::{DetectorProcessSource, StdinSource};
use handwave_landmark_source::LandmarkSource;

pub async fn run(stdin: bool, dry_run: bool) -> anyhow::Result<()> {
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

    let override_screen = config
        .screen
        .map(|s| ScreenSize::new(s.width, s.height));

    let (injector, screen): (Box<dyn InputInjector>, ScreenSize) = if dry_run {
        (
            Box::new(NullInjector::new()),
            override_screen.unwrap_or_default(),
        )
    } else {
        let enigo = EnigoInjector::new()?;
        let screen = match override_screen {
            Some(screen) => screen,
            None => enigo.main_display()?,
        };
        (Box::new(enigo), screen)
    };

    let interpreter = GestureInterpreter::new(InterpreterConfig::from(config.gestures));
    let mut controller = Controller::new(source, injector, interpreter, screen);

    let stop = controller.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.store(true, Ordering::SeqCst);
        }
    });

    println!("Gesture control running. Press Ctrl+C to stop...");
    let frames = controller.run().await?;
    println!("Processed {frames} frames.");

    Ok(())
}
