//! Check system capabilities.

use handwave_common::config::{config_file_path, AppConfig};
use handwave_input_inject::EnigoInjector;
use handwave_landmark_source::sources::DetectorProcessSource;

pub fn run() -> anyhow::Result<()> {
    let config = AppConfig::load();

    println!("Handwave System Check");
    println!("{}", "=".repeat(50));

    println!("Config file: {}", config_file_path().display());

    // Detector helper
    if DetectorProcessSource::is_supported(&config.detector) {
        println!("[OK] Detector script: {}", config.detector.script.display());
    } else {
        println!(
            "[WARN] Detector script not found: {}",
            config.detector.script.display()
        );
    }
    println!(
        "     Command: {} ({}x{} capture)",
        config.detector.command, config.detector.frame_width, config.detector.frame_height
    );

    // Input injection
    match EnigoInjector::new() {
        Ok(injector) => {
            println!("[OK] Input injection available");
            match injector.main_display() {
                Ok(screen) => {
                    println!("[OK] Main display: {}x{}", screen.width, screen.height)
                }
                Err(e) => println!("[WARN] Could not query display size: {e}"),
            }
        }
        Err(e) => println!("[WARN] Input injection unavailable: {e}"),
    }

    if let Some(screen) = config.screen {
        println!("     Screen override: {}x{}", screen.width, screen.height);
    }

    println!();
    println!(
        "Gesture thresholds: pinch < {} px, click debounce {} s",
        config.gestures.pinch_distance_px, config.gestures.click_debounce_secs
    );

    Ok(())
}
