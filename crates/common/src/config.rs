//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hand-landmark detector settings.
    pub detector: DetectorConfig,

    /// Gesture thresholds.
    pub gestures: GestureDefaults,

    /// Optional fixed screen size. When absent the injector's main
    /// display is queried at startup.
    pub screen: Option<ScreenOverride>,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// How to launch and talk to the external landmark detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Interpreter used to run the helper script (e.g. "python3").
    pub command: String,

    /// Path to the detector helper script.
    pub script: PathBuf,

    /// Capture frame width in pixels, as configured on the detector side.
    pub frame_width: u32,

    /// Capture frame height in pixels.
    pub frame_height: u32,
}

/// Gesture threshold defaults.
///
/// The defaults reproduce the reference behavior: a 50-pixel pinch
/// threshold and a 0.3-second minimum gap between synthesized clicks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GestureDefaults {
    /// Thumb-to-index distance (pixels) below which a pinch is recognized.
    pub pinch_distance_px: f64,

    /// Minimum time between synthesized clicks, in seconds.
    pub click_debounce_secs: f64,
}

/// Fixed screen dimensions in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenOverride {
    pub width: u32,
    pub height: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handwave=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            gestures: GestureDefaults::default(),
            screen: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            command: "python3".to_string(),
            script: PathBuf::from("detector/hand_landmarks.py"),
            frame_width: 640,
            frame_height: 480,
        }
    }
}

impl Default for GestureDefaults {
    fn default() -> Self {
        Self {
            pinch_distance_px: 50.0,
            click_debounce_secs: 0.3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("handwave").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_preserve_reference_thresholds() {
        let defaults = GestureDefaults::default();
        assert_eq!(defaults.pinch_distance_px, 50.0);
        assert_eq!(defaults.click_debounce_secs, 0.3);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.gestures.pinch_distance_px,
            config.gestures.pinch_distance_px
        );
        assert_eq!(parsed.detector.frame_width, 640);
        assert!(parsed.screen.is_none());
    }
}
