//! SessionBlueprint - declarative session configuration.
//!
//! Parsed from TOML/JSON by `config_loader` and validated before the
//! controller touches any device.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionBlueprint {
    /// Physical screen geometry
    pub screen: ScreenConfig,

    /// Stimulus catalog and presentation timing
    #[serde(default)]
    pub stimulus: StimulusConfig,

    /// Eye-tracker device settings
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Webcam capture settings
    #[serde(default)]
    pub webcam: WebcamConfig,

    /// Session lifecycle timing
    #[serde(default)]
    pub session: SessionConfig,

    /// Export destination
    #[serde(default)]
    pub output: OutputConfig,
}

/// Physical screen geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Horizontal resolution, pixels
    pub width_px: u32,

    /// Vertical resolution, pixels
    pub height_px: u32,

    /// Physical width, centimeters
    pub width_cm: f64,

    /// Physical height, centimeters
    pub height_cm: f64,
}

impl ScreenConfig {
    /// Linear centimeter-to-pixel scale factor along the horizontal axis
    pub fn cm_to_pixel(&self) -> f64 {
        self.width_px as f64 / self.width_cm
    }
}

/// Stimulus catalog and presentation timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StimulusConfig {
    /// Symmetric offset magnitudes; the catalog is 0 followed by +m, -m
    /// for each entry, in order
    pub offset_magnitudes_cm: Vec<f64>,

    /// Minimum presentation duration, seconds
    pub min_display_secs: f64,

    /// Maximum presentation duration, seconds
    pub max_display_secs: f64,

    /// Blank inter-stimulus interval, seconds
    pub inter_stimulus_secs: f64,

    /// Early-exit poll slice while a frame is held, milliseconds
    pub poll_interval_ms: u64,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            offset_magnitudes_cm: vec![5.0, 10.0],
            min_display_secs: 2.0,
            max_display_secs: 5.0,
            inter_stimulus_secs: 1.0,
            poll_interval_ms: 5,
        }
    }
}

/// Eye-tracker device settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Sample rate the mock device pushes at, Hz
    pub device_frequency_hz: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            device_frequency_hz: 60.0,
        }
    }
}

/// Webcam capture settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebcamConfig {
    /// Camera device index
    pub cam_index: u32,

    /// Frame rate the mock camera produces at, Hz
    pub frame_rate_hz: f64,

    /// Backoff after a transient frame-read failure, milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for WebcamConfig {
    fn default() -> Self {
        Self {
            cam_index: 0,
            frame_rate_hz: 30.0,
            retry_backoff_ms: 100,
        }
    }
}

/// Session lifecycle timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of catalog repetitions
    pub sequence_count: u32,

    /// Delay between starting the webcam loop and the first marker, so the
    /// loop reaches steady state before markers are meaningful
    pub settle_delay_secs: f64,

    /// Bounded wait for the webcam worker to observe cancellation at
    /// shutdown; the controller proceeds after this elapses
    pub join_timeout_secs: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sequence_count: 3,
            settle_delay_secs: 2.0,
            join_timeout_secs: 3.0,
        }
    }
}

/// Export destination
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the three session CSV files are written into
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./output"),
        }
    }
}
