//! Log row types for the three session streams.
//!
//! Recorder logs interleave markers with data rows as a tagged variant,
//! never as a struct with optional fields left empty. Within one log, rows
//! are timestamp-monotonic because the appending side stamps them with its
//! own wall clock at append time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Marker label injected when the stimulus run begins
pub const START_MARKER: &str = "Start stimulus";

/// Marker label injected when the stimulus run ends
pub const END_MARKER: &str = "End stimulus";

/// One stimulus presentation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StimulusEvent {
    /// Wall-clock time at which the stimulus frame was shown
    pub start_time: f64,

    /// Horizontal offset from screen center, pixels
    pub offset_px: i32,

    /// Horizontal offset from screen center, centimeters
    pub offset_cm: f64,
}

/// Zero-payload timestamped label marking an experimental event boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerEvent {
    pub label: String,
    pub timestamp: f64,
}

impl MarkerEvent {
    /// Stamp a marker with the current wall clock
    pub fn now(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            timestamp: crate::wall_clock_secs(),
        }
    }
}

/// One gaze sample pushed by the eye-tracker driver
///
/// The driver decides the field key set per sample; it is carried as an open
/// mapping so the export layer can derive columns without the contracts
/// crate knowing the device model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerSample {
    /// Receive-side wall-clock stamp, taken on the driver callback thread
    pub system_timestamp: f64,

    /// Device-reported fields, key set decided by the driver
    pub fields: BTreeMap<String, f64>,
}

/// Eye-tracker log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackerRow {
    Sample(TrackerSample),
    Marker(MarkerEvent),
}

impl TrackerRow {
    /// Wall-clock stamp of the row, whichever variant it is
    pub fn timestamp(&self) -> f64 {
        match self {
            Self::Sample(s) => s.system_timestamp,
            Self::Marker(m) => m.timestamp,
        }
    }
}

/// 2D point in camera pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

/// One webcam frame with both eye centers detected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebcamSample {
    /// Wall-clock stamp taken on the capture loop thread
    pub timestamp: f64,
    pub right_eye: Point2,
    pub left_eye: Point2,
}

/// Webcam log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WebcamRow {
    Sample(WebcamSample),
    Marker(MarkerEvent),
}

impl WebcamRow {
    /// Wall-clock stamp of the row, whichever variant it is
    pub fn timestamp(&self) -> f64 {
        match self {
            Self::Sample(s) => s.timestamp,
            Self::Marker(m) => m.timestamp,
        }
    }
}
