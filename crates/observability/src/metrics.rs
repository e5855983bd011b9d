//! Session metrics collection.
//!
//! Counters for the three data producers, exported via the Prometheus
//! endpoint when enabled.

use metrics::counter;

/// Record one gaze sample appended by the eye-tracker recorder
pub fn record_tracker_sample() {
    counter!("gaze_session_tracker_samples_total").increment(1);
}

/// Record one processed webcam frame and whether a face was detected
pub fn record_webcam_frame(detected: bool) {
    counter!("gaze_session_webcam_frames_total").increment(1);
    if detected {
        counter!("gaze_session_webcam_detections_total").increment(1);
    }
}

/// Record a dropped webcam frame (transient read or inference failure)
pub fn record_webcam_frame_dropped(reason: &str) {
    counter!(
        "gaze_session_webcam_frames_dropped_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// Record a marker injection into one recorder log
pub fn record_marker(recorder: &str) {
    counter!(
        "gaze_session_markers_total",
        "recorder" => recorder.to_string()
    )
    .increment(1);
}

/// Record one completed stimulus presentation step
pub fn record_stimulus_event() {
    counter!("gaze_session_stimulus_events_total").increment(1);
}
