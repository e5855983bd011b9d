//! Mock device implementations.
//!
//! Implement the `contracts` seams with simulated data so the full session
//! pipeline runs and is testable without an eye tracker, a camera, or an
//! inference runtime. Data generation mirrors real driver behavior: the gaze
//! device pushes from its own background thread, the camera paces frame
//! reads at a configured rate.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use contracts::{
    CameraFrame, ContractError, EyeLandmarks, FrameSource, GazeDataCallback, GazeSource,
    LandmarkEstimator, Point2,
};
use tracing::{debug, trace};

/// Mock gaze device configuration
#[derive(Debug, Clone)]
pub struct MockGazeDeviceConfig {
    /// Push frequency (Hz)
    pub frequency_hz: f64,
    /// Make `subscribe` fail with a setup error (test hook)
    pub subscribe_fails: bool,
}

impl Default for MockGazeDeviceConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 60.0,
            subscribe_fails: false,
        }
    }
}

/// Mock eye-tracking device
///
/// Pushes simulated gaze samples at the configured frequency from a
/// background thread, consistent with hardware driver callback behavior.
pub struct MockGazeDevice {
    device_id: String,
    config: MockGazeDeviceConfig,
    subscribed: Arc<AtomicBool>,
}

impl MockGazeDevice {
    /// Discover the mock device.
    ///
    /// A real driver integration would enumerate attached hardware here and
    /// return `ContractError::Setup` when none is found; the mock is always
    /// present.
    pub fn discover(config: MockGazeDeviceConfig) -> Result<Self, ContractError> {
        Ok(Self {
            device_id: "mock-gaze-0".to_string(),
            config,
            subscribed: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Simulated device fields for one sample, key set fixed by the "driver"
    fn sample_fields(sample_id: u64) -> BTreeMap<String, f64> {
        let phase = sample_id as f64 * 0.05;
        let mut fields = BTreeMap::new();
        fields.insert("device_time_stamp".to_string(), sample_id as f64);
        fields.insert("left_gaze_point_x".to_string(), 0.5 + 0.1 * phase.sin());
        fields.insert("left_gaze_point_y".to_string(), 0.5 + 0.1 * phase.cos());
        fields.insert("right_gaze_point_x".to_string(), 0.52 + 0.1 * phase.sin());
        fields.insert("right_gaze_point_y".to_string(), 0.5 + 0.1 * phase.cos());
        fields.insert("left_pupil_diameter".to_string(), 3.2);
        fields.insert("right_pupil_diameter".to_string(), 3.1);
        fields
    }
}

impl GazeSource for MockGazeDevice {
    fn device_id(&self) -> &str {
        &self.device_id
    }

    fn subscribe(&self, callback: GazeDataCallback) -> Result<(), ContractError> {
        if self.config.subscribe_fails {
            return Err(ContractError::setup(
                self.device_id.clone(),
                "driver rejected gaze data subscription",
            ));
        }

        // Idempotent: if already subscribed, don't start a second pusher
        if self.subscribed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let device_id = self.device_id.clone();
        let subscribed = self.subscribed.clone();
        let interval = Duration::from_secs_f64(1.0 / self.config.frequency_hz);

        thread::spawn(move || {
            let mut sample_id: u64 = 0;

            debug!(device = %device_id, "mock gaze device started pushing");

            while subscribed.load(Ordering::Relaxed) {
                // Pace before pushing so an immediate unsubscribe sees no data
                thread::sleep(interval);
                if !subscribed.load(Ordering::Relaxed) {
                    break;
                }
                sample_id += 1;
                callback(MockGazeDevice::sample_fields(sample_id));
                trace!(device = %device_id, sample_id, "mock gaze sample pushed");
            }

            debug!(device = %device_id, "mock gaze device stopped");
        });

        Ok(())
    }

    fn unsubscribe(&self) -> Result<(), ContractError> {
        self.subscribed.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Relaxed)
    }
}

/// Mock camera configuration
#[derive(Debug, Clone)]
pub struct MockCameraConfig {
    /// Frame pacing (Hz)
    pub frame_rate_hz: f64,
    /// Frame width (pixels)
    pub width: u32,
    /// Frame height (pixels)
    pub height: u32,
    /// Make `open` fail (test hook)
    pub fail_open: bool,
    /// Every Nth read returns a transient error (test hook)
    pub transient_every: Option<u64>,
}

impl Default for MockCameraConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 30.0,
            width: 64,
            height: 48,
            fail_open: false,
            transient_every: None,
        }
    }
}

/// Mock pull-style camera
pub struct MockCamera {
    config: MockCameraConfig,
    pixels: Bytes,
    opened: bool,
    reads: u64,
}

impl MockCamera {
    pub fn new(config: MockCameraConfig) -> Self {
        let pixels = Bytes::from(vec![
            128u8;
            (config.width * config.height * 3) as usize
        ]);
        Self {
            config,
            pixels,
            opened: false,
            reads: 0,
        }
    }
}

impl FrameSource for MockCamera {
    fn open(&mut self) -> Result<(), ContractError> {
        if self.config.fail_open {
            return Err(ContractError::setup("webcam", "could not open camera device"));
        }
        self.opened = true;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<CameraFrame, ContractError> {
        if !self.opened {
            return Err(ContractError::setup("webcam", "camera not opened"));
        }

        self.reads += 1;
        thread::sleep(Duration::from_secs_f64(1.0 / self.config.frame_rate_hz));

        if let Some(every) = self.config.transient_every {
            if self.reads.is_multiple_of(every) {
                return Err(ContractError::transient_capture(
                    "webcam",
                    format!("simulated frame loss at read {}", self.reads),
                ));
            }
        }

        Ok(CameraFrame {
            width: self.config.width,
            height: self.config.height,
            data: self.pixels.clone(),
        })
    }

    fn close(&mut self) {
        self.opened = false;
    }
}

/// Mock landmark estimator configuration
#[derive(Debug, Clone)]
pub struct MockEstimatorConfig {
    /// Report a detected face on every Nth frame (1 = every frame)
    pub detect_every: u64,
    /// Every Nth inference fails (test hook)
    pub fail_every: Option<u64>,
}

impl Default for MockEstimatorConfig {
    fn default() -> Self {
        Self {
            detect_every: 1,
            fail_every: None,
        }
    }
}

/// Mock face-landmark estimator producing slowly drifting eye centers
pub struct MockEstimator {
    config: MockEstimatorConfig,
    frames: u64,
}

impl MockEstimator {
    pub fn new(config: MockEstimatorConfig) -> Self {
        Self { config, frames: 0 }
    }
}

impl LandmarkEstimator for MockEstimator {
    fn detect_eyes(&mut self, frame: &CameraFrame) -> Result<Option<EyeLandmarks>, ContractError> {
        self.frames += 1;

        if let Some(every) = self.config.fail_every {
            if self.frames.is_multiple_of(every) {
                return Err(ContractError::transient_capture(
                    "estimator",
                    format!("simulated inference failure at frame {}", self.frames),
                ));
            }
        }

        if !self.frames.is_multiple_of(self.config.detect_every) {
            return Ok(None);
        }

        let drift = (self.frames as f64 * 0.01).sin();
        let cx = frame.width as f64 / 2.0;
        let cy = frame.height as f64 / 2.0;
        Ok(Some(EyeLandmarks {
            right_eye: Point2 {
                x: cx + 5.0 + drift,
                y: cy,
            },
            left_eye: Point2 {
                x: cx - 5.0 + drift,
                y: cy,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;

    #[test]
    fn test_mock_gaze_device_pushes_samples() {
        let device = MockGazeDevice::discover(MockGazeDeviceConfig {
            frequency_hz: 200.0,
            ..Default::default()
        })
        .unwrap();

        let count = Arc::new(AtomicU64::new(0));
        let count_clone = count.clone();

        device
            .subscribe(Arc::new(move |fields| {
                assert!(fields.contains_key("left_gaze_point_x"));
                assert!(fields.contains_key("right_pupil_diameter"));
                count_clone.fetch_add(1, Ordering::Relaxed);
            }))
            .unwrap();

        thread::sleep(Duration::from_millis(50));
        device.unsubscribe().unwrap();

        assert!(count.load(Ordering::Relaxed) > 0);
        assert!(!device.is_subscribed());
    }

    #[test]
    fn test_mock_gaze_device_idempotent_subscribe() {
        let device = MockGazeDevice::discover(MockGazeDeviceConfig {
            frequency_hz: 100.0,
            ..Default::default()
        })
        .unwrap();

        let count = Arc::new(AtomicU64::new(0));
        let count1 = count.clone();
        let count2 = count.clone();

        device
            .subscribe(Arc::new(move |_| {
                count1.fetch_add(1, Ordering::Relaxed);
            }))
            .unwrap();

        // Second call must not register a second pusher
        device
            .subscribe(Arc::new(move |_| {
                count2.fetch_add(100, Ordering::Relaxed);
            }))
            .unwrap();

        thread::sleep(Duration::from_millis(100));
        device.unsubscribe().unwrap();

        let final_count = count.load(Ordering::Relaxed);
        assert!(final_count > 0);
        assert!(final_count < 50);
    }

    #[test]
    fn test_mock_camera_read_before_open_fails() {
        let mut camera = MockCamera::new(MockCameraConfig::default());
        assert!(camera.read_frame().is_err());
    }

    #[test]
    fn test_mock_estimator_detection_pattern() {
        let mut estimator = MockEstimator::new(MockEstimatorConfig {
            detect_every: 2,
            ..Default::default()
        });
        let frame = CameraFrame {
            width: 64,
            height: 48,
            data: Bytes::from_static(&[0u8; 16]),
        };

        assert!(estimator.detect_eyes(&frame).unwrap().is_none());
        assert!(estimator.detect_eyes(&frame).unwrap().is_some());
        assert!(estimator.detect_eyes(&frame).unwrap().is_none());
        assert!(estimator.detect_eyes(&frame).unwrap().is_some());
    }
}
