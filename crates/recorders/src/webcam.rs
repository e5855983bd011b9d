//! Webcam recorder - blocking capture + landmark-inference loop.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use contracts::{
    wall_clock_secs, ContractError, FrameSource, LandmarkEstimator, MarkerEvent, RecordLog,
    WebcamRow, WebcamSample,
};
use observability::metrics::record_webcam_frame_dropped;
use tracing::{debug, error, info, warn};

/// Recorder for the webcam gaze stream.
///
/// `run_loop` blocks for the lifetime of the capture session, so the
/// controller dispatches it onto a worker thread. `stop()` and `add_marker`
/// are callable from any other thread; the log mutex covers the two-writer
/// append and the cancel token makes shutdown cooperative.
pub struct WebcamRecorder {
    log: Arc<RecordLog<WebcamRow>>,
    token: crate::CancelToken,
    retry_backoff: Duration,
}

impl WebcamRecorder {
    /// Create a recorder; `retry_backoff` is slept after a transient
    /// frame-read failure before the next attempt.
    pub fn new(retry_backoff: Duration) -> Self {
        Self {
            log: Arc::new(RecordLog::new()),
            token: crate::CancelToken::new(),
            retry_backoff,
        }
    }

    /// Token observed by the capture loop; clone it to wire external
    /// shutdown signals to this recorder.
    pub fn cancel_token(&self) -> crate::CancelToken {
        self.token.clone()
    }

    /// Request cooperative loop termination.
    ///
    /// Not immediate: the current frame's processing completes first.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Append a marker row, interleavable at any point relative to data
    /// rows, including while the loop is running on another thread.
    pub fn add_marker(&self, label: &str) {
        self.log.append(WebcamRow::Marker(MarkerEvent::now(label)));
        observability::record_marker("webcam");
        debug!(label, "webcam marker appended");
    }

    /// Accumulated rows in append order.
    ///
    /// Valid after the loop ends, including after a fatal capture error.
    pub fn get_data(&self) -> Vec<WebcamRow> {
        self.log.snapshot()
    }

    /// Run the capture loop until cancelled.
    ///
    /// Camera open failure is fatal. Per iteration: read one frame (transient
    /// read failures are logged, backed off and retried), run landmark
    /// inference (errors count as a missed frame), and append a data row only
    /// when a face was detected. Frames with no detection produce no row.
    pub fn run_loop<F, E>(&self, camera: &mut F, estimator: &mut E) -> Result<(), ContractError>
    where
        F: FrameSource,
        E: LandmarkEstimator,
    {
        camera.open().map_err(|e| {
            error!(error = %e, "could not open webcam");
            e
        })?;

        info!("webcam capture started");

        let result = self.capture_frames(camera, estimator);

        camera.close();
        match &result {
            Ok(()) => info!(rows = self.log.len(), "webcam capture stopped"),
            Err(e) => error!(error = %e, rows = self.log.len(), "webcam capture aborted"),
        }
        result
    }

    fn capture_frames<F, E>(&self, camera: &mut F, estimator: &mut E) -> Result<(), ContractError>
    where
        F: FrameSource,
        E: LandmarkEstimator,
    {
        while !self.token.is_cancelled() {
            let frame = match camera.read_frame() {
                Ok(frame) => frame,
                Err(e) if e.is_transient() => {
                    warn!(error = %e, "frame read failed, retrying after backoff");
                    record_webcam_frame_dropped("read");
                    thread::sleep(self.retry_backoff);
                    continue;
                }
                // Unrecoverable driver error; accumulated data stays readable.
                Err(e) => return Err(e),
            };

            match estimator.detect_eyes(&frame) {
                Ok(Some(landmarks)) => {
                    self.log.append(WebcamRow::Sample(WebcamSample {
                        timestamp: wall_clock_secs(),
                        right_eye: landmarks.right_eye,
                        left_eye: landmarks.left_eye,
                    }));
                    observability::record_webcam_frame(true);
                }
                Ok(None) => {
                    observability::record_webcam_frame(false);
                }
                Err(e) => {
                    warn!(error = %e, "landmark inference failed, frame skipped");
                    record_webcam_frame_dropped("inference");
                }
            }
        }

        Ok(())
    }
}
