//! Eye-tracker recorder - push-subscription wrapper around a `GazeSource`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::{
    wall_clock_secs, ContractError, GazeSource, MarkerEvent, RecordLog, TrackerRow, TrackerSample,
};
use tracing::{debug, info, warn};

/// Recorder for a push-style eye-tracking device.
///
/// State machine: {Idle, Recording}. Lifecycle misuse (`start` while
/// Recording, `stop` while Idle) is a logged warning and a no-op, never an
/// error. Driver subscribe/unsubscribe failures propagate as fatal setup
/// errors; the controller owns best-effort cleanup.
pub struct EyeTrackerRecorder<S: GazeSource> {
    source: S,
    log: Arc<RecordLog<TrackerRow>>,
    recording: AtomicBool,
}

impl<S: GazeSource> EyeTrackerRecorder<S> {
    /// Wrap a discovered gaze source.
    ///
    /// Device discovery happens before construction; a source handed in here
    /// is assumed usable until subscribe says otherwise.
    pub fn new(source: S) -> Self {
        Self {
            source,
            log: Arc::new(RecordLog::new()),
            recording: AtomicBool::new(false),
        }
    }

    /// Identifier of the underlying device
    pub fn device_id(&self) -> &str {
        self.source.device_id()
    }

    /// Whether the recorder is currently in the Recording state
    pub fn is_recording(&self) -> bool {
        self.recording.load(Ordering::Relaxed)
    }

    /// Transition Idle -> Recording.
    ///
    /// Clears any prior log, then registers the push callback. Each pushed
    /// sample is stamped with the driver thread's wall clock at append time.
    pub fn start(&self) -> Result<(), ContractError> {
        if self.recording.load(Ordering::SeqCst) {
            warn!(device = %self.source.device_id(), "already recording, start ignored");
            return Ok(());
        }

        self.log.clear();

        let log = Arc::clone(&self.log);
        self.source.subscribe(Arc::new(move |fields| {
            log.append(TrackerRow::Sample(TrackerSample {
                system_timestamp: wall_clock_secs(),
                fields,
            }));
            observability::record_tracker_sample();
        }))?;

        self.recording.store(true, Ordering::SeqCst);
        info!(device = %self.source.device_id(), "started recording (subscribed to gaze data)");
        Ok(())
    }

    /// Transition Recording -> Idle.
    pub fn stop(&self) -> Result<(), ContractError> {
        if !self.recording.load(Ordering::SeqCst) {
            warn!(device = %self.source.device_id(), "not recording, stop ignored");
            return Ok(());
        }

        self.source.unsubscribe()?;
        self.recording.store(false, Ordering::SeqCst);
        info!(device = %self.source.device_id(), "stopped recording (unsubscribed)");
        Ok(())
    }

    /// Append a marker row, regardless of recorder state.
    ///
    /// A marker before `start()` or after `stop()` produces a row with no
    /// enclosing data context; that is accepted behavior.
    pub fn add_marker(&self, label: &str) {
        self.log.append(TrackerRow::Marker(MarkerEvent::now(label)));
        observability::record_marker("tracker");
        debug!(label, "tracker marker appended");
    }

    /// Accumulated rows in append order.
    ///
    /// Intended for use after recording stops.
    pub fn get_data(&self) -> Vec<TrackerRow> {
        self.log.snapshot()
    }
}
