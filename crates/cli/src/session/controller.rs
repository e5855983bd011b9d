//! Session controller - coordinates recorders, timeline and export.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use contracts::{SessionBlueprint, END_MARKER, START_MARKER};
use exporter::{Exporter, SessionData};
use recorders::mock::{
    MockCamera, MockCameraConfig, MockEstimator, MockEstimatorConfig, MockGazeDevice,
    MockGazeDeviceConfig,
};
use recorders::{EyeTrackerRecorder, WebcamRecorder};
use stimulus::{HeadlessDisplay, StimulusTimeline, TimelineConfig};
use tracing::{info, warn};

use super::SessionStats;

/// Drives one recording session end to end.
///
/// The sequence is: discover devices, start both recording streams, wait for
/// them to settle, bracket the stimulus run with shared markers, stop both
/// streams, then export whatever accumulated. Webcam failures after startup
/// degrade the session instead of aborting it; the remaining logs are still
/// exported.
pub struct SessionController {
    blueprint: SessionBlueprint,
    no_prompt: bool,
}

impl SessionController {
    pub fn new(blueprint: SessionBlueprint, no_prompt: bool) -> Self {
        Self {
            blueprint,
            no_prompt,
        }
    }

    /// Run the session to completion.
    ///
    /// `exit_flag` requests early exit: the timeline stops presenting at the
    /// next poll and the partial session is exported as valid data.
    pub async fn run(self, exit_flag: Arc<AtomicBool>) -> Result<SessionStats> {
        let start_time = Instant::now();
        let blueprint = self.blueprint;

        // Device discovery; a missing tracker aborts before anything records
        let device = MockGazeDevice::discover(MockGazeDeviceConfig {
            frequency_hz: blueprint.tracker.device_frequency_hz,
            ..Default::default()
        })
        .context("Eye tracker discovery failed")?;

        let tracker = Arc::new(EyeTrackerRecorder::new(device));
        let webcam = Arc::new(WebcamRecorder::new(Duration::from_millis(
            blueprint.webcam.retry_backoff_ms,
        )));

        info!(device = %tracker.device_id(), "Eye tracker discovered");

        if !self.no_prompt {
            wait_for_operator().await?;
        }

        tracker
            .start()
            .context("Could not start eye tracker recording")?;

        // The capture loop blocks, so it gets its own worker thread
        let webcam_handle = {
            let webcam = Arc::clone(&webcam);
            let config = blueprint.webcam.clone();
            tokio::task::spawn_blocking(move || {
                let mut camera = MockCamera::new(MockCameraConfig {
                    frame_rate_hz: config.frame_rate_hz,
                    ..Default::default()
                });
                let mut estimator = MockEstimator::new(MockEstimatorConfig::default());
                webcam.run_loop(&mut camera, &mut estimator)
            })
        };

        // Let both streams reach steady state before the first marker
        tokio::time::sleep(Duration::from_secs_f64(blueprint.session.settle_delay_secs)).await;

        tracker.add_marker(START_MARKER);
        webcam.add_marker(START_MARKER);

        let timeline_result = {
            let config = TimelineConfig::from_blueprint(&blueprint);
            let display = HeadlessDisplay::with_exit_flag(Arc::clone(&exit_flag));
            let sequence_count = blueprint.session.sequence_count;
            tokio::task::spawn_blocking(move || {
                let mut timeline = StimulusTimeline::new(config, display);
                timeline.run(sequence_count)
            })
            .await
        };

        tracker.add_marker(END_MARKER);
        webcam.add_marker(END_MARKER);

        // Stop both streams before reading the logs
        if let Err(e) = tracker.stop() {
            warn!(error = %e, "Eye tracker stop failed");
        }
        webcam.stop();

        // Bounded wait: a wedged capture loop must not block the export
        let join_timeout = Duration::from_secs_f64(blueprint.session.join_timeout_secs);
        let webcam_degraded = match tokio::time::timeout(join_timeout, webcam_handle).await {
            Ok(Ok(Ok(()))) => false,
            Ok(Ok(Err(e))) => {
                warn!(error = %e, "Webcam capture ended with an error, exporting partial data");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Webcam worker panicked");
                true
            }
            Err(_) => {
                warn!(
                    timeout_secs = join_timeout.as_secs_f64(),
                    "Webcam worker did not stop in time, proceeding with export"
                );
                true
            }
        };

        let events = match timeline_result {
            Ok(Ok(events)) => events,
            Ok(Err(e)) => return Err(e).context("Stimulus presentation failed"),
            Err(e) => return Err(e).context("Stimulus worker failed"),
        };

        let early_exit = exit_flag.load(Ordering::SeqCst);

        let data = SessionData {
            stimulus: events,
            tracker: tracker.get_data(),
            webcam: webcam.get_data(),
        };

        let exporter = Exporter::new(blueprint.output.dir.clone())
            .context("Could not prepare output directory")?;
        let paths = exporter.export(&data).context("Session export failed")?;

        Ok(SessionStats {
            stimulus_events: data.stimulus.len(),
            tracker_rows: data.tracker.len(),
            webcam_rows: data.webcam.len(),
            duration: start_time.elapsed(),
            early_exit,
            webcam_degraded,
            paths,
        })
    }
}

/// Block until the operator confirms the participant is ready
async fn wait_for_operator() -> Result<()> {
    println!("Press Enter to start the session...");
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| ())
    })
    .await
    .context("Prompt task failed")?
    .context("Could not read from stdin")?;
    Ok(())
}
