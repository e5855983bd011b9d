//! # Integration Tests
//!
//! End-to-end tests over the full mock session pipeline:
//! recorders + timeline + exporter, no hardware required.

#[cfg(test)]
mod contract_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{END_MARKER, START_MARKER};

    const REFERENCE_TOML: &str = r#"
[screen]
width_px = 1920
height_px = 1200
width_cm = 38.0
height_cm = 24.0
"#;

    #[test]
    fn test_marker_labels_are_shared_across_streams() {
        assert_eq!(START_MARKER, "Start stimulus");
        assert_eq!(END_MARKER, "End stimulus");
    }

    #[test]
    fn test_default_config_produces_reference_catalog() {
        let blueprint = ConfigLoader::load_from_str(REFERENCE_TOML, ConfigFormat::Toml).unwrap();
        let catalog = stimulus::build_catalog(
            &blueprint.stimulus.offset_magnitudes_cm,
            blueprint.screen.cm_to_pixel(),
        );

        let px: Vec<i32> = catalog.iter().map(|e| e.offset_px).collect();
        assert_eq!(px, vec![0, 253, -253, 505, -505]);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use bytes::Bytes;
    use contracts::{
        CameraFrame, ContractError, FrameSource, TrackerRow, WebcamRow, END_MARKER, START_MARKER,
    };
    use exporter::{Exporter, SessionData};
    use recorders::mock::{
        MockCamera, MockCameraConfig, MockEstimator, MockEstimatorConfig, MockGazeDevice,
        MockGazeDeviceConfig,
    };
    use recorders::{EyeTrackerRecorder, WebcamRecorder};
    use stimulus::{HeadlessDisplay, StimulusTimeline, TimelineConfig};
    use tempfile::tempdir;

    /// Timings short enough that the whole session runs in well under a second
    fn fast_timeline_config() -> TimelineConfig {
        TimelineConfig {
            offset_magnitudes_cm: vec![5.0, 10.0],
            cm_to_pixel: 1920.0 / 38.0,
            min_display_secs: 0.02,
            max_display_secs: 0.02,
            inter_stimulus_secs: 0.01,
            poll_interval: Duration::from_millis(1),
        }
    }

    fn start_webcam_worker(
        recorder: Arc<WebcamRecorder>,
    ) -> tokio::task::JoinHandle<Result<(), contracts::ContractError>> {
        tokio::task::spawn_blocking(move || {
            let mut camera = MockCamera::new(MockCameraConfig {
                frame_rate_hz: 200.0,
                ..Default::default()
            });
            let mut estimator = MockEstimator::new(MockEstimatorConfig::default());
            recorder.run_loop(&mut camera, &mut estimator)
        })
    }

    /// End-to-end: recorders -> markers -> timeline -> export.
    ///
    /// Runs the same sequence the session controller drives, against mock
    /// devices, and checks the exported CSVs reflect the accumulated logs.
    #[tokio::test]
    async fn test_e2e_mock_session() {
        let device = MockGazeDevice::discover(MockGazeDeviceConfig {
            frequency_hz: 200.0,
            ..Default::default()
        })
        .unwrap();
        let tracker = Arc::new(EyeTrackerRecorder::new(device));
        let webcam = Arc::new(WebcamRecorder::new(Duration::from_millis(1)));

        tracker.start().unwrap();
        let webcam_handle = start_webcam_worker(Arc::clone(&webcam));

        // Settle, then bracket the stimulus run with shared markers
        tokio::time::sleep(Duration::from_millis(50)).await;
        tracker.add_marker(START_MARKER);
        webcam.add_marker(START_MARKER);

        let sequence_count = 2u32;
        let timeline_handle = tokio::task::spawn_blocking(move || {
            let mut timeline =
                StimulusTimeline::new(fast_timeline_config(), HeadlessDisplay::new());
            timeline.run(sequence_count)
        });
        let events = timeline_handle.await.unwrap().unwrap();

        tracker.add_marker(END_MARKER);
        webcam.add_marker(END_MARKER);

        tracker.stop().unwrap();
        webcam.stop();
        let webcam_result = tokio::time::timeout(Duration::from_secs(3), webcam_handle)
            .await
            .expect("webcam worker did not stop")
            .unwrap();
        assert!(webcam_result.is_ok());

        // Catalog has 5 positions; every presentation completed
        assert_eq!(events.len(), 5 * sequence_count as usize);

        let tracker_rows = tracker.get_data();
        let webcam_rows = webcam.get_data();

        let tracker_markers: Vec<&str> = tracker_rows
            .iter()
            .filter_map(|row| match row {
                TrackerRow::Marker(m) => Some(m.label.as_str()),
                TrackerRow::Sample(_) => None,
            })
            .collect();
        assert_eq!(tracker_markers, vec![START_MARKER, END_MARKER]);

        let webcam_markers: Vec<&str> = webcam_rows
            .iter()
            .filter_map(|row| match row {
                WebcamRow::Marker(m) => Some(m.label.as_str()),
                WebcamRow::Sample(_) => None,
            })
            .collect();
        assert_eq!(webcam_markers, vec![START_MARKER, END_MARKER]);

        // Both streams produced data alongside the markers
        assert!(tracker_rows.len() > 2, "no tracker samples recorded");
        assert!(webcam_rows.len() > 2, "no webcam samples recorded");

        // Per-log append order implies non-decreasing timestamps
        let stamps: Vec<f64> = tracker_rows.iter().map(|r| r.timestamp()).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));

        // Export and verify file contents line up with the logs
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let data = SessionData {
            stimulus: events,
            tracker: tracker_rows,
            webcam: webcam_rows,
        };
        let paths = exporter.export(&data).unwrap();

        let stimulus_csv = std::fs::read_to_string(&paths.stimulus).unwrap();
        assert_eq!(stimulus_csv.lines().count(), 1 + data.stimulus.len());
        assert!(stimulus_csv.starts_with("Timestamp,Stimulus Position (px),Stimulus Offset (cm)"));

        let tracker_csv = std::fs::read_to_string(&paths.tracker).unwrap();
        assert_eq!(tracker_csv.lines().count(), 1 + data.tracker.len());
        assert!(tracker_csv.contains(START_MARKER));
        assert!(tracker_csv.contains(END_MARKER));

        let webcam_csv = std::fs::read_to_string(&paths.webcam).unwrap();
        assert_eq!(webcam_csv.lines().count(), 1 + data.webcam.len());
        assert!(webcam_csv.contains(END_MARKER));
    }

    /// Early exit before the first frame completes: no stimulus events, but
    /// the session still exports valid (header-only) stimulus data and both
    /// recorder logs.
    #[tokio::test]
    async fn test_e2e_early_exit_exports_partial_session() {
        let device = MockGazeDevice::discover(MockGazeDeviceConfig {
            frequency_hz: 200.0,
            ..Default::default()
        })
        .unwrap();
        let tracker = Arc::new(EyeTrackerRecorder::new(device));
        let webcam = Arc::new(WebcamRecorder::new(Duration::from_millis(1)));

        tracker.start().unwrap();
        let webcam_handle = start_webcam_worker(Arc::clone(&webcam));
        tokio::time::sleep(Duration::from_millis(30)).await;

        tracker.add_marker(START_MARKER);
        webcam.add_marker(START_MARKER);

        let display = HeadlessDisplay::new();
        let exit_flag = display.exit_flag();
        exit_flag.store(true, Ordering::SeqCst);

        let events = tokio::task::spawn_blocking(move || {
            let mut timeline = StimulusTimeline::new(fast_timeline_config(), display);
            timeline.run(3)
        })
        .await
        .unwrap()
        .unwrap();
        assert!(events.is_empty());

        tracker.add_marker(END_MARKER);
        webcam.add_marker(END_MARKER);
        tracker.stop().unwrap();
        webcam.stop();
        tokio::time::timeout(Duration::from_secs(3), webcam_handle)
            .await
            .expect("webcam worker did not stop")
            .unwrap()
            .unwrap();

        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let data = SessionData {
            stimulus: events,
            tracker: tracker.get_data(),
            webcam: webcam.get_data(),
        };
        let paths = exporter.export(&data).unwrap();

        let stimulus_csv = std::fs::read_to_string(&paths.stimulus).unwrap();
        assert_eq!(stimulus_csv.lines().count(), 1, "expected header only");

        // Recorder logs still carry their markers
        let tracker_csv = std::fs::read_to_string(&paths.tracker).unwrap();
        assert!(tracker_csv.contains(START_MARKER));
        assert!(tracker_csv.contains(END_MARKER));
    }

    /// Camera whose reads block far longer than any join timeout, so the
    /// capture loop cannot observe cancellation promptly.
    struct WedgedCamera;

    impl FrameSource for WedgedCamera {
        fn open(&mut self) -> Result<(), ContractError> {
            Ok(())
        }

        fn read_frame(&mut self) -> Result<CameraFrame, ContractError> {
            std::thread::sleep(Duration::from_secs(2));
            Ok(CameraFrame {
                width: 4,
                height: 4,
                data: Bytes::from_static(&[0u8; 48]),
            })
        }

        fn close(&mut self) {}
    }

    /// A worker stuck inside a frame read does not hold up shutdown: the
    /// bounded join elapses and the session proceeds to export whatever the
    /// webcam log holds.
    #[tokio::test]
    async fn test_bounded_join_proceeds_after_timeout() {
        let webcam = Arc::new(WebcamRecorder::new(Duration::from_millis(1)));
        let webcam_handle = {
            let webcam = Arc::clone(&webcam);
            tokio::task::spawn_blocking(move || {
                let mut camera = WedgedCamera;
                let mut estimator = MockEstimator::new(MockEstimatorConfig::default());
                webcam.run_loop(&mut camera, &mut estimator)
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        webcam.add_marker(START_MARKER);
        webcam.stop();

        // The in-flight read outlasts the join budget
        let join = tokio::time::timeout(Duration::from_millis(200), webcam_handle).await;
        assert!(join.is_err(), "worker should still be wedged");

        // Export runs regardless; the log stays readable while the worker
        // is stuck on its read
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let data = SessionData {
            stimulus: Vec::new(),
            tracker: Vec::new(),
            webcam: webcam.get_data(),
        };
        let paths = exporter.export(&data).unwrap();
        let csv = std::fs::read_to_string(&paths.webcam).unwrap();
        assert!(csv.contains(START_MARKER));
    }

    /// A webcam stream that dies mid-session degrades the run; the tracker
    /// log and whatever the webcam accumulated remain exportable.
    #[tokio::test]
    async fn test_e2e_webcam_failure_keeps_tracker_data() {
        let device = MockGazeDevice::discover(MockGazeDeviceConfig {
            frequency_hz: 200.0,
            ..Default::default()
        })
        .unwrap();
        let tracker = Arc::new(EyeTrackerRecorder::new(device));
        let webcam = Arc::new(WebcamRecorder::new(Duration::from_millis(1)));

        tracker.start().unwrap();

        // Camera that cannot open: the worker fails immediately
        let webcam_handle = {
            let webcam = Arc::clone(&webcam);
            tokio::task::spawn_blocking(move || {
                let mut camera = MockCamera::new(MockCameraConfig {
                    fail_open: true,
                    ..Default::default()
                });
                let mut estimator = MockEstimator::new(MockEstimatorConfig::default());
                webcam.run_loop(&mut camera, &mut estimator)
            })
        };

        tokio::time::sleep(Duration::from_millis(30)).await;
        tracker.stop().unwrap();
        webcam.stop();

        let webcam_result = tokio::time::timeout(Duration::from_secs(3), webcam_handle)
            .await
            .unwrap()
            .unwrap();
        assert!(webcam_result.is_err());

        let tracker_rows = tracker.get_data();
        assert!(!tracker_rows.is_empty(), "tracker should have kept recording");

        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let data = SessionData {
            stimulus: Vec::new(),
            tracker: tracker_rows,
            webcam: webcam.get_data(),
        };
        assert!(exporter.export(&data).is_ok());
    }
}
