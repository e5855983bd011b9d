//! # Exporter
//!
//! End-of-session CSV export. The three accumulated logs are written once,
//! after recording stops, into three files sharing a single run timestamp:
//!
//! - `stimulus_data_<ts>.csv`
//! - `tobii_data_<ts>.csv`
//! - `webcam_gaze_data_<ts>.csv`
//!
//! There is no streaming persistence; session length is bounded by memory.

mod csv;

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use contracts::{ContractError, StimulusEvent, TrackerRow, WebcamRow};
use tracing::{debug, info};

use crate::csv::write_record;

/// The three session logs, pulled after recording stops
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    pub stimulus: Vec<StimulusEvent>,
    pub tracker: Vec<TrackerRow>,
    pub webcam: Vec<WebcamRow>,
}

/// Paths of the files written for one session
#[derive(Debug, Clone)]
pub struct ExportPaths {
    pub stimulus: PathBuf,
    pub tracker: PathBuf,
    pub webcam: PathBuf,
}

/// Writes session data to CSV files in a base directory
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    /// Create an exporter, creating the output directory if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, ContractError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Export all three logs with a run timestamp taken now
    pub fn export(&self, data: &SessionData) -> Result<ExportPaths, ContractError> {
        let run_ts = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        self.export_with_timestamp(data, &run_ts)
    }

    /// Export all three logs under the given shared run timestamp
    pub fn export_with_timestamp(
        &self,
        data: &SessionData,
        run_ts: &str,
    ) -> Result<ExportPaths, ContractError> {
        let paths = ExportPaths {
            stimulus: self.output_dir.join(format!("stimulus_data_{run_ts}.csv")),
            tracker: self.output_dir.join(format!("tobii_data_{run_ts}.csv")),
            webcam: self
                .output_dir
                .join(format!("webcam_gaze_data_{run_ts}.csv")),
        };

        write_stimulus_csv(&paths.stimulus, &data.stimulus)?;
        write_tracker_csv(&paths.tracker, &data.tracker)?;
        write_webcam_csv(&paths.webcam, &data.webcam)?;

        info!(
            run_ts,
            stimulus_rows = data.stimulus.len(),
            tracker_rows = data.tracker.len(),
            webcam_rows = data.webcam.len(),
            "session data exported"
        );

        Ok(paths)
    }
}

fn create_writer(path: &Path) -> Result<BufWriter<File>, ContractError> {
    let file = File::create(path).map_err(|e| export_err(path, e))?;
    Ok(BufWriter::new(file))
}

fn export_err(path: &Path, e: std::io::Error) -> ContractError {
    ContractError::export_write(path.display().to_string(), e.to_string())
}

fn write_stimulus_csv(path: &Path, events: &[StimulusEvent]) -> Result<(), ContractError> {
    let mut writer = create_writer(path)?;

    write_record(
        &mut writer,
        &["Timestamp", "Stimulus Position (px)", "Stimulus Offset (cm)"],
    )
    .map_err(|e| export_err(path, e))?;

    for event in events {
        write_record(
            &mut writer,
            &[
                event.start_time.to_string(),
                event.offset_px.to_string(),
                event.offset_cm.to_string(),
            ],
        )
        .map_err(|e| export_err(path, e))?;
    }

    writer.flush().map_err(|e| export_err(path, e))?;
    debug!(path = %path.display(), rows = events.len(), "stimulus csv written");
    Ok(())
}

fn write_tracker_csv(path: &Path, rows: &[TrackerRow]) -> Result<(), ContractError> {
    let mut writer = create_writer(path)?;

    // Column set is driver-decided: union of keys over all data rows
    let device_keys: BTreeSet<&str> = rows
        .iter()
        .filter_map(|row| match row {
            TrackerRow::Sample(s) => Some(s.fields.keys().map(String::as_str)),
            TrackerRow::Marker(_) => None,
        })
        .flatten()
        .collect();

    let mut header = vec!["System Timestamp".to_string()];
    header.extend(device_keys.iter().map(|k| k.to_string()));
    header.push("Marker".to_string());
    write_record(&mut writer, &header).map_err(|e| export_err(path, e))?;

    for row in rows {
        let mut record = Vec::with_capacity(header.len());
        match row {
            TrackerRow::Sample(sample) => {
                record.push(sample.system_timestamp.to_string());
                for key in &device_keys {
                    record.push(
                        sample
                            .fields
                            .get(*key)
                            .map(|v| v.to_string())
                            .unwrap_or_default(),
                    );
                }
                record.push(String::new());
            }
            TrackerRow::Marker(marker) => {
                record.push(marker.timestamp.to_string());
                record.extend(device_keys.iter().map(|_| String::new()));
                record.push(marker.label.clone());
            }
        }
        write_record(&mut writer, &record).map_err(|e| export_err(path, e))?;
    }

    writer.flush().map_err(|e| export_err(path, e))?;
    debug!(path = %path.display(), rows = rows.len(), "tracker csv written");
    Ok(())
}

fn write_webcam_csv(path: &Path, rows: &[WebcamRow]) -> Result<(), ContractError> {
    let mut writer = create_writer(path)?;

    write_record(
        &mut writer,
        &[
            "Timestamp",
            "Right Eye X",
            "Right Eye Y",
            "Left Eye X",
            "Left Eye Y",
            "Markers",
        ],
    )
    .map_err(|e| export_err(path, e))?;

    for row in rows {
        let record = match row {
            WebcamRow::Sample(sample) => vec![
                sample.timestamp.to_string(),
                sample.right_eye.x.to_string(),
                sample.right_eye.y.to_string(),
                sample.left_eye.x.to_string(),
                sample.left_eye.y.to_string(),
                String::new(),
            ],
            WebcamRow::Marker(marker) => vec![
                marker.timestamp.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                marker.label.clone(),
            ],
        };
        write_record(&mut writer, &record).map_err(|e| export_err(path, e))?;
    }

    writer.flush().map_err(|e| export_err(path, e))?;
    debug!(path = %path.display(), rows = rows.len(), "webcam csv written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{MarkerEvent, Point2, TrackerSample, WebcamSample};
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_data() -> SessionData {
        let mut fields = BTreeMap::new();
        fields.insert("left_gaze_point_x".to_string(), 0.4);
        fields.insert("right_gaze_point_x".to_string(), 0.6);

        SessionData {
            stimulus: vec![StimulusEvent {
                start_time: 100.0,
                offset_px: 253,
                offset_cm: 5.0,
            }],
            tracker: vec![
                TrackerRow::Marker(MarkerEvent {
                    label: "Start stimulus".to_string(),
                    timestamp: 99.5,
                }),
                TrackerRow::Sample(TrackerSample {
                    system_timestamp: 100.1,
                    fields,
                }),
            ],
            webcam: vec![
                WebcamRow::Sample(WebcamSample {
                    timestamp: 100.2,
                    right_eye: Point2 { x: 37.0, y: 24.0 },
                    left_eye: Point2 { x: 27.0, y: 24.0 },
                }),
                WebcamRow::Marker(MarkerEvent {
                    label: "End stimulus".to_string(),
                    timestamp: 101.0,
                }),
            ],
        }
    }

    #[test]
    fn test_export_creates_three_files_with_shared_timestamp() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();

        let paths = exporter
            .export_with_timestamp(&sample_data(), "20260101_120000")
            .unwrap();

        assert!(paths.stimulus.exists());
        assert!(paths.tracker.exists());
        assert!(paths.webcam.exists());
        assert!(paths
            .stimulus
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .contains("20260101_120000"));
    }

    #[test]
    fn test_stimulus_csv_contents() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let paths = exporter
            .export_with_timestamp(&sample_data(), "ts")
            .unwrap();

        let content = fs::read_to_string(&paths.stimulus).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Timestamp,Stimulus Position (px),Stimulus Offset (cm)"
        );
        assert_eq!(lines[1], "100,253,5");
    }

    #[test]
    fn test_tracker_csv_marker_sparsity() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let paths = exporter
            .export_with_timestamp(&sample_data(), "ts")
            .unwrap();

        let content = fs::read_to_string(&paths.tracker).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "System Timestamp,left_gaze_point_x,right_gaze_point_x,Marker"
        );
        // Marker row: empty device columns, label in the last column
        assert_eq!(lines[1], "99.5,,,Start stimulus");
        // Sample row: values filled, marker column empty
        assert_eq!(lines[2], "100.1,0.4,0.6,");
    }

    #[test]
    fn test_webcam_csv_sparsity() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let paths = exporter
            .export_with_timestamp(&sample_data(), "ts")
            .unwrap();

        let content = fs::read_to_string(&paths.webcam).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "Timestamp,Right Eye X,Right Eye Y,Left Eye X,Left Eye Y,Markers"
        );
        assert_eq!(lines[1], "100.2,37,24,27,24,");
        assert_eq!(lines[2], "101,,,,,End stimulus");
    }

    #[test]
    fn test_empty_session_writes_headers_only() {
        let dir = tempdir().unwrap();
        let exporter = Exporter::new(dir.path()).unwrap();
        let paths = exporter
            .export_with_timestamp(&SessionData::default(), "ts")
            .unwrap();

        for path in [&paths.stimulus, &paths.tracker, &paths.webcam] {
            let content = fs::read_to_string(path).unwrap();
            assert_eq!(content.lines().count(), 1, "{}", path.display());
        }
    }
}
