//! Session statistics.

use std::time::Duration;

use exporter::ExportPaths;

/// Statistics from a completed session run
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// Completed stimulus presentations
    pub stimulus_events: usize,

    /// Eye tracker rows recorded (samples and markers)
    pub tracker_rows: usize,

    /// Webcam rows recorded (samples and markers)
    pub webcam_rows: usize,

    /// Total duration of the session run
    pub duration: Duration,

    /// Whether the operator exited before all sequences completed
    pub early_exit: bool,

    /// Whether the webcam stream ended abnormally
    pub webcam_degraded: bool,

    /// Files written by the exporter
    pub paths: ExportPaths,
}

impl SessionStats {
    /// Average tracker rows per second over the run
    pub fn tracker_rate(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.tracker_rows as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Session Statistics                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");

        println!("📊 Overview");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Stimulus presentations: {}", self.stimulus_events);
        println!("   ├─ Tracker rows: {}", self.tracker_rows);
        println!("   ├─ Webcam rows: {}", self.webcam_rows);
        println!("   └─ Tracker rate: {:.1} rows/s", self.tracker_rate());

        if self.early_exit {
            println!("\n⚠  Session exited early; exported data is a valid partial run");
        }
        if self.webcam_degraded {
            println!("⚠  Webcam stream ended abnormally; its log may be truncated");
        }

        println!("\n📤 Exported Files");
        println!("   ├─ {}", self.paths.stimulus.display());
        println!("   ├─ {}", self.paths.tracker.display());
        println!("   └─ {}", self.paths.webcam.display());

        println!();
    }
}
