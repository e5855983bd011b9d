//! Headless display for mock/CI sessions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::{ContractError, StimulusDisplay};
use tracing::debug;

/// Display that renders nothing and reads early-exit from a shared flag.
///
/// The CLI wires the flag to Ctrl+C so a headless run can still be exited
/// early; a windowed implementation would poll a keypress instead.
pub struct HeadlessDisplay {
    exit_flag: Arc<AtomicBool>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::with_exit_flag(Arc::new(AtomicBool::new(false)))
    }

    pub fn with_exit_flag(exit_flag: Arc<AtomicBool>) -> Self {
        Self { exit_flag }
    }

    /// The shared exit flag; set it from any thread to request early exit
    pub fn exit_flag(&self) -> Arc<AtomicBool> {
        self.exit_flag.clone()
    }
}

impl Default for HeadlessDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StimulusDisplay for HeadlessDisplay {
    fn show_stimulus(&mut self, offset_px: i32) -> Result<(), ContractError> {
        debug!(offset_px, "stimulus frame (headless)");
        Ok(())
    }

    fn show_blank(&mut self) -> Result<(), ContractError> {
        debug!("blank frame (headless)");
        Ok(())
    }

    fn exit_requested(&mut self) -> bool {
        self.exit_flag.load(Ordering::Relaxed)
    }
}
