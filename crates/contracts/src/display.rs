//! StimulusDisplay trait - rendering seam for the stimulus timeline.

use crate::ContractError;

/// Full-screen stimulus rendering surface
///
/// Rendering quality and window management are out of scope; the timeline
/// only needs to put a marker at a horizontal offset, blank the screen, and
/// poll for an operator early-exit signal.
pub trait StimulusDisplay {
    /// Render a frame with the stimulus marker at `offset_px` from center
    fn show_stimulus(&mut self, offset_px: i32) -> Result<(), ContractError>;

    /// Render the neutral inter-stimulus frame
    fn show_blank(&mut self) -> Result<(), ContractError>;

    /// Whether the operator has requested an early exit
    ///
    /// Polled between small time slices while a frame is held on screen.
    fn exit_requested(&mut self) -> bool;
}
