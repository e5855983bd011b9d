//! Webcam capture and landmark-estimation seams.
//!
//! The capture loop pulls frames from a `FrameSource` and feeds them to a
//! `LandmarkEstimator`; both are collaborator boundaries so the recorder
//! never touches a camera driver or an inference runtime directly.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{ContractError, Point2};

/// One raw camera frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraFrame {
    /// Frame width, pixels
    pub width: u32,

    /// Frame height, pixels
    pub height: u32,

    /// Raw pixel data (zero-copy)
    pub data: Bytes,
}

/// Eye-center estimates extracted from one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeLandmarks {
    pub right_eye: Point2,
    pub left_eye: Point2,
}

/// Pull-style camera frame source
pub trait FrameSource: Send {
    /// Open the device. Failure here is fatal for the capture loop.
    fn open(&mut self) -> Result<(), ContractError>;

    /// Read one frame, blocking until it is available.
    ///
    /// A `TransientCapture` error means the frame was lost but the device is
    /// still usable; anything else terminates the loop.
    fn read_frame(&mut self) -> Result<CameraFrame, ContractError>;

    /// Release the device
    fn close(&mut self);
}

/// Per-frame face-landmark inference
pub trait LandmarkEstimator: Send {
    /// Run inference on one frame.
    ///
    /// `Ok(None)` means no face was detected; the frame produces no row.
    /// Errors are treated as a missed frame by the capture loop.
    fn detect_eyes(&mut self, frame: &CameraFrame) -> Result<Option<EyeLandmarks>, ContractError>;
}
