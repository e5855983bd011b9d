//! # Recorders
//!
//! The two live data recorders of a session:
//!
//! - [`EyeTrackerRecorder`] wraps a push-style [`contracts::GazeSource`];
//!   every pushed sample is stamped on the driver's callback thread and
//!   appended to an in-memory log.
//! - [`WebcamRecorder`] runs a blocking capture + landmark-inference loop on
//!   a caller-provided worker thread, with cooperative cancellation.
//!
//! Both recorders accept marker injection from the controller thread at any
//! time; each log's append path is mutex-guarded so the producer thread and
//! the marker-injecting thread never race.
//!
//! Mock devices implementing the contract seams live in [`mock`], so the
//! full pipeline runs without hardware.

mod cancel;
pub mod mock;
mod tracker;
mod webcam;

pub use cancel::CancelToken;
pub use tracker::EyeTrackerRecorder;
pub use webcam::WebcamRecorder;
