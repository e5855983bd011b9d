//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace.
//! All business crates depend only on this crate; reverse dependencies are
//! prohibited.
//!
//! ## Time Model
//! - Every log row is stamped with wall-clock seconds since the Unix epoch
//!   (`f64`), taken on the thread that appends the row.
//! - The three data streams (stimulus, eye tracker, webcam) share only this
//!   wall-clock epoch; no cross-stream monotonic reference exists.

mod blueprint;
mod capture;
mod clock;
mod display;
mod error;
mod record_log;
mod sample;
mod source;

pub use blueprint::*;
pub use capture::*;
pub use clock::wall_clock_secs;
pub use display::StimulusDisplay;
pub use error::*;
pub use record_log::RecordLog;
pub use sample::*;
pub use source::{GazeDataCallback, GazeSource};
