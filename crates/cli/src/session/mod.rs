//! Session orchestration module.

mod controller;
mod stats;

pub use controller::SessionController;
pub use stats::SessionStats;
