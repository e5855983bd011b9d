//! # Stimulus
//!
//! Stimulus presentation timeline: builds the fixed catalog of horizontal
//! offsets, presents each entry through a [`contracts::StimulusDisplay`] for
//! a randomized duration, and returns the ordered [`contracts::StimulusEvent`]
//! sequence. Early operator exit returns the partial sequence as valid data.

mod catalog;
mod headless;
mod timeline;

pub use catalog::{build_catalog, CatalogEntry};
pub use headless::HeadlessDisplay;
pub use timeline::{StimulusTimeline, TimelineConfig};
