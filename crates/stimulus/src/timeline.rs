//! Stimulus presentation timeline.

use std::thread;
use std::time::{Duration, Instant};

use contracts::{wall_clock_secs, ContractError, SessionBlueprint, StimulusDisplay, StimulusEvent};
use rand::Rng;
use tracing::{debug, info};

use crate::catalog::{build_catalog, CatalogEntry};

/// Timeline configuration, derived from the session blueprint
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Symmetric offset magnitudes, catalog order
    pub offset_magnitudes_cm: Vec<f64>,

    /// Linear cm-to-pixel scale factor
    pub cm_to_pixel: f64,

    /// Presentation duration range, seconds
    pub min_display_secs: f64,
    pub max_display_secs: f64,

    /// Blank inter-stimulus interval, seconds
    pub inter_stimulus_secs: f64,

    /// Early-exit poll slice while a frame is held
    pub poll_interval: Duration,
}

impl TimelineConfig {
    /// Derive the timeline configuration from a validated blueprint
    pub fn from_blueprint(blueprint: &SessionBlueprint) -> Self {
        Self {
            offset_magnitudes_cm: blueprint.stimulus.offset_magnitudes_cm.clone(),
            cm_to_pixel: blueprint.screen.cm_to_pixel(),
            min_display_secs: blueprint.stimulus.min_display_secs,
            max_display_secs: blueprint.stimulus.max_display_secs,
            inter_stimulus_secs: blueprint.stimulus.inter_stimulus_secs,
            poll_interval: Duration::from_millis(blueprint.stimulus.poll_interval_ms),
        }
    }
}

/// Deterministic-order stimulus timeline.
///
/// Iterates the catalog in fixed order for `sequence_count` repetitions.
/// Blocking happens on the caller's thread; the wait busy-polls in small
/// slices so an operator early-exit is observed promptly. Early exit returns
/// the partial event sequence as `Ok` - partial data is valid, not an error.
pub struct StimulusTimeline<D: StimulusDisplay> {
    config: TimelineConfig,
    catalog: Vec<CatalogEntry>,
    display: D,
}

impl<D: StimulusDisplay> StimulusTimeline<D> {
    pub fn new(config: TimelineConfig, display: D) -> Self {
        let catalog = build_catalog(&config.offset_magnitudes_cm, config.cm_to_pixel);
        Self {
            config,
            catalog,
            display,
        }
    }

    /// The catalog this timeline presents per repetition
    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    /// Run the presentation loop.
    ///
    /// Returns `sequence_count x catalog_size` events, or a strict prefix
    /// (possibly empty) if the operator signals exit. `sequence_count = 0`
    /// returns an empty list without touching the display. Only completed
    /// presentations are appended; an exit during a held frame discards it.
    pub fn run(&mut self, sequence_count: u32) -> Result<Vec<StimulusEvent>, ContractError> {
        let mut events = Vec::with_capacity(sequence_count as usize * self.catalog.len());
        let mut rng = rand::rng();

        info!(
            sequence_count,
            catalog_size = self.catalog.len(),
            "stimulus timeline starting"
        );

        for repetition in 0..sequence_count {
            for idx in 0..self.catalog.len() {
                let entry = self.catalog[idx];

                self.display.show_stimulus(entry.offset_px)?;
                let start_time = wall_clock_secs();
                let display_secs = self.sample_display_secs(&mut rng);

                debug!(
                    repetition,
                    offset_px = entry.offset_px,
                    display_secs,
                    "stimulus shown"
                );

                if self.hold(display_secs) {
                    info!(events = events.len(), "early exit during stimulus frame");
                    return Ok(events);
                }

                events.push(StimulusEvent {
                    start_time,
                    offset_px: entry.offset_px,
                    offset_cm: entry.offset_cm,
                });
                observability::record_stimulus_event();

                self.display.show_blank()?;
                if self.hold(self.config.inter_stimulus_secs) {
                    info!(events = events.len(), "early exit during blank interval");
                    return Ok(events);
                }
            }
        }

        info!(events = events.len(), "stimulus timeline complete");
        Ok(events)
    }

    /// Uniform presentation duration in `[min, max]`
    fn sample_display_secs(&self, rng: &mut impl Rng) -> f64 {
        let (min, max) = (self.config.min_display_secs, self.config.max_display_secs);
        if max > min {
            rng.random_range(min..max)
        } else {
            min
        }
    }

    /// Block for `secs` while polling for early exit.
    ///
    /// Returns true when the operator requested exit.
    fn hold(&mut self, secs: f64) -> bool {
        let deadline = Instant::now() + Duration::from_secs_f64(secs);
        while Instant::now() < deadline {
            if self.display.exit_requested() {
                return true;
            }
            thread::sleep(self.config.poll_interval);
        }
        false
    }
}
