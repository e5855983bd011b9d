//! Configuration validation.
//!
//! Rules:
//! - screen dimensions positive
//! - offset magnitudes finite and non-negative
//! - min_display_secs <= max_display_secs, both positive
//! - device/frame frequencies > 0
//! - session timing non-negative
//! - output dir non-empty

use contracts::{ContractError, SessionBlueprint};

/// Validate a SessionBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    validate_screen(blueprint)?;
    validate_stimulus(blueprint)?;
    validate_devices(blueprint)?;
    validate_session(blueprint)?;
    validate_output(blueprint)?;
    Ok(())
}

fn validate_screen(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    let screen = &blueprint.screen;
    if screen.width_px == 0 || screen.height_px == 0 {
        return Err(ContractError::config_validation(
            "screen.width_px / screen.height_px",
            "screen resolution must be positive",
        ));
    }
    if screen.width_cm <= 0.0 || screen.height_cm <= 0.0 {
        return Err(ContractError::config_validation(
            "screen.width_cm / screen.height_cm",
            format!(
                "physical screen size must be positive, got {}x{} cm",
                screen.width_cm, screen.height_cm
            ),
        ));
    }
    Ok(())
}

fn validate_stimulus(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    let stimulus = &blueprint.stimulus;

    for (idx, magnitude) in stimulus.offset_magnitudes_cm.iter().enumerate() {
        if !magnitude.is_finite() || *magnitude < 0.0 {
            return Err(ContractError::config_validation(
                format!("stimulus.offset_magnitudes_cm[{idx}]"),
                format!("offset magnitude must be finite and >= 0, got {magnitude}"),
            ));
        }
    }

    if stimulus.min_display_secs <= 0.0 {
        return Err(ContractError::config_validation(
            "stimulus.min_display_secs",
            format!(
                "display time must be > 0, got {}",
                stimulus.min_display_secs
            ),
        ));
    }
    if stimulus.min_display_secs > stimulus.max_display_secs {
        return Err(ContractError::config_validation(
            "stimulus.min_display_secs / stimulus.max_display_secs",
            format!(
                "min_display_secs ({}) must be <= max_display_secs ({})",
                stimulus.min_display_secs, stimulus.max_display_secs
            ),
        ));
    }
    if stimulus.inter_stimulus_secs < 0.0 {
        return Err(ContractError::config_validation(
            "stimulus.inter_stimulus_secs",
            "inter-stimulus interval must be >= 0",
        ));
    }
    Ok(())
}

fn validate_devices(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    if blueprint.tracker.device_frequency_hz <= 0.0 {
        return Err(ContractError::config_validation(
            "tracker.device_frequency_hz",
            format!(
                "frequency must be > 0, got {}",
                blueprint.tracker.device_frequency_hz
            ),
        ));
    }
    if blueprint.webcam.frame_rate_hz <= 0.0 {
        return Err(ContractError::config_validation(
            "webcam.frame_rate_hz",
            format!("frame rate must be > 0, got {}", blueprint.webcam.frame_rate_hz),
        ));
    }
    Ok(())
}

fn validate_session(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    let session = &blueprint.session;
    if session.settle_delay_secs < 0.0 {
        return Err(ContractError::config_validation(
            "session.settle_delay_secs",
            "settle delay must be >= 0",
        ));
    }
    if session.join_timeout_secs <= 0.0 {
        return Err(ContractError::config_validation(
            "session.join_timeout_secs",
            "join timeout must be > 0",
        ));
    }
    Ok(())
}

fn validate_output(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    if blueprint.output.dir.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "output.dir",
            "output directory cannot be empty",
        ));
    }
    Ok(())
}
