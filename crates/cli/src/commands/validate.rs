//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    screen_px: String,
    cm_to_pixel: f64,
    catalog_size: usize,
    sequence_count: u32,
    output_dir: String,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            // Catalog: central position plus +/- each magnitude
            let catalog_size = 1 + 2 * blueprint.stimulus.offset_magnitudes_cm.len();

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    screen_px: format!(
                        "{}x{}",
                        blueprint.screen.width_px, blueprint.screen.height_px
                    ),
                    cm_to_pixel: blueprint.screen.cm_to_pixel(),
                    catalog_size,
                    sequence_count: blueprint.session.sequence_count,
                    output_dir: blueprint.output.dir.display().to_string(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &contracts::SessionBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.session.sequence_count == 0 {
        warnings.push("session.sequence_count is 0 - no stimuli will be presented".to_string());
    }

    if blueprint.stimulus.offset_magnitudes_cm.is_empty() {
        warnings
            .push("stimulus.offset_magnitudes_cm is empty - only the center is shown".to_string());
    }

    let max_offset = blueprint
        .stimulus
        .offset_magnitudes_cm
        .iter()
        .fold(0.0f64, |acc, m| acc.max(*m));
    if max_offset > blueprint.screen.width_cm / 2.0 {
        warnings.push(format!(
            "Largest offset ({} cm) exceeds half the screen width ({} cm)",
            max_offset,
            blueprint.screen.width_cm / 2.0
        ));
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Screen: {}", summary.screen_px);
            println!("  Scale: {:.2} px/cm", summary.cm_to_pixel);
            println!("  Catalog size: {}", summary.catalog_size);
            println!("  Sequences: {}", summary.sequence_count);
            println!("  Output: {}", summary.output_dir);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
