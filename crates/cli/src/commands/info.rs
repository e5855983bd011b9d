//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    screen: ScreenInfo,
    catalog: Vec<CatalogInfo>,
    timing: TimingInfo,
    devices: DeviceInfo,
    output_dir: String,
}

#[derive(Serialize)]
struct ScreenInfo {
    width_px: u32,
    height_px: u32,
    width_cm: f64,
    height_cm: f64,
    cm_to_pixel: f64,
}

#[derive(Serialize)]
struct CatalogInfo {
    offset_cm: f64,
    offset_px: i32,
}

#[derive(Serialize)]
struct TimingInfo {
    min_display_secs: f64,
    max_display_secs: f64,
    inter_stimulus_secs: f64,
    sequence_count: u32,
    settle_delay_secs: f64,
}

#[derive(Serialize)]
struct DeviceInfo {
    tracker_frequency_hz: f64,
    webcam_index: u32,
    webcam_frame_rate_hz: f64,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&blueprint);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint);
    }

    Ok(())
}

fn build_config_info(blueprint: &contracts::SessionBlueprint) -> ConfigInfo {
    let catalog = stimulus::build_catalog(
        &blueprint.stimulus.offset_magnitudes_cm,
        blueprint.screen.cm_to_pixel(),
    );

    ConfigInfo {
        screen: ScreenInfo {
            width_px: blueprint.screen.width_px,
            height_px: blueprint.screen.height_px,
            width_cm: blueprint.screen.width_cm,
            height_cm: blueprint.screen.height_cm,
            cm_to_pixel: blueprint.screen.cm_to_pixel(),
        },
        catalog: catalog
            .iter()
            .map(|entry| CatalogInfo {
                offset_cm: entry.offset_cm,
                offset_px: entry.offset_px,
            })
            .collect(),
        timing: TimingInfo {
            min_display_secs: blueprint.stimulus.min_display_secs,
            max_display_secs: blueprint.stimulus.max_display_secs,
            inter_stimulus_secs: blueprint.stimulus.inter_stimulus_secs,
            sequence_count: blueprint.session.sequence_count,
            settle_delay_secs: blueprint.session.settle_delay_secs,
        },
        devices: DeviceInfo {
            tracker_frequency_hz: blueprint.tracker.device_frequency_hz,
            webcam_index: blueprint.webcam.cam_index,
            webcam_frame_rate_hz: blueprint.webcam.frame_rate_hz,
        },
        output_dir: blueprint.output.dir.display().to_string(),
    }
}

fn print_config_info(blueprint: &contracts::SessionBlueprint) {
    let catalog = stimulus::build_catalog(
        &blueprint.stimulus.offset_magnitudes_cm,
        blueprint.screen.cm_to_pixel(),
    );

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Gaze Session Configuration                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("🖥  Screen");
    println!(
        "   ├─ Resolution: {}x{} px",
        blueprint.screen.width_px, blueprint.screen.height_px
    );
    println!(
        "   ├─ Physical: {}x{} cm",
        blueprint.screen.width_cm, blueprint.screen.height_cm
    );
    println!("   └─ Scale: {:.2} px/cm", blueprint.screen.cm_to_pixel());

    println!("\n🎯 Stimulus Catalog ({} positions)", catalog.len());
    for (i, entry) in catalog.iter().enumerate() {
        let prefix = if i == catalog.len() - 1 {
            "└─"
        } else {
            "├─"
        };
        println!(
            "   {} {:+} cm -> {:+} px from center",
            prefix, entry.offset_cm, entry.offset_px
        );
    }

    println!("\n⏱  Timing");
    println!(
        "   ├─ Display time: {}-{} s (uniform random)",
        blueprint.stimulus.min_display_secs, blueprint.stimulus.max_display_secs
    );
    println!(
        "   ├─ Blank interval: {} s",
        blueprint.stimulus.inter_stimulus_secs
    );
    println!("   ├─ Sequences: {}", blueprint.session.sequence_count);
    println!(
        "   └─ Settle delay: {} s",
        blueprint.session.settle_delay_secs
    );

    println!("\n📷 Devices");
    println!(
        "   ├─ Tracker: {} Hz",
        blueprint.tracker.device_frequency_hz
    );
    println!(
        "   └─ Webcam: index {}, {} Hz",
        blueprint.webcam.cam_index, blueprint.webcam.frame_rate_hz
    );

    println!("\n📤 Output: {}", blueprint.output.dir.display());

    println!();
}
