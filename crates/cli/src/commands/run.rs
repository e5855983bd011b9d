//! `run` command implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::RunArgs;
use crate::session::SessionController;

/// Execute the `run` command
pub async fn run_session(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let mut blueprint = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref dir) = args.output_dir {
        info!(dir = %dir.display(), "Overriding output directory from CLI");
        blueprint.output.dir = dir.clone();
    }
    if let Some(sequences) = args.sequences {
        info!(sequences, "Overriding sequence count from CLI");
        blueprint.session.sequence_count = sequences;
    }

    info!(
        screen = format!("{}x{}", blueprint.screen.width_px, blueprint.screen.height_px),
        sequences = blueprint.session.sequence_count,
        offsets = ?blueprint.stimulus.offset_magnitudes_cm,
        output = %blueprint.output.dir.display(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&blueprint);
        return Ok(());
    }

    // Initialize Metrics (optional)
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!("Metrics endpoint available on port {}", args.metrics_port);
    }

    // A shutdown signal requests early exit rather than aborting: the
    // timeline observes the flag, stops presenting, and the partial session
    // is still exported.
    let exit_flag = Arc::new(AtomicBool::new(false));
    {
        let exit_flag = Arc::clone(&exit_flag);
        tokio::spawn(async move {
            shutdown_signal().await;
            warn!("Received shutdown signal, finishing session early...");
            exit_flag.store(true, Ordering::SeqCst);
        });
    }

    info!("Starting session...");

    let controller = SessionController::new(blueprint, args.no_prompt);
    let stats = controller
        .run(exit_flag)
        .await
        .context("Session execution failed")?;

    stats.print_summary();

    info!("Gaze session finished");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(blueprint: &contracts::SessionBlueprint) {
    println!("\n=== Configuration Summary ===\n");
    println!("Screen:");
    println!(
        "  Resolution: {}x{} px",
        blueprint.screen.width_px, blueprint.screen.height_px
    );
    println!(
        "  Physical: {}x{} cm ({:.2} px/cm)",
        blueprint.screen.width_cm,
        blueprint.screen.height_cm,
        blueprint.screen.cm_to_pixel()
    );

    println!("\nStimulus:");
    println!(
        "  Offset magnitudes: {:?} cm",
        blueprint.stimulus.offset_magnitudes_cm
    );
    println!(
        "  Display time: {}-{} s, blank interval: {} s",
        blueprint.stimulus.min_display_secs,
        blueprint.stimulus.max_display_secs,
        blueprint.stimulus.inter_stimulus_secs
    );

    println!("\nDevices:");
    println!("  Tracker: {} Hz", blueprint.tracker.device_frequency_hz);
    println!(
        "  Webcam: index {}, {} Hz",
        blueprint.webcam.cam_index, blueprint.webcam.frame_rate_hz
    );

    println!("\nSession:");
    println!("  Sequences: {}", blueprint.session.sequence_count);
    println!("  Settle delay: {} s", blueprint.session.settle_delay_secs);
    println!("  Output: {}", blueprint.output.dir.display());

    println!();
}
