//! Mutfak - kitchen minigame prototype
//!
//! Runs a scripted, headless kitchen session: the camera turns, then the
//! sucuk is sliced until nothing is left.

mod kitchen;
mod settings;

use std::env;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use kitchen::Kitchen;
use settings::KitchenSettings;

fn main() -> Result<()> {
    // RUST_LOG wins; default to info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if env::args().any(|arg| arg == "--write-default-settings") {
        return KitchenSettings::default()
            .save()
            .context("Failed to write default settings");
    }

    info!("Starting Mutfak kitchen session...");
    let settings = KitchenSettings::load();

    let mut kitchen = Kitchen::build(&settings)?;
    let summary = kitchen.run(&settings.session)?;

    info!(
        "Session done in {} frames ({:.2}s): {} cuts, {} slices on the plate, camera at {:.1} degrees",
        summary.frames,
        summary.seconds,
        summary.cuts,
        summary.slices_on_plate,
        summary.camera_yaw
    );
    Ok(())
}
