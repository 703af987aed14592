//! This binary crate runs a native viewer for the Orbweave particle sphere.
//!
//! The config is loaded from the file named by the `OW_CONFIG` environment variable (defaulting
//! to `orbweave.ron`), and setting `OW_SURFACE=debug` runs a headless loop that just logs each
//! frame instead of opening a window.

mod app;

use self::app::App;
use color_eyre::Result;
use ow_sim::{SphereConfig, SphereSim};
use ow_surface_trait::Surface;
use std::thread;
use tracing_subscriber::{filter::LevelFilter, fmt::Layer, prelude::*, EnvFilter};
use tracing_unwrap::ResultExt;

/// The config filename used when `OW_CONFIG` is unset.
const DEFAULT_CONFIG_FILENAME: &str = "config/sphere.ron";

/// Initialise a subscriber for tracing to log to `stdout`.
fn init_tracing() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(
            Layer::new()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_filter(EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into())),
        ),
    )
    .expect("Setting the global default for tracing should be okay");
}

/// Run the simulation forever without a window, displaying every frame on a
/// [`DebugSurface`](debug::DebugSurface).
fn run_headless(config: SphereConfig) -> ! {
    let mut surface = debug::DebugSurface::init();
    let mut sim = SphereSim::from_config(config);

    loop {
        let (frame, delay) = sim.next_frame();
        surface.display_frame(frame);
        thread::sleep(delay);
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let config_filename =
        std::env::var("OW_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILENAME.to_string());
    let config = SphereConfig::from_file(&config_filename);

    if std::env::var("OW_SURFACE").is_ok_and(|surface| surface == "debug") {
        run_headless(config);
    }

    let size = config.size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([size, size]),
        follow_system_theme: true,
        ..Default::default()
    };

    eframe::run_native(
        "Orbweave",
        options,
        Box::new(move |_cc| Box::new(App::new(config))),
    )
    .expect_or_log("Unable to run native eframe app");

    Ok(())
}
