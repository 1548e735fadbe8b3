pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod favorites;
pub mod history;
pub mod models;
pub mod navigation;
pub mod search;
pub mod storage;

use eframe::egui;

pub use app::PinboardApp;
pub use config::PinboardConfig;

/// Launches the egui application with default window options.
pub fn run_frontend(config: PinboardConfig) -> Result<(), eframe::Error> {
    run_frontend_with_options(config, default_native_options())
}

/// Launches the egui app with caller-provided options.
pub fn run_frontend_with_options(
    config: PinboardConfig,
    options: eframe::NativeOptions,
) -> Result<(), eframe::Error> {
    let _ = env_logger::builder().is_test(false).try_init();
    eframe::run_native(
        "Pinboard",
        options,
        Box::new(move |cc| Ok(Box::new(PinboardApp::new(cc, config)?))),
    )
}

fn default_native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    }
}
