mod app;
mod config;
mod data;
mod state;
mod ui;

use app::TrackerApp;
use eframe::egui;

fn main() -> eframe::Result {
    dotenvy::dotenv().ok();
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tracking BOL02",
        options,
        Box::new(|_cc| Ok(Box::new(TrackerApp::default()))),
    )
}
