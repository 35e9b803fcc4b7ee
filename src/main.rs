mod app;
mod config;
mod upload;
mod utils;

use app::FileUploader;
use clap::Parser;
use config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("file_uploader=info")),
        )
        .init();

    let config = Config::parse();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([420.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "File Upload",
        options,
        Box::new(move |cc| Box::new(FileUploader::new(cc, &config))),
    )
}
