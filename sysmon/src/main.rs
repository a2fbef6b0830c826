mod app;
mod config;
mod error;
mod history;
mod metrics;
mod present;
mod sampler;
mod scheduler;
mod session;
mod source;
mod theme;

use crate::app::MonitorApp;
use crate::config::MonitorConfig;
use crate::source::HostSource;
use anyhow::Context;
use eframe::epi::IconData;
use std::fs;
use std::path::Path;
use tracing::Level;

fn load_icon(path: &Path) -> anyhow::Result<IconData> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Ok(IconData { width, height, rgba: image.into_raw() })
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = MonitorConfig::load();
    let mut options = eframe::NativeOptions::default();
    options.initial_window_size = Some(egui::vec2(config.window_size.0, config.window_size.1));
    match load_icon(Path::new(&config.icon_path)) {
        Ok(icon) => options.icon_data = Some(icon),
        Err(err) => tracing::warn!("no window icon: {err:#}"),
    }

    tracing::info!(
        interval = ?config.tick_interval(),
        history = config.history_capacity,
        "starting system monitor"
    );
    let app = MonitorApp::new(HostSource::new(), &config);
    eframe::run_native(Box::new(app), options);
}
