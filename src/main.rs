//! Passdown Visualizer - Main Entry Point
//!
//! Desktop dashboard for the daily IV repeatability check and passdown
//! workbook downloads.

use passdown_vis::{
    backend::DashboardBackend,
    config::{log_dir, AppConfig, AppState},
    frontend::DashboardApp,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file prefix inside the log directory
const LOG_FILE_PREFIX: &str = "passdown-vis.log";

fn main() -> eframe::Result<()> {
    // Initialize logging: console plus a daily rolling file when the data dir is known
    let (file_layer, _log_guard) = match log_dir() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,passdown_vis=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    tracing::info!("Starting Passdown Visualizer");

    let config = AppConfig::load_or_default().with_env_overrides();
    let app_state = AppState::load_or_default();
    tracing::info!("Backend API at {}", config.api.base_url);

    let (backend, frontend) = match DashboardBackend::new(config.clone()) {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!("Failed to create backend: {}", e);
            std::process::exit(1);
        }
    };
    let stop_handle = backend.stop_handle();

    let backend_handle = std::thread::Builder::new()
        .name("passdown-backend".to_string())
        .spawn(move || backend.run());
    let backend_handle = match backend_handle {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("Failed to spawn backend thread: {}", e);
            std::process::exit(1);
        }
    };

    // Configure eframe options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Passdown Visualizer"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Passdown Visualizer",
        native_options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, frontend, config, app_state)))),
    );

    // Signal backend to stop and wait for it
    tracing::info!("Shutting down...");
    stop_handle.store(false, std::sync::atomic::Ordering::SeqCst);
    if backend_handle.join().is_err() {
        tracing::warn!("Backend thread panicked");
    }

    result
}
