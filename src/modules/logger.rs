use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn get_log_dir(data_dir: &Path) -> Result<PathBuf, String> {
    let log_dir = data_dir.join("logs");

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)
            .map_err(|e| format!("Failed to create log directory: {}", e))?;
    }

    Ok(log_dir)
}

/// Initialize logger system
///
/// Console output always; daily rolling file output under `<data_dir>/logs`
/// when the directory can be created. Keep the returned guard alive for as
/// long as file output should be flushed.
pub fn init_logger(data_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Capture log macro logs
    let _ = tracing_log::LogTracer::init();

    let console_layer = fmt::Layer::new()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_dir = match data_dir.map(get_log_dir) {
        Some(Ok(dir)) => Some(dir),
        Some(Err(e)) => {
            eprintln!("Failed to initialize log directory: {}", e);
            None
        }
        None => None,
    };

    let Some(log_dir) = log_dir else {
        let _ = tracing_subscriber::registry()
            .with(filter_layer)
            .with(console_layer)
            .try_init();
        info!("Logger system initialized (Console)");
        return None;
    };

    let file_appender = tracing_appender::rolling::daily(log_dir, "proxy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File output layer (disable ANSI formatting)
    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // try_init so a second call (tests) does not panic
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    info!("Logger system initialized (Console + File Persistence)");
    Some(guard)
}
