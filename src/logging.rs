use std::fs::OpenOptions;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

/// Install a file-backed subscriber when `SHELVE_LOG` names a path.
///
/// The TUI owns stdout, so without the variable diagnostics go nowhere.
pub fn init() {
    let Some(path) = std::env::var_os("SHELVE_LOG") else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("could not open log file {}: {}", path.to_string_lossy(), e);
            return;
        }
    };
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_filter(LevelFilter::DEBUG);
    tracing_subscriber::registry().with(file_layer).init();
}
