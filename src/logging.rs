//! Logging setup: daily-rolled files under `$VOLT_LOG_DIR` (or the
//! system temp dir), filtered by `RUST_LOG` with an info default. The
//! terminal owns stdout, so nothing is ever logged there.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter};

/// Keeps the non-blocking writer alive; dropping it flushes pending
/// log lines.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub log_dir: PathBuf,
}

pub fn init() -> LoggingGuard {
    let log_dir = std::env::var_os("VOLT_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("volt").join("logs"));

    let appender = tracing_appender::rolling::daily(&log_dir, "volt.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("volt=info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    install_panic_hook();

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    LoggingGuard {
        _guard: guard,
        log_dir,
    }
}

/// Log panics before the default hook aborts the alternate screen.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic");
        default_hook(info);
    }));
}
