use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default directory for the rolling log files, `~/.quokka/logs`.
pub fn log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".quokka")
        .join("logs")
}

/// Installs the global subscriber writing `<dir>/<component>.<date>`. The
/// returned guard flushes the file writer on drop, so the caller must keep it
/// alive for the process lifetime.
///
/// Never writes to stdout: the language server owns it for the protocol.
pub fn init_logging(dir: &Path, component: &str, to_stderr: bool) -> crate::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::daily(dir, component);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| crate::QuokkaError::Internal(format!("logging already initialised: {}", e)))?;

    tracing::info!(dir = %dir.display(), component, "Logging initialised");
    Ok(guard)
}
