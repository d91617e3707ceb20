use std::path::Path;
use std::sync::Once;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "minetype.log";

static INIT: Once = Once::new();

/// Sends tracing output to `log_dir/minetype.log`, filtered by `RUST_LOG`.
///
/// Returns the writer guard on the first call; keep it alive until exit so
/// buffered lines are flushed. Later calls are no-ops.
pub fn init_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    let mut guard = None;
    INIT.call_once(|| {
        if std::fs::create_dir_all(log_dir).is_err() {
            return;
        }
        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);

        let installed = tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("minetype=info")),
            )
            .try_init()
            .is_ok();

        if installed {
            guard = Some(worker);
        }
    });
    guard
}
