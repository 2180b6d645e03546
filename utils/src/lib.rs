use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, prelude::*};

const LOG_DIR: &str = "./logs";
const LOG_FILE_PREFIX: &str = "option_orders.log";

/// Installs the global subscriber: console layer on stderr plus a daily rolling file.
///
/// Filtering follows `RUST_LOG`; when it is unset only errors are emitted.
/// Keep the returned guard alive until the process exits, dropping it flushes the file writer.
pub fn init_tracing() -> WorkerGuard {
    let file_appender = rolling::daily(LOG_DIR, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // stdout 留给报表本身
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // 文件里不要 ANSI 控制字符
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}
