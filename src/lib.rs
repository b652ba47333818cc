pub mod jsonrpc;
pub mod pages;
pub mod report;
pub mod router;
pub mod secrets;
pub mod sentiment;
pub mod server;
pub mod text;
pub mod twitter;
pub mod types;

use tracing_subscriber::EnvFilter;

/// Initialize structured logging with tracing.
/// Respects RUST_LOG env var; defaults to `info` level for tweetwatch crate.
/// Logs go to stderr: stdout is the dashboard protocol channel.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tweetwatch=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
