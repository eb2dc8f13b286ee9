//! Tracing initialization shared by all tool mains.

use tracing_subscriber::EnvFilter;

/// Initialize a plain `fmt` subscriber at `info` level.
///
/// Every CQLog binary calls this first thing in `main`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("info"))
        .init();
}
