/// Install a `tracing` subscriber printing to stdout at `level`.
///
/// Unknown level names fall back to `info`. Safe to call more than once; only the first call takes effect.
pub fn init(level: &str) {
    let lvl = match level.to_lowercase().as_str() {
        "error" => tracing::Level::ERROR,
        "warn" | "warning" => tracing::Level::WARN,
        "debug" => tracing::Level::DEBUG,
        "trace" => tracing::Level::TRACE,
        _ => tracing::Level::INFO,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(lvl)
        .with_target(false)
        .try_init();
}
