use tracing_subscriber::{EnvFilter, fmt};

/// Installs the stderr subscriber. Filters come from `RUST_LOG`, defaulting to
/// `info`.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
