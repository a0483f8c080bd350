/// Logging initialization
use tracing_subscriber::EnvFilter;

/// Initialize tracing with `RUST_LOG`-based filtering.
///
/// Output goes to stderr so it does not fight the renderer for stdout.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,gltf=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
