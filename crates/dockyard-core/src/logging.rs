use tracing_subscriber::EnvFilter;

/// Default directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,dockyard=debug";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Install a fmt subscriber with an explicit filter directive.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_with_filter(directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .try_init()
        .is_ok()
}
