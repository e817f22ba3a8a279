use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "noteroll=info,noteroll_listener=info";

/// Install the global subscriber. Logs go to stderr so stdout only carries
/// program output. `RUST_LOG` replaces the default filter.
pub fn setup() {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::builder().parse_lossy(directives))
        .init();
}
