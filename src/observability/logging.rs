use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging for a single pipeline run.
pub fn init_logging() {
    // Respect RUST_LOG if set; otherwise default to verbose for our crate
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog_lake=debug,info"));

    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}
