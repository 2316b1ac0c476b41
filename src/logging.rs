use std::io;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// The filter used when none is given on the command line or in the environment.
const DEFAULT_FILTER: &str = "warn";

/// Install the log subscriber.  Logs go to stderr so they never mix with the console output.
pub fn init(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|error| {
            eprintln!("Ignoring bad log filter '{}': {}", directives, error);
            EnvFilter::new(DEFAULT_FILTER)
        }),

        None => EnvFilter::new(DEFAULT_FILTER),
    };

    let stderr_layer = fmt::layer()
        .compact()
        .with_target(true)
        .without_time()
        .with_writer(io::stderr)
        .with_filter(filter);

    // Keep any subscriber that is already installed.
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
