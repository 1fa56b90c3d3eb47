pub use tracing::{debug, error, info, warn, trace, instrument};
use tracing_subscriber::prelude::*;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan, writer::MakeWriterExt}};

/// Installs the global subscriber. `RUST_LOG` wins when set; otherwise the
/// filter is `debug` for verbose runs and `info` for the rest.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let is_debug = verbose || env_filter.to_string().contains("debug");

    // Warnings and errors go to stderr, progress to stdout.
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(if is_debug {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
