//! Diagnostic tracing for the rsvp binary.
//!
//! Diagnostics go to stderr and are filtered by `RUST_LOG`. Product output
//! (submission outcomes, deadline banners) is printed to stdout by the CLI and
//! is unaffected by the filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG` env var. If unset, defaults to `rsvp=debug` when
/// `verbose` is set and `warn` otherwise.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=rsvp=debug rsvp submit answer.json
/// ```
pub fn init(verbose: bool) {
    let fallback = if verbose { "warn,rsvp=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
