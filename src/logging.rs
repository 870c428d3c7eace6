//! Tracing setup for processes embedding the integration layer.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initializes the global tracing subscriber.
///
/// Respects `RUST_LOG` if set, otherwise defaults to debug-level logging for
/// this crate. Call once at process startup, before any API calls or jobs run.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "merge_valet=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
