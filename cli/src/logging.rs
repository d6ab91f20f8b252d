//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `flight_route_core=debug`.
pub const LOG_ENV: &str = "FLIGHT_ROUTE_LOG";

/// Install the global subscriber, writing to stderr so stdout carries only
/// the report.
///
/// `FLIGHT_ROUTE_LOG` wins when set and valid. Otherwise the default is
/// info for this workspace's crates, or warn when `quiet`. Idempotent.
pub fn init_tracing(quiet: bool) {
    INIT.call_once(|| {
        let fallback = if quiet {
            "flight_route=warn,flight_route_core=warn"
        } else {
            "flight_route=info,flight_route_core=info"
        };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}
