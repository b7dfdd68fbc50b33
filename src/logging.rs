//! Tracing setup for the `billplan` binary
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary (and to tests that want to see the output).

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Directive applied when `RUST_LOG` does not mention the planner
pub const DEFAULT_DIRECTIVE: &str = "bill_planner=warn";

/// Install the global subscriber once; later calls are no-ops
///
/// `RUST_LOG` overrides the default filter. With `verbose` set the planner's
/// own events are shown down to `debug`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let directive = if verbose { "bill_planner=debug" } else { DEFAULT_DIRECTIVE };
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new(directive),
        };

        // Logs go to stderr so command output stays pipeable.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
