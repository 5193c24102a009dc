//! Tracing for test runs.
//!
//! Quiet by default. `MAFIA_TEST_LOG=debug` turns on the engine's own
//! events while dependencies stay at `warn`. A full directive string such
//! as `mafia::services=trace,redis=info` is used as given. `RUST_LOG` is honoured when `MAFIA_TEST_LOG` is unset.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static SUBSCRIBER: OnceCell<()> = OnceCell::new();

const ENGINE_TARGETS: &[&str] = &["mafia", "session_simulator"];

/// Install the test subscriber once per process.
pub fn init() {
    SUBSCRIBER.get_or_init(|| {
        let requested = std::env::var("MAFIA_TEST_LOG")
            .ok()
            .map(|level| directives(&level))
            .or_else(|| std::env::var("RUST_LOG").ok());
        let filter = requested
            .and_then(|d| EnvFilter::try_new(d).ok())
            .unwrap_or_else(|| EnvFilter::new("warn"));

        let _ = fmt()
            .compact()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init();
    });
}

/// Expand a bare level into engine-scoped directives.
fn directives(requested: &str) -> String {
    let requested = requested.trim();
    let bare_level = matches!(
        requested.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error" | "off"
    );
    if !bare_level {
        return requested.to_string();
    }
    let mut out = String::from("warn");
    for target in ENGINE_TARGETS {
        out.push(',');
        out.push_str(target);
        out.push('=');
        out.push_str(requested);
    }
    out
}
