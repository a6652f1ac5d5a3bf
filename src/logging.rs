//! Logging setup for `pm_lite`.
//!
//! Diagnostics always go to stderr so stdout stays clean for command
//! output (including `--json` mode).

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TEST_LOGGING: Once = Once::new();

/// Initialize the global tracing subscriber.
///
/// Verbosity: `-q` errors only, default warnings, `-v` info,
/// `-vv` debug, `-vvv` trace. `RUST_LOG` takes precedence when set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},pm_engine={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()?;

    Ok(())
}

/// Install a test subscriber once per process. Safe to call from
/// every test.
pub fn init_test_logging() {
    TEST_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();
    });
}
