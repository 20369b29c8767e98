//! Tracing setup for binaries and tests embedding the engine

use tracing_subscriber::EnvFilter;

/// Output format for [`init_tracing`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (e.g.
/// `"synapsed_authn=info"`) is used. Returns `false` when a subscriber was
/// already installed or the directive does not parse.
pub fn init_tracing(default_directive: &str, format: LogFormat) -> bool {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match EnvFilter::try_new(default_directive) {
            Ok(filter) => filter,
            Err(_) => return false,
        },
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    }
}

/// Subscriber for tests: writes through the test harness, never panics
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("synapsed_authn=debug")),
        )
        .with_test_writer()
        .try_init();
}
