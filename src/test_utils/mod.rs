//! Test utilities for sharegen.
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests.
//!
//! - [`TestEnvironment`]: a temporary project with a share root next to it
//! - [`ConfigFixture`]: ready-made `sharegen.toml` contents
//! - [`init_test_logging`]: one-time tracing setup

pub mod environment;
pub mod fixtures;

pub use environment::TestEnvironment;
pub use fixtures::ConfigFixture;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, tests run without a subscriber.
///
/// ```rust,no_run
/// use tracing::Level;
///
/// sharegen_cli::test_utils::init_test_logging(Some(Level::DEBUG));
/// ```
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
