//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! settlement test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built pots for the common scenarios
//! - `builders`: Builder for pot snapshots
//! - `assertions`: Assertion helpers for balances and suggestions
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;

use tracing_subscriber::EnvFilter;

/// Installs a test-friendly tracing subscriber once per test binary
///
/// Honors `RUST_LOG`; defaults to `warn` so zero-sum and dangling-reference
/// warnings show up in failing test output.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
