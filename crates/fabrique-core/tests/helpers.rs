//! Test helpers for fabrique-core integration tests.
//!
//! This module provides sample models, the profiles that register their
//! blueprints, and log capture.

#[path = "helpers/profiles.rs"]
pub mod profiles;

/// Routes factory logs to the test output. Filter with `RUST_LOG`.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}
