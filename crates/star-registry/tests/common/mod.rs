//! Shared setup for ledger integration tests.

#![allow(dead_code)]

use std::sync::Once;

static TRACING: Once = Once::new();

/// Route ledger logs through the test harness's captured output.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}
