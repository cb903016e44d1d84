/*!
 * Common test utilities for the lingoswitch test suite
 */

use std::sync::Arc;

use lingoswitch::status::{MemorySink, StatusHandle};

// Re-export the mock providers module
pub mod mock_providers;

/// A capture sink plus the handle to hand to the code under test
pub fn capture_status() -> (Arc<MemorySink>, StatusHandle) {
    let sink = Arc::new(MemorySink::new());
    let handle: StatusHandle = sink.clone();
    (sink, handle)
}
