//! Shared helpers for the integration tests.
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//! }
//! ```
//!
//! Log output only appears when the crate is built with `--features tracing`;
//! `RUST_LOG` (e.g. `fibheap=trace`) controls the filter.

#![allow(dead_code)]

use fibheap::fibonacci::FibonacciHeap;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a compact console subscriber. Safe to call from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .compact()
            .try_init();
    });
}

/// Panics with the violation message if the heap is structurally broken.
pub fn assert_invariants(heap: &FibonacciHeap) {
    if let Err(err) = heap.check_invariants() {
        panic!("invariant violated: {err}\nheap:\n{heap}");
    }
}
