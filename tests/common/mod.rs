// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Once;

use critpath::dag::{Dependency, DependencyGraph};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Build a graph from `(task, duration, predecessors)` rows.
pub fn graph_from_rows(rows: &[(&str, f64, &[&str])]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for (task, duration, deps) in rows {
        let deps: Vec<Dependency> = deps.iter().map(|d| Dependency::on(*d)).collect();
        graph.register(*task, *duration, deps);
    }
    graph
}

/// The six-task project used across the scenario tests:
///
/// ```text
/// A(3) -> B(2) -> D(1) -> F(3)
///   \--> C(4) --/
///         \---> E(2) ---/
/// ```
pub fn sample_project() -> DependencyGraph {
    graph_from_rows(&[
        ("A", 3.0, &[]),
        ("B", 2.0, &["A"]),
        ("C", 4.0, &["A"]),
        ("D", 1.0, &["B", "C"]),
        ("E", 2.0, &["C"]),
        ("F", 3.0, &["D", "E"]),
    ])
}

/// Assert two floats are equal up to accumulated floating-point error.
pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected {expected}, got {actual}"
    );
}
