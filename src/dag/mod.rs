// src/dag/mod.rs

//! DAG representation and critical path analysis.
//!
//! - [`graph`] accumulates tasks, durations and dependency edges.
//! - [`analyzer`] orders the graph and runs the forward/backward timing
//!   passes.
//! - [`diagnostics`] is the reporting seam between the analyzer and the
//!   outside world.

pub mod analyzer;
pub mod diagnostics;
pub mod graph;

pub use analyzer::{Analysis, AnalyzerOptions, CriticalPathAnalyzer, SLACK_EPSILON};
pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, TracingSink};
pub use graph::{DURATION_FLOOR, Dependency, DependencyGraph, TaskName};
