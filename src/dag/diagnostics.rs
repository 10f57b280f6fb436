// src/dag/diagnostics.rs

//! Diagnostic reporting seam for the analyzer.
//!
//! The analyzer never prints; every recoverable condition it hits is handed
//! to a [`DiagnosticSink`]. Production code uses [`TracingSink`], which
//! forwards to `tracing`; tests can inject [`RecordingSink`] and assert on
//! what was reported.

use tracing::{error, warn};

use super::graph::TaskName;

/// Recoverable conditions surfaced during analysis.
///
/// None of these abort the analysis; they describe how the result was
/// degraded (or, for [`Diagnostic::Fault`], why it collapsed to empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The graph has no nodes; analysis returned an empty result.
    EmptyGraph,
    /// A node was only ever named as a dependency and never registered with
    /// a duration; the floor value was substituted.
    MissingDuration { task: TaskName },
    /// The ordering pass did not reach these nodes (a cycle, or a node with
    /// no recorded in-degree entry). They were forced into the order; timing
    /// values touching them are advisory.
    IncompleteOrder { residual: Vec<TaskName> },
    /// An internal error aborted the passes; the result was collapsed to
    /// empty rather than propagated.
    Fault { message: String },
}

/// Where the analyzer reports recoverable conditions.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Production sink: forwards every diagnostic to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic {
            Diagnostic::EmptyGraph => {
                warn!("critical path analysis: graph has no nodes");
            }
            Diagnostic::MissingDuration { task } => {
                warn!(
                    task = %task,
                    "no duration registered for task; substituting the floor value"
                );
            }
            Diagnostic::IncompleteOrder { residual } => {
                warn!(
                    ?residual,
                    "topological order did not cover every node (cycle suspected); \
                     forcing residual nodes in, their timings are advisory"
                );
            }
            Diagnostic::Fault { message } => {
                error!(%message, "critical path analysis failed; returning empty result");
            }
        }
    }
}

/// Test sink: records everything it is handed.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub reported: Vec<Diagnostic>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any recorded diagnostic matches the predicate.
    pub fn any(&self, pred: impl Fn(&Diagnostic) -> bool) -> bool {
        self.reported.iter().any(pred)
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported.push(diagnostic);
    }
}
