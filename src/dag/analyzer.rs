// src/dag/analyzer.rs

//! Critical path analysis over a [`DependencyGraph`].
//!
//! The analysis runs in fixed steps: complete missing durations, build a
//! cycle-tolerant topological order (Kahn's algorithm plus a residual
//! fallback), sweep forward for earliest times, sweep backward for latest
//! times, then extract the zero-slack task set.
//!
//! `analyze()` never fails. Recoverable conditions degrade the result and
//! are reported through the [`DiagnosticSink`]; anything unexpected is
//! caught at the top of `analyze()` and collapsed to an empty result with a
//! [`Diagnostic::Fault`].

use std::collections::{BTreeMap, HashMap, VecDeque};

use anyhow::{Result, anyhow};
use tracing::debug;

use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use super::graph::{DependencyGraph, TaskName};

/// Slack threshold under which a task counts as critical.
///
/// Comparing against a small epsilon rather than exactly zero absorbs
/// floating-point error accumulated across the passes.
pub const SLACK_EPSILON: f64 = 0.01;

/// Tunables for the analysis passes.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerOptions {
    /// Duration substituted for nodes that were never registered with one.
    pub duration_floor: f64,
    /// `|latest_start - earliest_start|` below this marks a task critical.
    pub slack_epsilon: f64,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            duration_floor: super::graph::DURATION_FLOOR,
            slack_epsilon: SLACK_EPSILON,
        }
    }
}

/// Result of one analysis run.
///
/// `critical_tasks` is ordered by the topological order used for the
/// passes. The two timing maps cover every node of the graph, including
/// nodes that were only ever named as a dependency.
///
/// An empty value is returned for an empty graph and whenever the analysis
/// hits an internal fault; the sink receives the reason in both cases.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Analysis {
    /// Tasks with (near) zero slack: delaying any of them delays the
    /// project.
    pub critical_tasks: Vec<TaskName>,
    /// Earliest possible start time per task.
    pub earliest_start: HashMap<TaskName, f64>,
    /// Latest allowable finish time per task.
    pub latest_finish: HashMap<TaskName, f64>,
}

impl Analysis {
    /// The terminal "nothing computed" value.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.critical_tasks.is_empty()
            && self.earliest_start.is_empty()
            && self.latest_finish.is_empty()
    }
}

/// Runs the critical path method over a borrowed [`DependencyGraph`].
///
/// The graph is never mutated; the ordering pass works on its own copy of
/// the in-degree counts. Analyzing the same graph twice yields identical
/// results.
pub struct CriticalPathAnalyzer<'g, S = TracingSink> {
    graph: &'g DependencyGraph,
    sink: S,
    options: AnalyzerOptions,
}

impl<'g> CriticalPathAnalyzer<'g, TracingSink> {
    /// Analyzer with the default tracing-backed diagnostics.
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self::with_sink(graph, TracingSink)
    }
}

impl<'g, S: DiagnosticSink> CriticalPathAnalyzer<'g, S> {
    /// Analyzer reporting into the given sink.
    pub fn with_sink(graph: &'g DependencyGraph, sink: S) -> Self {
        Self {
            graph,
            sink,
            options: AnalyzerOptions::default(),
        }
    }

    /// Override the default floor/epsilon tunables.
    pub fn with_options(mut self, options: AnalyzerOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the full analysis.
    ///
    /// Never fails: an empty graph and any internal fault both degrade to
    /// [`Analysis::empty`], with the reason reported to the sink.
    pub fn analyze(&mut self) -> Analysis {
        if self.graph.is_empty() {
            self.sink.report(Diagnostic::EmptyGraph);
            return Analysis::empty();
        }

        match self.run_passes() {
            Ok(analysis) => analysis,
            Err(err) => {
                self.sink.report(Diagnostic::Fault {
                    message: format!("{err:#}"),
                });
                Analysis::empty()
            }
        }
    }

    fn run_passes(&mut self) -> Result<Analysis> {
        let durations = self.complete_durations();
        let order = self.topological_order();
        debug!(nodes = order.len(), "topological order established");

        let (earliest_start, earliest_finish) = self.forward_pass(&order, &durations)?;
        let (latest_start, latest_finish) =
            self.backward_pass(&order, &durations, &earliest_finish)?;
        let critical_tasks = self.collect_critical(&order, &earliest_start, &latest_start);
        debug!(
            critical = critical_tasks.len(),
            total = order.len(),
            "critical task set extracted"
        );

        Ok(Analysis {
            critical_tasks,
            earliest_start,
            latest_finish,
        })
    }

    /// Ensure every node of the universe has a duration, substituting the
    /// floor for nodes that were only ever named as a dependency.
    fn complete_durations(&mut self) -> BTreeMap<TaskName, f64> {
        let mut durations = self.graph.durations().clone();
        for node in self.graph.tasks() {
            if !durations.contains_key(node) {
                self.sink.report(Diagnostic::MissingDuration {
                    task: node.to_string(),
                });
                durations.insert(node.to_string(), self.options.duration_floor);
            }
        }
        durations
    }

    /// Kahn's algorithm over a working copy of the in-degree counts.
    ///
    /// The queue is seeded from recorded in-degree entries only; a node
    /// that was never explicitly registered has no entry and is unreachable
    /// this way. If the order comes up short (such a node, or a cycle), the
    /// residual nodes are forced in at the end, in graph iteration order,
    /// and the condition is reported. Timings for forced nodes are
    /// advisory.
    fn topological_order(&mut self) -> Vec<TaskName> {
        let mut in_degree = self.graph.in_degrees().clone();
        let mut queue: VecDeque<TaskName> = in_degree
            .iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(name, _)| name.clone())
            .collect();

        let mut order: Vec<TaskName> = Vec::with_capacity(self.graph.len());
        while let Some(node) = queue.pop_front() {
            for succ in self.graph.successors_of(&node) {
                if let Some(degree) = in_degree.get_mut(succ) {
                    if *degree > 0 {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(succ.clone());
                        }
                    }
                }
            }
            order.push(node);
        }

        if order.len() < self.graph.len() {
            let residual: Vec<TaskName> = self
                .graph
                .tasks()
                .filter(|name| !order.iter().any(|seen| seen == name))
                .map(str::to_string)
                .collect();
            self.sink.report(Diagnostic::IncompleteOrder {
                residual: residual.clone(),
            });
            order.extend(residual);
        }

        order
    }

    /// Forward sweep: longest-path arrival time at each node.
    fn forward_pass(
        &self,
        order: &[TaskName],
        durations: &BTreeMap<TaskName, f64>,
    ) -> Result<(HashMap<TaskName, f64>, HashMap<TaskName, f64>)> {
        let mut earliest_start: HashMap<TaskName, f64> = self
            .graph
            .tasks()
            .map(|name| (name.to_string(), 0.0))
            .collect();
        let mut earliest_finish = earliest_start.clone();

        for task in order {
            let duration = duration_of(durations, task)?;
            let start = earliest_start.get(task).copied().unwrap_or(0.0);
            let finish = start + duration;
            earliest_finish.insert(task.clone(), finish);

            for succ in self.graph.successors_of(task) {
                let entry = earliest_start.entry(succ.clone()).or_insert(0.0);
                if finish > *entry {
                    *entry = finish;
                }
            }
        }

        Ok((earliest_start, earliest_finish))
    }

    /// Backward sweep: latest allowable times, bounded by the project's
    /// overall completion time.
    fn backward_pass(
        &self,
        order: &[TaskName],
        durations: &BTreeMap<TaskName, f64>,
        earliest_finish: &HashMap<TaskName, f64>,
    ) -> Result<(HashMap<TaskName, f64>, HashMap<TaskName, f64>)> {
        let max_finish = earliest_finish
            .values()
            .copied()
            .reduce(f64::max)
            .ok_or_else(|| anyhow!("no earliest finish times to derive the project span from"))?;

        // Baseline: every task ends at the project boundary.
        let mut latest_finish: HashMap<TaskName, f64> = HashMap::new();
        let mut latest_start: HashMap<TaskName, f64> = HashMap::new();
        for node in self.graph.tasks() {
            latest_finish.insert(node.to_string(), max_finish);
            latest_start.insert(node.to_string(), max_finish - duration_of(durations, node)?);
        }

        // Reverse order, so every successor's latest start is final before
        // its predecessors are processed.
        for task in order.iter().rev() {
            let successors = self.graph.successors_of(task);
            let finish = if successors.is_empty() {
                max_finish
            } else {
                let mut min_successor_start = f64::INFINITY;
                for succ in successors {
                    let start = latest_start.get(succ).copied().ok_or_else(|| {
                        anyhow!("latest start missing for successor '{succ}' of '{task}'")
                    })?;
                    min_successor_start = min_successor_start.min(start);
                }
                min_successor_start
            };

            latest_finish.insert(task.clone(), finish);
            latest_start.insert(task.clone(), finish - duration_of(durations, task)?);
        }

        Ok((latest_start, latest_finish))
    }

    /// A task is critical when its slack is (near) zero.
    fn collect_critical(
        &self,
        order: &[TaskName],
        earliest_start: &HashMap<TaskName, f64>,
        latest_start: &HashMap<TaskName, f64>,
    ) -> Vec<TaskName> {
        order
            .iter()
            .filter(|task| {
                match (latest_start.get(*task), earliest_start.get(*task)) {
                    (Some(ls), Some(es)) => (ls - es).abs() < self.options.slack_epsilon,
                    _ => false,
                }
            })
            .cloned()
            .collect()
    }
}

fn duration_of(durations: &BTreeMap<TaskName, f64>, task: &str) -> Result<f64> {
    durations
        .get(task)
        .copied()
        .ok_or_else(|| anyhow!("duration missing for task '{task}' after completion step"))
}
