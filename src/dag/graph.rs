// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::config::model::{DependencySpec, PlanFile};

/// Task identifier used throughout the crate.
pub type TaskName = String;

/// Duration assigned to nodes that are only ever named as a dependency and
/// never registered with one of their own.
pub const DURATION_FLOOR: f64 = 0.01;

/// One dependency declaration accepted by [`DependencyGraph::register`].
///
/// A call site may name a single predecessor or a group of predecessors
/// declared together; groups are flattened one level when the edge set is
/// built. Deeper nesting is not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// A single predecessor task.
    On(TaskName),
    /// A group of predecessors declared together.
    Group(Vec<TaskName>),
}

impl Dependency {
    /// A dependency on a single predecessor.
    pub fn on(name: impl Into<TaskName>) -> Self {
        Dependency::On(name.into())
    }

    /// A dependency on a group of predecessors.
    pub fn group<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskName>,
    {
        Dependency::Group(names.into_iter().map(Into::into).collect())
    }
}

impl From<DependencySpec> for Dependency {
    fn from(spec: DependencySpec) -> Self {
        match spec {
            DependencySpec::One(name) => Dependency::On(name),
            DependencySpec::Many(names) => Dependency::Group(names),
        }
    }
}

/// In-memory dependency graph keyed by task name.
///
/// Edges point predecessor -> successor ("must finish before"). The graph
/// accumulates three views of the same edge set:
///
/// - `successors`: adjacency lists in registration order
/// - `in_degree`: number of recorded predecessor edges per task
/// - `nodes`: every name ever mentioned, as a task or as a bare dependency
///
/// All maps are ordered so iteration (and therefore analysis output) is
/// reproducible run to run.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    successors: BTreeMap<TaskName, Vec<TaskName>>,
    in_degree: BTreeMap<TaskName, usize>,
    durations: BTreeMap<TaskName, f64>,
    nodes: BTreeSet<TaskName>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a loaded [`PlanFile`].
    ///
    /// Tasks without an explicit `duration` are registered with
    /// [`DURATION_FLOOR`].
    pub fn from_plan(plan: &PlanFile) -> Self {
        let mut graph = Self::new();
        for (name, spec) in plan.task.iter() {
            let deps: Vec<Dependency> =
                spec.after.iter().cloned().map(Dependency::from).collect();
            graph.register(
                name.clone(),
                spec.duration.unwrap_or(DURATION_FLOOR),
                deps,
            );
        }
        graph
    }

    /// Register a task, its duration, and its predecessors.
    ///
    /// Registering the same task again overwrites its duration; its
    /// dependency edges are *additive* across calls. Duplicate edges between
    /// the same pair are deliberately kept: each one appends another
    /// successor entry and increments the in-degree again, and callers that
    /// re-declare an edge see the inflated count when inspecting the graph.
    ///
    /// Durations are taken at face value; validating that they are
    /// non-negative is the caller's job (the config layer does this for
    /// plans loaded from disk).
    pub fn register(
        &mut self,
        task: impl Into<TaskName>,
        duration: f64,
        dependencies: impl IntoIterator<Item = Dependency>,
    ) {
        let task = task.into();
        self.nodes.insert(task.clone());
        self.durations.insert(task.clone(), duration);

        // One-level flatten of the declared predecessors.
        let mut flat: Vec<TaskName> = Vec::new();
        for dep in dependencies {
            match dep {
                Dependency::On(name) => flat.push(name),
                Dependency::Group(names) => flat.extend(names),
            }
        }

        for dep in flat {
            self.nodes.insert(dep.clone());
            self.successors.entry(dep).or_default().push(task.clone());
            *self.in_degree.entry(task.clone()).or_insert(0) += 1;
        }

        // Roots and isolated tasks still need an in-degree entry, otherwise
        // the ordering pass would never seed them.
        self.in_degree.entry(task).or_insert(0);
    }

    /// Every name mentioned so far, as a task or as a bare dependency.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Immediate successors of a task (tasks that depend on it), in the
    /// order their edges were registered.
    pub fn successors_of(&self, name: &str) -> &[TaskName] {
        self.successors
            .get(name)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    /// The registered duration of a task, if it has one.
    pub fn duration_of(&self, name: &str) -> Option<f64> {
        self.durations.get(name).copied()
    }

    /// Recorded predecessor-edge count for a task.
    ///
    /// `None` for names only ever mentioned as a dependency; those are
    /// picked up lazily during ordering.
    pub fn in_degree_of(&self, name: &str) -> Option<usize> {
        self.in_degree.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn durations(&self) -> &BTreeMap<TaskName, f64> {
        &self.durations
    }

    pub(crate) fn in_degrees(&self) -> &BTreeMap<TaskName, usize> {
        &self.in_degree
    }
}
