// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::warn;

use crate::config::model::PlanFile;
use crate::errors::{CritpathError, Result};

/// Run semantic validation against a loaded plan.
///
/// Hard errors (the analysis could only produce garbage from these):
/// - no tasks at all
/// - negative or non-finite durations
///
/// Advisory warnings (the analyzer recovers from these by contract, but the
/// plan author probably wants to know):
/// - `after` references to tasks that are never declared — they become
///   implicit nodes with the floor duration
/// - self-dependencies and cycles — the ordering pass forces the affected
///   nodes in and their timings are advisory
pub fn validate_plan(plan: &PlanFile) -> Result<()> {
    ensure_has_tasks(plan)?;
    validate_durations(plan)?;
    warn_on_undeclared_references(plan);
    warn_on_cycles(plan);
    Ok(())
}

fn ensure_has_tasks(plan: &PlanFile) -> Result<()> {
    if plan.task.is_empty() {
        return Err(CritpathError::ConfigError(
            "plan must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_durations(plan: &PlanFile) -> Result<()> {
    for (name, spec) in plan.task.iter() {
        if let Some(duration) = spec.duration {
            if !duration.is_finite() {
                return Err(CritpathError::ConfigError(format!(
                    "task '{name}' has non-finite duration {duration}"
                )));
            }
            if duration < 0.0 {
                return Err(CritpathError::ConfigError(format!(
                    "task '{name}' has negative duration {duration}"
                )));
            }
        }
    }
    Ok(())
}

fn warn_on_undeclared_references(plan: &PlanFile) {
    for (name, spec) in plan.task.iter() {
        for dep in spec.flattened_after() {
            if !plan.task.contains_key(dep) {
                warn!(
                    task = %name,
                    dependency = %dep,
                    "dependency is not declared as a task; it will be \
                     scheduled with the floor duration"
                );
            }
        }
    }
}

/// Cycle check on the declared dependency edges.
///
/// Edge direction: dep -> task. For:
///
/// ```toml
/// [task.B]
/// after = ["A"]
/// ```
///
/// we add edge A -> B. A topological sort fails iff there is a cycle; the
/// analyzer tolerates that, so this is a warning rather than an error.
fn warn_on_cycles(plan: &PlanFile) {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in plan.task.keys() {
        graph.add_node(name.as_str());
    }

    for (name, spec) in plan.task.iter() {
        for dep in spec.flattened_after() {
            if dep == name {
                warn!(
                    task = %name,
                    "task depends on itself; the ordering pass will force it \
                     in and its timings are advisory"
                );
                continue;
            }
            graph.add_edge(dep, name.as_str(), ());
        }
    }

    if let Err(cycle) = toposort(&graph, None) {
        warn!(
            task = %cycle.node_id(),
            "cycle detected in the task plan; tasks on the cycle will be \
             forced into the order and their timings are advisory"
        );
    }
}
