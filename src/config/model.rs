// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level plan as read from a TOML file.
///
/// This is a direct mapping of the plan format:
///
/// ```toml
/// [task.design]
/// duration = 3.0
///
/// [task.build]
/// duration = 2.5
/// after = ["design"]
///
/// [task.ship]
/// duration = 1.0
/// after = ["build", ["design"]]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PlanFile {
    /// All tasks from `[task.<name>]`.
    ///
    /// Keys are the *task names* (e.g. `"design"`, `"A"`, `"step-2"`).
    #[serde(default)]
    pub task: BTreeMap<String, TaskSpec>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TaskSpec {
    /// How long the task takes, in whatever unit the plan uses
    /// consistently (days, hours, story points).
    ///
    /// If omitted, the task is scheduled with the registration floor, the
    /// same value substituted for tasks only ever named as a dependency.
    #[serde(default)]
    pub duration: Option<f64>,

    /// Predecessors: this task starts only after all of these finish.
    ///
    /// Entries may be single names or one-level groups of names
    /// (`after = ["a", ["b", "c"]]`); groups are flattened when the graph
    /// is built.
    #[serde(default)]
    pub after: Vec<DependencySpec>,
}

impl TaskSpec {
    /// All predecessor names with one level of grouping flattened out.
    pub fn flattened_after(&self) -> impl Iterator<Item = &str> {
        self.after
            .iter()
            .flat_map(|dep| match dep {
                DependencySpec::One(name) => std::slice::from_ref(name),
                DependencySpec::Many(names) => names.as_slice(),
            })
            .map(String::as_str)
    }
}

/// One entry of an `after = [...]` list: a bare name or a group of names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DependencySpec {
    One(String),
    Many(Vec<String>),
}
