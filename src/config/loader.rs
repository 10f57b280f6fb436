// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::PlanFile;
use crate::config::validate::validate_plan;
use crate::errors::Result;

/// Load a plan file from a given path and return the raw `PlanFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (durations, references). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<PlanFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let plan: PlanFile = toml::from_str(&contents)?;
    Ok(plan)
}

/// Load a plan file from path and run validation.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Hard-fails on plans the analysis could only mangle (no tasks, negative
///   or non-finite durations).
/// - Logs advisory warnings for undeclared references and cycles, both of
///   which the analyzer tolerates.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<PlanFile> {
    let plan = load_from_path(&path)?;
    validate_plan(&plan)?;
    Ok(plan)
}

/// Helper to resolve a default plan path.
///
/// Currently this just returns `Critpath.toml` in the current working
/// directory, but this function exists so you can later:
///
/// - Respect an env var (e.g. `CRITPATH_CONFIG`).
/// - Look for multiple default locations.
pub fn default_plan_path() -> PathBuf {
    PathBuf::from("Critpath.toml")
}
