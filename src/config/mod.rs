// src/config/mod.rs

//! Plan loading and validation for critpath.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a plan file from disk (`loader.rs`).
//! - Validate durations and warn about shapes the analyzer merely
//!   tolerates (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_plan_path, load_and_validate, load_from_path};
pub use model::{DependencySpec, PlanFile, TaskSpec};
pub use validate::validate_plan;
