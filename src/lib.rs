// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::PlanFile;
use crate::dag::{Analysis, CriticalPathAnalyzer, DURATION_FLOOR, DependencyGraph};
use crate::errors::Result;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - plan loading + validation
/// - graph construction
/// - critical path analysis
/// - report printing
pub fn run(args: CliArgs) -> Result<()> {
    let plan = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&plan);
        return Ok(());
    }

    let graph = DependencyGraph::from_plan(&plan);
    info!(tasks = graph.len(), "plan loaded; running critical path analysis");

    let mut analyzer = CriticalPathAnalyzer::new(&graph);
    let analysis = analyzer.analyze();

    print_report(&graph, &analysis);
    Ok(())
}

/// Simple dry-run output: print tasks, durations and dependencies.
fn print_dry_run(plan: &PlanFile) {
    println!("critpath dry-run");
    println!();

    println!("tasks ({}):", plan.task.len());
    for (name, spec) in plan.task.iter() {
        println!("  - {name}");
        match spec.duration {
            Some(duration) => println!("      duration: {duration}"),
            None => println!("      duration: (floor {DURATION_FLOOR})"),
        }
        let after: Vec<&str> = spec.flattened_after().collect();
        if !after.is_empty() {
            println!("      after: {after:?}");
        }
    }

    debug!("dry-run complete (no analysis)");
}

/// Human-readable analysis report on stdout.
fn print_report(graph: &DependencyGraph, analysis: &Analysis) {
    if analysis.is_empty() {
        println!("no analysis result (see warnings above)");
        return;
    }

    let project_duration = analysis
        .latest_finish
        .values()
        .copied()
        .fold(0.0_f64, f64::max);

    println!("tasks ({}):", graph.len());
    for name in graph.tasks() {
        let earliest_start = analysis.earliest_start.get(name).copied().unwrap_or(0.0);
        let latest_finish = analysis.latest_finish.get(name).copied().unwrap_or(0.0);
        let duration = graph.duration_of(name).unwrap_or(DURATION_FLOOR);
        let slack = latest_finish - earliest_start - duration;
        let marker = if analysis.critical_tasks.iter().any(|t| t == name) {
            "  [critical]"
        } else {
            ""
        };
        println!(
            "  - {name}: earliest start {earliest_start:.2}, \
             latest finish {latest_finish:.2}, slack {slack:.2}{marker}"
        );
    }

    println!();
    println!("project duration: {project_duration:.2}");
    println!("critical path: {}", analysis.critical_tasks.join(" -> "));
}
