// tests/analysis_scenarios.rs

mod common;

use common::{assert_close, graph_from_rows, sample_project};
use critpath::dag::{
    CriticalPathAnalyzer, Dependency, DependencyGraph, Diagnostic, RecordingSink,
};

#[test]
fn linear_chain_is_fully_critical() {
    common::init_tracing();

    let graph = graph_from_rows(&[
        ("A", 3.0, &[]),
        ("B", 2.0, &["A"]),
        ("C", 4.0, &["B"]),
    ]);

    let mut analyzer = CriticalPathAnalyzer::new(&graph);
    let analysis = analyzer.analyze();

    // No fan-out: the whole chain is the critical path and the project
    // takes exactly the sum of durations.
    assert_eq!(analysis.critical_tasks, vec!["A", "B", "C"]);
    assert_close(analysis.earliest_start["A"], 0.0, "earliest start of A");
    assert_close(analysis.earliest_start["B"], 3.0, "earliest start of B");
    assert_close(analysis.earliest_start["C"], 5.0, "earliest start of C");
    assert_close(analysis.latest_finish["C"], 9.0, "latest finish of C");
}

#[test]
fn diamond_puts_slack_on_the_short_branch() {
    common::init_tracing();

    let graph = graph_from_rows(&[
        ("A", 3.0, &[]),
        ("B", 2.0, &["A"]),
        ("C", 4.0, &["A"]),
        ("D", 1.0, &["B", "C"]),
    ]);

    let mut analyzer = CriticalPathAnalyzer::new(&graph);
    let analysis = analyzer.analyze();

    // D starts when the slower branch (C) finishes.
    assert_close(analysis.earliest_start["D"], 7.0, "earliest start of D");
    assert_close(analysis.latest_finish["D"], 8.0, "latest finish of D");

    // B may finish as late as D's latest start; its two units of slack keep
    // it off the critical path.
    assert_close(analysis.latest_finish["B"], 7.0, "latest finish of B");
    assert_eq!(analysis.critical_tasks, vec!["A", "C", "D"]);
}

#[test]
fn six_task_project_timing_tables() {
    common::init_tracing();

    let graph = sample_project();
    let mut analyzer = CriticalPathAnalyzer::new(&graph);
    let analysis = analyzer.analyze();

    // Longest root-to-sink path: A -> C -> E -> F (3 + 4 + 2 + 3 = 12).
    // D's branch through B or C tops out at 8 before F, giving D one unit
    // of slack.
    assert_eq!(analysis.critical_tasks, vec!["A", "C", "E", "F"]);

    let expected_earliest_start =
        [("A", 0.0), ("B", 3.0), ("C", 3.0), ("D", 7.0), ("E", 7.0), ("F", 9.0)];
    for (task, expected) in expected_earliest_start {
        assert_close(
            analysis.earliest_start[task],
            expected,
            &format!("earliest start of {task}"),
        );
    }

    let expected_latest_finish =
        [("A", 3.0), ("B", 8.0), ("C", 7.0), ("D", 9.0), ("E", 9.0), ("F", 12.0)];
    for (task, expected) in expected_latest_finish {
        assert_close(
            analysis.latest_finish[task],
            expected,
            &format!("latest finish of {task}"),
        );
    }
}

#[test]
fn analyze_twice_returns_identical_results() {
    common::init_tracing();

    let graph = sample_project();
    let mut analyzer = CriticalPathAnalyzer::new(&graph);

    let first = analyzer.analyze();
    let second = analyzer.analyze();

    assert_eq!(first, second);
}

#[test]
fn empty_graph_returns_empty_result() {
    common::init_tracing();

    let graph = DependencyGraph::new();
    let mut sink = RecordingSink::new();
    let mut analyzer = CriticalPathAnalyzer::with_sink(&graph, &mut sink);

    let analysis = analyzer.analyze();

    assert!(analysis.is_empty());
    assert!(analysis.critical_tasks.is_empty());
    assert!(analysis.earliest_start.is_empty());
    assert!(analysis.latest_finish.is_empty());
    assert_eq!(sink.reported, vec![Diagnostic::EmptyGraph]);
}

#[test]
fn bare_dependency_reference_gets_floor_duration() {
    common::init_tracing();

    // "design" is only ever named as a predecessor, never registered.
    let mut graph = DependencyGraph::new();
    graph.register("build", 2.0, [Dependency::on("design")]);

    let mut sink = RecordingSink::new();
    let mut analyzer = CriticalPathAnalyzer::with_sink(&graph, &mut sink);
    let analysis = analyzer.analyze();

    // The bare reference shows up in both timing tables.
    assert!(analysis.earliest_start.contains_key("design"));
    assert!(analysis.latest_finish.contains_key("design"));
    assert_eq!(analysis.earliest_start.len(), 2);
    assert_eq!(analysis.latest_finish.len(), 2);

    // It was given the floor duration, and (having no in-degree entry) it
    // reached the order via the residual sweep.
    assert!(sink.any(|d| matches!(
        d,
        Diagnostic::MissingDuration { task } if task == "design"
    )));
    assert!(sink.any(|d| matches!(d, Diagnostic::IncompleteOrder { .. })));
}

#[test]
fn group_dependencies_are_flattened_one_level() {
    common::init_tracing();

    let mut graph = DependencyGraph::new();
    graph.register("a", 1.0, []);
    graph.register("b", 1.0, []);
    graph.register("c", 1.0, []);
    graph.register(
        "d",
        1.0,
        [Dependency::group(["a", "b"]), Dependency::on("c")],
    );

    assert_eq!(graph.in_degree_of("d"), Some(3));
    assert_eq!(graph.successors_of("a"), &["d"]);
    assert_eq!(graph.successors_of("b"), &["d"]);
    assert_eq!(graph.successors_of("c"), &["d"]);

    let mut analyzer = CriticalPathAnalyzer::new(&graph);
    let analysis = analyzer.analyze();
    assert_close(analysis.earliest_start["d"], 1.0, "earliest start of d");
}

// Re-declaring an edge is additive: the in-degree count inflates and the
// successor list holds the pair twice. Kahn's decrements stay balanced
// because both views record the duplicate, so timings are unaffected, but
// the inflated count is observable. This is long-standing behaviour that
// callers may depend on; it is documented rather than corrected.
#[test]
fn duplicate_edges_are_not_deduplicated() {
    common::init_tracing();

    let mut graph = DependencyGraph::new();
    graph.register("A", 3.0, []);
    graph.register("B", 2.0, [Dependency::on("A")]);
    graph.register("B", 2.0, [Dependency::on("A")]);

    assert_eq!(graph.in_degree_of("B"), Some(2));
    assert_eq!(graph.successors_of("A"), &["B", "B"]);

    let mut sink = RecordingSink::new();
    let mut analyzer = CriticalPathAnalyzer::with_sink(&graph, &mut sink);
    let analysis = analyzer.analyze();

    // Both decrements land, so B is still ordered normally.
    assert!(sink.reported.is_empty());
    assert_close(analysis.earliest_start["B"], 3.0, "earliest start of B");
    assert_close(analysis.latest_finish["B"], 5.0, "latest finish of B");
    assert_eq!(analysis.critical_tasks, vec!["A", "B"]);
}

#[test]
fn re_registration_overwrites_duration() {
    common::init_tracing();

    let mut graph = DependencyGraph::new();
    graph.register("A", 3.0, []);
    graph.register("A", 5.0, []);
    graph.register("B", 1.0, [Dependency::on("A")]);

    assert_eq!(graph.duration_of("A"), Some(5.0));

    let mut analyzer = CriticalPathAnalyzer::new(&graph);
    let analysis = analyzer.analyze();
    assert_close(analysis.earliest_start["B"], 5.0, "earliest start of B");
}
