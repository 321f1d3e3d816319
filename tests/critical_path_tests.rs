use chrono::NaiveDate;
use task_planner::{CriticalPathAnalyzer, PlanError, RawTask, TaskGraph, TimelineScheduler};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

fn scheduled(raw: Vec<RawTask>, total_days: f64) -> TaskGraph {
    let mut graph = TaskGraph::build(raw, start()).unwrap();
    TimelineScheduler::new(total_days, start()).schedule(&mut graph).unwrap();
    graph
}

#[test]
fn linear_chain_is_entirely_critical() {
    let graph = scheduled(
        vec![
            RawTask::new("A", 2.0),
            RawTask::new("B", 3.0).with_dependencies([0]),
            RawTask::new("C", 4.0).with_dependencies([1]),
        ],
        20.0,
    );
    let critical = CriticalPathAnalyzer::new(&graph).analyze().unwrap();
    assert_eq!(critical.length, 9.0);
    assert_eq!(critical.len(), 3);
    let ids: Vec<_> = graph.tasks().iter().map(|t| t.id).collect();
    assert_eq!(critical.chain, ids);
}

#[test]
fn shorter_branch_is_not_critical() {
    // A -> {B(5), C(1)} -> D
    let graph = scheduled(
        vec![
            RawTask::new("A", 1.0),
            RawTask::new("B", 5.0).with_dependencies([0]),
            RawTask::new("C", 1.0).with_dependencies([0]),
            RawTask::new("D", 2.0).with_dependencies([1, 2]),
        ],
        30.0,
    );
    let critical = CriticalPathAnalyzer::new(&graph).analyze().unwrap();
    let tasks = graph.tasks();
    assert!(critical.contains(tasks[0].id));
    assert!(critical.contains(tasks[1].id));
    assert!(!critical.contains(tasks[2].id));
    assert!(critical.contains(tasks[3].id));
    assert_eq!(critical.length, 8.0);
}

#[test]
fn equally_long_branches_are_all_marked() {
    // A -> {B(3), C(3)} -> D, both middle tasks lie on a longest chain
    let graph = scheduled(
        vec![
            RawTask::new("A", 1.0),
            RawTask::new("B", 3.0).with_dependencies([0]),
            RawTask::new("C", 3.0).with_dependencies([0]),
            RawTask::new("D", 1.0).with_dependencies([1, 2]),
        ],
        30.0,
    );
    let critical = CriticalPathAnalyzer::new(&graph).analyze().unwrap();
    assert_eq!(critical.len(), 4);
    // the reported chain follows the first matching dependency
    let tasks = graph.tasks();
    assert_eq!(critical.chain, vec![tasks[0].id, tasks[1].id, tasks[3].id]);
}

#[test]
fn parallel_sinks_of_equal_length_are_both_critical() {
    let graph = scheduled(vec![RawTask::new("Left", 4.0), RawTask::new("Right", 4.0)], 10.0);
    let critical = CriticalPathAnalyzer::new(&graph).analyze().unwrap();
    assert_eq!(critical.len(), 2);
    assert_eq!(critical.chain.len(), 1);
}

#[test]
fn chain_durations_sum_to_finish_day_after_compression() {
    let graph = scheduled(
        vec![
            RawTask::new("A", 3.0),
            RawTask::new("B", 6.0).with_dependencies([0]),
            RawTask::new("C", 2.0).with_dependencies([0]),
            RawTask::new("D", 5.0).with_dependencies([1, 2]),
            RawTask::new("E", 1.0),
        ],
        7.0,
    );
    let critical = CriticalPathAnalyzer::new(&graph).analyze().unwrap();
    let finish = graph.tasks().iter().map(|t| t.end_day).fold(0.0_f64, f64::max);
    let chain_total: f64 = critical
        .chain
        .iter()
        .map(|id| graph.get(*id).unwrap().estimated_duration_days)
        .sum();
    assert!((chain_total - finish).abs() < 1e-6);
    assert!((critical.length - finish).abs() < 1e-6);
    assert!(!critical.is_empty());
}

#[test]
fn cycle_is_reported_by_analyzer() {
    let graph = TaskGraph::build(
        vec![
            RawTask::new("A", 1.0).with_dependencies([1]),
            RawTask::new("B", 1.0).with_dependencies([0]),
        ],
        start(),
    )
    .unwrap();
    assert!(matches!(
        CriticalPathAnalyzer::new(&graph).analyze(),
        Err(PlanError::CyclicDependency { .. })
    ));
}
