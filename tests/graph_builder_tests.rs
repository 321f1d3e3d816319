use chrono::NaiveDate;
use task_planner::{PlanError, RawTask, TaskCategory, TaskGraph, TaskPriority, TaskStatus};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

#[test]
fn builds_edges_from_dependency_indices() {
    // 0 -> {1, 2}
    let raw = vec![
        RawTask::new("Plan", 1.0),
        RawTask::new("Design", 1.0).with_dependencies([0]),
        RawTask::new("Build", 1.0).with_dependencies([0]),
    ];
    let graph = TaskGraph::build(raw, start()).unwrap();

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.edge_count(), 2);
    let tasks = graph.tasks();
    assert!(tasks[1].depends_on(tasks[0].id));
    assert!(tasks[2].depends_on(tasks[0].id));
    assert_eq!(graph.dependents_of(0), vec![1, 2]);
}

#[test]
fn assigns_fresh_ids_and_initial_state() {
    let raw = vec![RawTask::new("A", 2.0), RawTask::new("B", 3.0)];
    let graph = TaskGraph::build(raw, start()).unwrap();
    let tasks = graph.tasks();

    assert_ne!(tasks[0].id, tasks[1].id);
    for (idx, task) in tasks.iter().enumerate() {
        assert_eq!(task.order_index, idx);
        assert_eq!(task.start_day, 0.0);
        assert_eq!(task.end_day, 0.0);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(graph.index_of(task.id), Some(idx));
    }
}

#[test]
fn out_of_range_indices_are_dropped() {
    let raw = vec![
        RawTask::new("A", 1.0).with_dependencies([-1, 7]),
        RawTask::new("B", 1.0).with_dependencies([0, 0, 2]),
    ];
    let graph = TaskGraph::build(raw, start()).unwrap();
    assert!(graph.tasks()[0].dependencies.is_empty());
    assert_eq!(graph.tasks()[1].dependencies, vec![graph.tasks()[0].id]);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn missing_fields_default_instead_of_failing() {
    let raw: Vec<RawTask> =
        serde_json::from_str(r#"[{}, {"title": "  Named  ", "priority": "High"}]"#).unwrap();
    let graph = TaskGraph::build(raw, start()).unwrap();
    let tasks = graph.tasks();

    assert_eq!(tasks[0].title, "Task 1");
    assert!(tasks[0].description.is_empty());
    assert_eq!(tasks[0].category, TaskCategory::Development);
    assert_eq!(tasks[0].priority, TaskPriority::Medium);
    assert_eq!(tasks[0].estimated_duration_days, 1.0);
    assert_eq!(tasks[1].title, "Named");
    assert_eq!(tasks[1].priority, TaskPriority::High);
}

#[test]
fn two_task_cycle_is_reported() {
    let raw = vec![
        RawTask::new("A", 1.0).with_dependencies([1]),
        RawTask::new("B", 1.0).with_dependencies([0]),
    ];
    let graph = TaskGraph::build(raw, start()).unwrap();
    let err = graph.topological_order().unwrap_err();
    assert!(matches!(err, PlanError::CyclicDependency { .. }));
}

#[test]
fn self_dependency_is_a_cycle() {
    let raw = vec![RawTask::new("Loop", 1.0).with_dependencies([0])];
    let graph = TaskGraph::build(raw, start()).unwrap();
    assert!(matches!(
        graph.topological_order(),
        Err(PlanError::CyclicDependency { ref title, .. }) if title == "Loop"
    ));
}
