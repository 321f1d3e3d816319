use chrono::NaiveDate;
use task_planner::{Goal, PlanError, RawTask, TaskId, TaskPriority, TaskStatus, build_goal};

fn goal() -> Goal {
    let raw = vec![
        RawTask::new("Research", 2.0).with_priority(TaskPriority::High),
        RawTask::new("Build", 3.0).with_dependencies([0]),
        RawTask::new("Ship", 1.0).with_dependencies([1]),
    ];
    build_goal(
        "Ship the thing",
        10.0,
        None,
        NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
        raw,
    )
    .unwrap()
}

#[test]
fn status_change_touches_only_the_target_task() {
    let original = goal();
    let target = original.tasks[1].id;

    let updated = original.with_task_status(target, TaskStatus::InProgress).unwrap();

    assert_eq!(updated.tasks[1].status, TaskStatus::InProgress);
    assert_eq!(original.tasks[1].status, TaskStatus::Pending);
    for (before, after) in original.tasks.iter().zip(&updated.tasks) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.start_day, after.start_day);
        assert_eq!(before.end_day, after.end_day);
        assert_eq!(before.estimated_duration_days, after.estimated_duration_days);
        assert_eq!(before.start_date, after.start_date);
        assert_eq!(before.dependencies, after.dependencies);
        if before.id != target {
            assert_eq!(before, after);
        }
    }
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.status, original.status);
    assert_eq!(updated.critical_path, original.critical_path);
    assert_eq!(updated.schedule, original.schedule);
}

#[test]
fn unknown_task_is_reported() {
    let original = goal();
    let stranger = TaskId::new();
    assert_eq!(
        original.with_task_status(stranger, TaskStatus::Completed).unwrap_err(),
        PlanError::TaskNotFound(stranger)
    );
}

#[test]
fn stats_follow_status_changes() {
    let mut current = goal();
    assert_eq!(current.stats().progress_percent, 0.0);
    for task in current.tasks.clone() {
        current = current.with_task_status(task.id, TaskStatus::Completed).unwrap();
    }
    let stats = current.stats();
    assert_eq!(stats.completed, 3);
    assert_eq!(stats.progress_percent, 100.0);
    assert_eq!(stats.plan_length_days, 6.0);
    assert_eq!(stats.critical_tasks, 3);
}

#[test]
fn lookups_by_number_and_dependency_titles() {
    let goal = goal();
    assert_eq!(goal.task_by_number(1).unwrap().title, "Research");
    assert_eq!(goal.task_by_number(3).unwrap().title, "Ship");
    assert!(goal.task_by_number(0).is_none());
    assert!(goal.task_by_number(4).is_none());
    assert_eq!(goal.dependency_titles(&goal.tasks[2]), vec!["Build"]);
    assert_eq!(goal.finish_day(), 6.0);
}

#[test]
fn dataframe_has_one_row_per_task() {
    let goal = goal();
    let df = goal.to_dataframe().unwrap();
    assert_eq!(df.height(), 3);
    let critical = df.column("critical").unwrap().bool().unwrap();
    assert_eq!(critical.get(0), Some(true));
}
