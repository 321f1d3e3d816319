use crate::error::PlanError;
use crate::graph::TaskGraph;
use crate::task::Task;

const EPSILON: f64 = 1e-6;

fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

fn invalid(message: String) -> PlanError {
    PlanError::InvalidSchedule(message)
}

pub fn validate_scheduled_task(task: &Task) -> Result<(), PlanError> {
    if !task.start_day.is_finite() || !task.end_day.is_finite() {
        return Err(invalid(format!(
            "task '{}' has non-finite day offsets ({}, {})",
            task.title, task.start_day, task.end_day
        )));
    }

    if task.start_day < -EPSILON {
        return Err(invalid(format!(
            "task '{}' starts before day 0 ({})",
            task.title, task.start_day
        )));
    }

    if task.end_day + EPSILON < task.start_day {
        return Err(invalid(format!(
            "task '{}' ends ({}) before it starts ({})",
            task.title, task.end_day, task.start_day
        )));
    }

    if !approx_equal(task.end_day - task.start_day, task.estimated_duration_days) {
        return Err(invalid(format!(
            "task '{}' window {:.4}..{:.4} does not match duration {:.4}",
            task.title, task.start_day, task.end_day, task.estimated_duration_days
        )));
    }

    Ok(())
}

/// Checks every task window and that no task starts before a dependency ends.
pub fn validate_schedule(graph: &TaskGraph) -> Result<(), PlanError> {
    let tasks = graph.tasks();
    for (idx, task) in tasks.iter().enumerate() {
        validate_scheduled_task(task)?;
        for dep_idx in graph.dependencies_of(idx) {
            let dep = &tasks[dep_idx];
            if task.start_day + EPSILON < dep.end_day {
                return Err(invalid(format!(
                    "task '{}' starts at {:.4} before dependency '{}' ends at {:.4}",
                    task.title, task.start_day, dep.title, dep.end_day
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;
    use chrono::NaiveDate;

    fn task(start_day: f64, end_day: f64, duration: f64) -> Task {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let mut task = Task::new(TaskId::new(), "T", duration, start);
        task.start_day = start_day;
        task.end_day = end_day;
        task
    }

    #[test]
    fn consistent_window_passes() {
        assert!(validate_scheduled_task(&task(1.0, 3.5, 2.5)).is_ok());
    }

    #[test]
    fn mismatched_duration_fails() {
        let err = validate_scheduled_task(&task(1.0, 3.0, 2.5)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidSchedule(_)));
    }

    #[test]
    fn reversed_window_fails() {
        assert!(validate_scheduled_task(&task(3.0, 1.0, -2.0)).is_err());
    }
}
