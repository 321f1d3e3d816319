use crate::calculations::CriticalPath;
use crate::task::{Task, TaskCategory, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate figures over a scheduled task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStats {
    pub total_tasks: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub progress_percent: f64,
    /// Every priority, including those with no tasks.
    pub by_priority: BTreeMap<TaskPriority, usize>,
    /// Only categories that occur.
    pub by_category: BTreeMap<TaskCategory, usize>,
    pub average_duration_days: f64,
    /// Largest `end_day` in the plan.
    pub plan_length_days: f64,
    pub critical_tasks: usize,
}

impl PlanStats {
    pub fn from_tasks(tasks: &[Task], critical_path: &CriticalPath) -> Self {
        let total_tasks = tasks.len();
        let count_status = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
        let completed = count_status(TaskStatus::Completed);
        let in_progress = count_status(TaskStatus::InProgress);
        let pending = count_status(TaskStatus::Pending);

        let mut by_priority: BTreeMap<TaskPriority, usize> =
            TaskPriority::ALL.into_iter().map(|p| (p, 0)).collect();
        let mut by_category: BTreeMap<TaskCategory, usize> = BTreeMap::new();
        for task in tasks {
            *by_priority.entry(task.priority).or_default() += 1;
            *by_category.entry(task.category).or_default() += 1;
        }

        let (progress_percent, average_duration_days) = if total_tasks == 0 {
            (0.0, 0.0)
        } else {
            let total_duration: f64 = tasks.iter().map(|t| t.estimated_duration_days).sum();
            (
                completed as f64 / total_tasks as f64 * 100.0,
                total_duration / total_tasks as f64,
            )
        };

        let plan_length_days = tasks.iter().map(|t| t.end_day).fold(0.0_f64, f64::max);
        let critical_tasks = tasks.iter().filter(|t| critical_path.contains(t.id)).count();

        Self {
            total_tasks,
            completed,
            in_progress,
            pending,
            progress_percent,
            by_priority,
            by_category,
            average_duration_days,
            plan_length_days,
            critical_tasks,
        }
    }
}
