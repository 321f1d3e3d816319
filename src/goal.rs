use crate::calculations::{CriticalPath, DayPlan, DayProjector};
use crate::error::PlanError;
use crate::schedule::ScheduleSummary;
use crate::stats::PlanStats;
use crate::task::{Task, TaskId, TaskStatus};
use chrono::{DateTime, NaiveDate, Utc};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled plan: the goal text, its budget and every task with its day window.
///
/// A goal is produced whole by the planner. Afterwards only task statuses change,
/// and each change yields a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub total_days: f64,
    pub due_date: Option<NaiveDate>,
    /// Calendar date of plan day 0.
    pub start_date: NaiveDate,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
    pub critical_path: CriticalPath,
    pub schedule: ScheduleSummary,
}

impl Goal {
    /// Returns a copy with the status of task `id` replaced. Nothing else changes.
    pub fn with_task_status(&self, id: TaskId, status: TaskStatus) -> Result<Goal, PlanError> {
        if self.find_task(id).is_none() {
            return Err(PlanError::TaskNotFound(id));
        }

        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    Task {
                        status,
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect();

        Ok(Goal {
            tasks,
            ..self.clone()
        })
    }

    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Looks a task up by its 1-based display number.
    pub fn task_by_number(&self, number: usize) -> Option<&Task> {
        number
            .checked_sub(1)
            .and_then(|idx| self.tasks.iter().find(|task| task.order_index == idx))
    }

    pub fn is_critical(&self, id: TaskId) -> bool {
        self.critical_path.contains(id)
    }

    pub fn finish_day(&self) -> f64 {
        self.tasks.iter().map(|t| t.end_day).fold(0.0_f64, f64::max)
    }

    /// Titles of the tasks `task` depends on, in dependency order.
    pub fn dependency_titles(&self, task: &Task) -> Vec<&str> {
        task.dependencies
            .iter()
            .filter_map(|dep| self.find_task(*dep))
            .map(|dep| dep.title.as_str())
            .collect()
    }

    pub fn day_plans(&self) -> Vec<DayPlan> {
        DayProjector::new(&self.tasks, self.total_days, self.start_date).project()
    }

    pub fn stats(&self) -> PlanStats {
        PlanStats::from_tasks(&self.tasks, &self.critical_path)
    }

    /// One row per task in input order.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut rows = self.tasks.iter();
        let Some(first) = rows.next() else {
            return Err(PolarsError::ComputeError("goal has no tasks".into()));
        };
        let mut df = first.to_dataframe_row(self.is_critical(first.id))?;
        for task in rows {
            let row = task.to_dataframe_row(self.is_critical(task.id))?;
            df = df.vstack(&row)?;
        }
        Ok(df)
    }
}
