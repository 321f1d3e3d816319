use crate::task::{Task, TaskCategory, TaskId, TaskPriority};
use crate::schedule::MAX_TOTAL_DAYS;
use chrono::{Days, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadLevel {
    Free,
    Light,
    Moderate,
    Heavy,
}

impl WorkloadLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => WorkloadLevel::Free,
            1..=4 => WorkloadLevel::Light,
            5..=7 => WorkloadLevel::Moderate,
            _ => WorkloadLevel::Heavy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadLevel::Free => "Free",
            WorkloadLevel::Light => "Light",
            WorkloadLevel::Moderate => "Moderate",
            WorkloadLevel::Heavy => "Heavy",
        }
    }
}

/// A task as seen on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTask {
    pub task_id: TaskId,
    pub title: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub is_start: bool,
    pub is_end: bool,
    pub is_continuing: bool,
    /// Share of the task elapsed at the start of this day, 0..=100.
    pub progress: f64,
}

impl DayTask {
    fn sort_rank(&self) -> u8 {
        if self.is_start {
            0
        } else if self.is_end {
            2
        } else {
            1
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day_number: u32,
    pub date: NaiveDate,
    pub tasks: Vec<DayTask>,
    pub milestones: Vec<String>,
    pub workload: u32,
    pub workload_level: WorkloadLevel,
}

/// Expands a scheduled task list into per-day occupancy for days `0..=ceil(total_days)`.
pub struct DayProjector<'a> {
    tasks: &'a [Task],
    total_days: f64,
    start_date: NaiveDate,
}

impl<'a> DayProjector<'a> {
    pub fn new(tasks: &'a [Task], total_days: f64, start_date: NaiveDate) -> Self {
        Self {
            tasks,
            total_days,
            start_date,
        }
    }

    /// Last projected day number, never beyond [`MAX_TOTAL_DAYS`].
    pub fn last_day(&self) -> u32 {
        if self.total_days.is_finite() && self.total_days > 0.0 {
            self.total_days.min(MAX_TOTAL_DAYS).ceil() as u32
        } else {
            0
        }
    }

    pub fn project(&self) -> Vec<DayPlan> {
        (0..=self.last_day())
            .into_par_iter()
            .map(|day| self.project_day(day))
            .collect()
    }

    pub fn project_day(&self, day: u32) -> DayPlan {
        let d = f64::from(day);
        let mut day_tasks = Vec::new();
        let mut milestones = Vec::new();
        let mut workload = 0;

        for task in self.tasks {
            let first_day = task.start_day.floor();
            let last_day = task.end_day.ceil();
            if d < first_day || d > last_day {
                continue;
            }

            let is_start = d == first_day;
            let is_end = d == last_day;
            let duration = task.end_day - task.start_day;
            let progress = if duration <= 0.0 {
                100.0
            } else {
                ((d - task.start_day) / duration * 100.0).clamp(0.0, 100.0)
            };

            workload += task.priority.weight();
            if is_end {
                milestones.push(format!("Complete: {}", task.title));
            }
            if is_start && task.priority == TaskPriority::High {
                milestones.push(format!("Start: {}", task.title));
            }

            day_tasks.push(DayTask {
                task_id: task.id,
                title: task.title.clone(),
                category: task.category,
                priority: task.priority,
                is_start,
                is_end,
                is_continuing: !is_start && !is_end,
                progress,
            });
        }

        // starting first, ending last; sort_by_key is stable
        day_tasks.sort_by_key(DayTask::sort_rank);

        DayPlan {
            day_number: day,
            date: self
                .start_date
                .checked_add_days(Days::new(u64::from(day)))
                .unwrap_or(NaiveDate::MAX),
            tasks: day_tasks,
            milestones,
            workload,
            workload_level: WorkloadLevel::from_score(workload),
        }
    }
}
