use crate::calculations::{ForwardPass, fit_to_horizon};
use crate::error::PlanError;
use crate::graph::TaskGraph;
use crate::task_validation;
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub task_count: usize,
    /// Unscaled span before fitting to the budget.
    pub horizon: f64,
    pub scale_factor: f64,
    pub finish_day: f64,
    pub finish_date: NaiveDate,
}

impl ScheduleSummary {
    pub fn was_compressed(&self) -> bool {
        self.scale_factor < 1.0
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("tasks={}", self.task_count));
        parts.push(format!("horizon={:.2}", self.horizon));
        if self.was_compressed() {
            parts.push(format!("scale={:.3}", self.scale_factor));
        }
        parts.push(format!("finish_day={:.2}", self.finish_day));
        parts.push(format!("finish={}", self.finish_date));
        parts.join(", ")
    }
}

/// Largest day budget a plan may span (100 years). Larger budgets cannot be
/// projected day by day and may leave the calendar range.
pub const MAX_TOTAL_DAYS: f64 = 36_500.0;

/// Assigns day windows and calendar dates to every task of a graph.
#[derive(Debug, Clone, Copy)]
pub struct TimelineScheduler {
    total_days: f64,
    plan_start: NaiveDate,
}

impl TimelineScheduler {
    pub fn new(total_days: f64, plan_start: NaiveDate) -> Self {
        Self {
            total_days,
            plan_start,
        }
    }

    pub fn total_days(&self) -> f64 {
        self.total_days
    }

    pub fn plan_start(&self) -> NaiveDate {
        self.plan_start
    }

    /// Forward pass, then compression into `total_days`, then date conversion.
    ///
    /// Durations are rewritten only when the schedule had to be compressed.
    pub fn schedule(&self, graph: &mut TaskGraph) -> Result<ScheduleSummary, PlanError> {
        if !self.total_days.is_finite() || self.total_days <= 0.0 {
            return Err(PlanError::InvalidSchedule(format!(
                "total days must be a positive number (got {})",
                self.total_days
            )));
        }
        if self.total_days > MAX_TOTAL_DAYS {
            return Err(PlanError::InvalidSchedule(format!(
                "total days must not exceed {MAX_TOTAL_DAYS} (got {})",
                self.total_days
            )));
        }
        // the last budget day must have a calendar date
        self.date_for_offset(self.total_days.ceil())?;

        let mut windows = ForwardPass::new(graph).execute()?;
        let rescale = fit_to_horizon(&mut windows, self.total_days);
        let compressed = rescale.scale_factor < 1.0;

        tracing::debug!(
            horizon = rescale.horizon,
            total_days = self.total_days,
            scale = rescale.scale_factor,
            "forward pass complete"
        );

        let mut finish_day = 0.0_f64;
        for (task, window) in graph.tasks_mut().iter_mut().zip(windows) {
            task.start_day = window.start_day;
            task.end_day = window.end_day;
            if compressed {
                task.estimated_duration_days = window.duration();
            }
            task.start_date = self.date_for_offset(task.start_day.floor())?;
            task.end_date = self.date_for_offset(task.end_day.ceil())?;
            finish_day = finish_day.max(task.end_day);
        }

        task_validation::validate_schedule(graph)?;

        Ok(ScheduleSummary {
            task_count: graph.len(),
            horizon: rescale.horizon,
            scale_factor: rescale.scale_factor,
            finish_day,
            finish_date: self.date_for_offset(finish_day.ceil())?,
        })
    }

    fn date_for_offset(&self, whole_days: f64) -> Result<NaiveDate, PlanError> {
        let out_of_range = || {
            PlanError::InvalidSchedule(format!(
                "day offset {whole_days} from {} is outside the calendar range",
                self.plan_start
            ))
        };
        if !whole_days.is_finite() || !(0.0..=MAX_TOTAL_DAYS).contains(&whole_days) {
            return Err(out_of_range());
        }
        TimeDelta::try_days(whole_days as i64)
            .and_then(|delta| self.plan_start.checked_add_signed(delta))
            .ok_or_else(out_of_range)
    }
}
