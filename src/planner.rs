use crate::calculations::CriticalPathAnalyzer;
use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::goal::Goal;
use crate::graph::TaskGraph;
use crate::producer::{
    FallbackProducer, ProducerRequest, RemoteProducer, TaskProducer, produce_with_fallback,
};
use crate::schedule::{MAX_TOTAL_DAYS, TimelineScheduler};
use crate::task::{RawTask, TaskStatus};
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_TOTAL_DAYS: f64 = 14.0;

/// What the user asks for: a goal and at most one of a day budget or a due date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub goal: String,
    #[serde(default)]
    pub total_days: Option<f64>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Plan day 0; today when absent.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl PlanRequest {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            ..Self::default()
        }
    }

    pub fn with_total_days(mut self, total_days: f64) -> Self {
        self.total_days = Some(total_days);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// A due date wins over a day count: `max(1, due - start)` days. A missing or
/// unusable day count falls back to `default_total_days`. Budgets above
/// [`MAX_TOTAL_DAYS`] are capped.
pub fn resolve_total_days(
    request: &PlanRequest,
    plan_start: NaiveDate,
    default_total_days: f64,
) -> f64 {
    let days = if let Some(due) = request.due_date {
        let days = (due - plan_start).num_days();
        if days < 1 {
            tracing::warn!(
                %due,
                %plan_start,
                "due date is not after the start date, planning one day"
            );
        }
        days.max(1) as f64
    } else {
        match request.total_days {
            Some(days) if days.is_finite() && days > 0.0 => days,
            Some(days) => {
                tracing::warn!(days, default_total_days, "invalid day budget, using default");
                default_total_days
            }
            None => default_total_days,
        }
    };

    if days > MAX_TOTAL_DAYS {
        tracing::warn!(days, max = MAX_TOTAL_DAYS, "day budget too large, capping");
        return MAX_TOTAL_DAYS;
    }
    days
}

/// Builds the dependency graph, schedules it into `total_days` and analyses the
/// critical path.
pub fn build_goal(
    title: &str,
    total_days: f64,
    due_date: Option<NaiveDate>,
    plan_start: NaiveDate,
    raw_tasks: Vec<RawTask>,
) -> Result<Goal, PlanError> {
    let mut graph = TaskGraph::build(raw_tasks, plan_start)?;
    let schedule = TimelineScheduler::new(total_days, plan_start).schedule(&mut graph)?;
    let critical_path = CriticalPathAnalyzer::new(&graph).analyze()?;

    let title = title.trim();
    let title = if title.is_empty() { "Untitled goal" } else { title };

    tracing::info!(
        goal = title,
        tasks = graph.len(),
        total_days,
        critical = critical_path.len(),
        "plan generated"
    );

    Ok(Goal {
        id: Uuid::new_v4(),
        title: title.to_string(),
        total_days,
        due_date,
        start_date: plan_start,
        status: TaskStatus::Pending,
        created_at: Utc::now(),
        tasks: graph.into_tasks(),
        critical_path,
        schedule,
    })
}

/// Turns plan requests into scheduled goals.
#[derive(Debug, Clone)]
pub struct Planner {
    remote: Option<RemoteProducer>,
    fallback: FallbackProducer,
    default_total_days: f64,
}

impl Planner {
    /// Uses the configured remote producer when there is one. A remote client
    /// that cannot be built is logged and skipped.
    pub fn new(config: &PlannerConfig) -> Self {
        let remote = match RemoteProducer::from_config(&config.producer) {
            Ok(remote) => remote,
            Err(e) => {
                tracing::warn!(%e, "remote producer disabled");
                None
            }
        };
        Self {
            remote,
            fallback: FallbackProducer::new(),
            default_total_days: config.planning.default_total_days,
        }
    }

    /// Template-only planner.
    pub fn offline(default_total_days: f64) -> Self {
        Self {
            remote: None,
            fallback: FallbackProducer::new(),
            default_total_days,
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn default_total_days(&self) -> f64 {
        self.default_total_days
    }

    pub async fn generate(&self, request: &PlanRequest) -> Result<Goal, PlanError> {
        self.generate_with(self.remote.as_ref(), request).await
    }

    /// Same as [`generate`](Self::generate) with `primary` in place of the
    /// configured remote producer.
    pub async fn generate_with<P: TaskProducer>(
        &self,
        primary: Option<&P>,
        request: &PlanRequest,
    ) -> Result<Goal, PlanError> {
        let plan_start = request.start_date.unwrap_or_else(|| Local::now().date_naive());
        let total_days = resolve_total_days(request, plan_start, self.default_total_days);

        let producer_request =
            ProducerRequest::new(request.goal.trim(), total_days).with_due_date(request.due_date);
        let produced = produce_with_fallback(primary, &self.fallback, &producer_request).await;
        tracing::debug!(
            source = ?produced.source,
            tasks = produced.tasks.len(),
            "producer finished"
        );

        build_goal(&request.goal, total_days, request.due_date, plan_start, produced.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn due_date_takes_precedence() {
        let req = PlanRequest::new("x").with_total_days(3.0).with_due_date(day(20));
        assert_eq!(resolve_total_days(&req, day(6), 14.0), 14.0);
        let req = PlanRequest::new("x").with_due_date(day(9));
        assert_eq!(resolve_total_days(&req, day(6), 14.0), 3.0);
    }

    #[test]
    fn oversized_budgets_are_capped() {
        let req = PlanRequest::new("x").with_total_days(1e9);
        assert_eq!(resolve_total_days(&req, day(6), 14.0), MAX_TOTAL_DAYS);
        let far = NaiveDate::from_ymd_opt(2500, 1, 1).unwrap();
        let req = PlanRequest::new("x").with_due_date(far);
        assert_eq!(resolve_total_days(&req, day(6), 14.0), MAX_TOTAL_DAYS);
    }

    #[test]
    fn past_due_date_plans_one_day() {
        let req = PlanRequest::new("x").with_due_date(day(2));
        assert_eq!(resolve_total_days(&req, day(6), 14.0), 1.0);
    }

    #[test]
    fn invalid_budget_uses_default() {
        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let req = PlanRequest::new("x").with_total_days(bad);
            assert_eq!(resolve_total_days(&req, day(6), 14.0), 14.0);
        }
        assert_eq!(resolve_total_days(&PlanRequest::new("x"), day(6), 21.0), 21.0);
        let req = PlanRequest::new("x").with_total_days(7.5);
        assert_eq!(resolve_total_days(&req, day(6), 14.0), 7.5);
    }
}
