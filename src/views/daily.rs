use crate::calculations::DayPlan;
use crate::goal::Goal;
use std::fmt::Write;

pub fn render_day(plan: &DayPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Day {} ({}) - {} [workload {}]",
        plan.day_number + 1,
        plan.date.format("%a %Y-%m-%d"),
        plan.workload_level.as_str(),
        plan.workload
    );
    if plan.tasks.is_empty() {
        out.push_str("  no scheduled tasks\n");
    }
    for task in &plan.tasks {
        let tag = if task.is_start {
            "start"
        } else if task.is_end {
            "finish"
        } else {
            "ongoing"
        };
        let _ = writeln!(
            out,
            "  [{tag:>7}] {} ({}, {}) {:.0}%",
            task.title, task.category, task.priority, task.progress
        );
    }
    for milestone in &plan.milestones {
        let _ = writeln!(out, "  > {milestone}");
    }
    out
}

/// Day-by-day listing for the whole budget.
pub fn render_days(goal: &Goal) -> String {
    goal.day_plans()
        .iter()
        .map(render_day)
        .collect::<Vec<_>>()
        .join("\n")
}
