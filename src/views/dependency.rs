use super::format_days;
use crate::goal::Goal;
use crate::task::Task;
use std::collections::BTreeMap;
use std::fmt::Write;

const PHASE_LENGTH_DAYS: f64 = 5.0;

/// Tasks whose start falls in `[index * 5, (index + 1) * 5)`.
#[derive(Debug, Clone)]
pub struct Phase<'a> {
    pub index: u32,
    pub tasks: Vec<&'a Task>,
}

impl Phase<'_> {
    pub fn first_day(&self) -> f64 {
        f64::from(self.index) * PHASE_LENGTH_DAYS
    }

    pub fn last_day(&self) -> f64 {
        f64::from(self.index + 1) * PHASE_LENGTH_DAYS
    }
}

/// Groups tasks by `floor(start_day / 5)`, phases ascending, tasks in input order.
pub fn phases(goal: &Goal) -> Vec<Phase<'_>> {
    let mut grouped: BTreeMap<u32, Vec<&Task>> = BTreeMap::new();
    for task in &goal.tasks {
        let index = (task.start_day.max(0.0) / PHASE_LENGTH_DAYS).floor() as u32;
        grouped.entry(index).or_default().push(task);
    }
    grouped
        .into_iter()
        .map(|(index, tasks)| Phase { index, tasks })
        .collect()
}

pub fn render_dependencies(goal: &Goal) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} task(s) on the critical path. Delays in these tasks will affect the overall timeline.",
        goal.critical_path.len()
    );

    for phase in phases(goal) {
        let _ = writeln!(
            out,
            "\nPhase {} (days {} - {})",
            phase.index + 1,
            format_days(phase.first_day()),
            format_days(phase.last_day())
        );
        for task in phase.tasks {
            let marker = if goal.is_critical(task.id) { " [critical]" } else { "" };
            let _ = writeln!(
                out,
                "  #{} {}{}\n      {} | {:.1}d | priority {}",
                task.order_index + 1,
                task.title,
                marker,
                task.category,
                task.estimated_duration_days,
                task.priority
            );
            let deps = goal.dependency_titles(task);
            if !deps.is_empty() {
                let _ = writeln!(out, "      depends on: {}", deps.join(", "));
            }
        }
    }
    out
}
