use super::format_days;
use crate::goal::Goal;
use crate::task::{Task, TaskPriority};
use std::fmt::Write;

const BAR_WIDTH: usize = 50;
const TITLE_WIDTH: usize = 30;

/// Day numbers labelled on the timeline axis. The last marker is always `total_days`.
pub fn timeline_markers(total_days: f64) -> Vec<f64> {
    if !total_days.is_finite() || total_days <= 0.0 {
        return vec![0.0];
    }
    let step = if total_days <= 7.0 {
        1.0
    } else if total_days <= 14.0 {
        2.0
    } else if total_days <= 30.0 {
        5.0
    } else {
        10.0
    };

    let mut markers = Vec::new();
    let mut day = 0.0;
    while day <= total_days {
        markers.push(day);
        day += step;
    }
    if markers.last().copied() != Some(total_days) {
        markers.push(total_days);
    }
    markers
}

fn priority_marker(priority: TaskPriority) -> char {
    match priority {
        TaskPriority::High => '!',
        TaskPriority::Medium => '*',
        TaskPriority::Low => '.',
    }
}

fn bar_for(task: &Task, total_days: f64, critical: bool) -> String {
    let scale = BAR_WIDTH as f64 / total_days;
    let left = ((task.start_day * scale).round() as usize).min(BAR_WIDTH - 1);
    let len = (((task.end_day - task.start_day) * scale).round() as usize)
        .max(1)
        .min(BAR_WIDTH - left);
    let fill = if critical { '#' } else { '=' };

    let mut bar = String::with_capacity(BAR_WIDTH);
    bar.extend(std::iter::repeat_n(' ', left));
    bar.extend(std::iter::repeat_n(fill, len));
    bar.extend(std::iter::repeat_n(' ', BAR_WIDTH - left - len));
    bar
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        return title.to_string();
    }
    let mut short: String = title.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

/// Gantt-style chart, one row per task ordered by start day.
pub fn render_timeline(goal: &Goal) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Timeline: {} ({} days from {})",
        goal.title,
        format_days(goal.total_days),
        goal.start_date
    );

    let markers = timeline_markers(goal.total_days);
    let labels: Vec<String> = markers.iter().map(|d| format!("Day {}", format_days(*d))).collect();
    let _ = writeln!(out, "{:width$}   {}", "", labels.join("  "), width = TITLE_WIDTH + 2);

    let mut sorted: Vec<&Task> = goal.tasks.iter().collect();
    sorted.sort_by(|a, b| a.start_day.total_cmp(&b.start_day));

    let total_days = goal.total_days.max(goal.finish_day()).max(f64::EPSILON);
    for task in sorted {
        let critical = goal.is_critical(task.id);
        let _ = writeln!(
            out,
            "{} {:<title$} |{}| {} -> {} ({}d) {}",
            priority_marker(task.priority),
            truncate(&task.title, TITLE_WIDTH),
            bar_for(task, total_days, critical),
            task.start_date,
            task.end_date,
            format_days(task.estimated_duration_days),
            task.category,
            title = TITLE_WIDTH,
        );
    }
    out.push_str("legend: ! high  * medium  . low  # critical path\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_steps_follow_budget() {
        assert_eq!(timeline_markers(5.0), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(timeline_markers(14.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);
        assert_eq!(timeline_markers(12.5).last(), Some(&12.5));
        assert_eq!(timeline_markers(30.0), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0]);
        assert_eq!(timeline_markers(45.0), vec![0.0, 10.0, 20.0, 30.0, 40.0, 45.0]);
    }

    #[test]
    fn truncates_long_titles() {
        let short = truncate("A very long task title that does not fit", 10);
        assert_eq!(short, "A very ...");
        assert_eq!(truncate("Fits", 10), "Fits");
    }
}
