use super::format_days;
use crate::goal::Goal;
use std::fmt::Write;

pub fn render_stats(goal: &Goal) -> String {
    let stats = goal.stats();
    let mut out = String::new();
    let _ = writeln!(out, "Project overview: {}", goal.title);
    let _ = writeln!(
        out,
        "  progress      {:.0}% ({} of {} completed, {} in progress, {} pending)",
        stats.progress_percent, stats.completed, stats.total_tasks, stats.in_progress, stats.pending
    );
    let _ = writeln!(out, "  avg duration  {:.1} days", stats.average_duration_days);
    let _ = writeln!(
        out,
        "  plan length   {} of {} days",
        format_days(stats.plan_length_days),
        format_days(goal.total_days)
    );
    let _ = writeln!(out, "  critical      {} task(s)", stats.critical_tasks);

    out.push_str("  by priority  ");
    for (priority, count) in &stats.by_priority {
        let _ = write!(out, " {priority}={count}");
    }
    out.push('\n');

    out.push_str("  by category  ");
    for (category, count) in &stats.by_category {
        let _ = write!(out, " {category}={count}");
    }
    out.push('\n');

    if goal.schedule.was_compressed() {
        let _ = writeln!(
            out,
            "  compressed    {}d of work fitted into {}d (x{:.3})",
            format_days(goal.schedule.horizon),
            format_days(goal.total_days),
            goal.schedule.scale_factor
        );
    }
    out
}
