use crate::goal::Goal;
use crate::task::{Task, TaskCategory};
use std::fmt::Write;

/// Tasks grouped under `## Category` headings in order of first appearance.
pub fn render_markdown(goal: &Goal) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "# {}\n", goal.title);
    let _ = writeln!(md, "**Duration:** {} days", goal.total_days);
    let _ = writeln!(md, "**Total Tasks:** {}", goal.tasks.len());
    let _ = writeln!(md, "**Created:** {}\n", goal.created_at.date_naive());

    let mut categories: Vec<TaskCategory> = Vec::new();
    for task in &goal.tasks {
        if !categories.contains(&task.category) {
            categories.push(task.category);
        }
    }

    for category in categories {
        let _ = writeln!(md, "## {category}\n");
        for task in goal.tasks.iter().filter(|t| t.category == category) {
            write_task(&mut md, task);
        }
    }
    md
}

fn write_task(md: &mut String, task: &Task) {
    let _ = writeln!(md, "### {}", task.title);
    let _ = writeln!(md, "- **Priority:** {}", task.priority);
    let _ = writeln!(md, "- **Duration:** {:.1} days", task.estimated_duration_days);
    let _ = writeln!(md, "- **Timeline:** {} - {}", task.start_date, task.end_date);
    let _ = writeln!(md, "- **Status:** {}", task.status);
    if !task.description.is_empty() {
        let _ = writeln!(md, "- **Description:** {}", task.description);
    }
    if !task.dependencies.is_empty() {
        let _ = writeln!(md, "- **Dependencies:** {} task(s)", task.dependencies.len());
    }
    md.push('\n');
}
