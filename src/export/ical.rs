use crate::goal::Goal;
use crate::task::Task;
use chrono::{Duration, NaiveDate};

const CRLF: &str = "\r\n";

/// RFC 5545 TEXT escaping.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push_str(CRLF);
}

fn push_event(out: &mut String, task: &Task, stamp: &str) {
    // DTEND is exclusive for all-day events
    let end = if task.end_date > task.start_date {
        task.end_date
    } else {
        task.start_date + Duration::days(1)
    };
    let description = format!(
        "{}\nCategory: {}\nPriority: {}",
        task.description, task.category, task.priority
    );

    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}@task-planner", task.id));
    push_line(out, &format!("DTSTAMP:{stamp}"));
    push_line(out, &format!("DTSTART;VALUE=DATE:{}", format_date(task.start_date)));
    push_line(out, &format!("DTEND;VALUE=DATE:{}", format_date(end)));
    push_line(out, &format!("SUMMARY:{}", escape_text(&task.title)));
    push_line(out, &format!("DESCRIPTION:{}", escape_text(&description)));
    push_line(out, &format!("CATEGORIES:{}", task.category));
    push_line(out, &format!("PRIORITY:{}", task.priority.ical_priority()));
    push_line(out, "END:VEVENT");
}

/// One all-day VEVENT per task.
pub fn render_ical(goal: &Goal) -> String {
    let stamp = goal.created_at.format("%Y%m%dT%H%M%SZ").to_string();
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, "PRODID:-//task-planner//EN");
    push_line(&mut out, "CALSCALE:GREGORIAN");
    push_line(&mut out, &format!("X-WR-CALNAME:{}", escape_text(&goal.title)));
    for task in &goal.tasks {
        push_event(&mut out, task, &stamp);
    }
    push_line(&mut out, "END:VCALENDAR");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
    }
}
