use super::{ExportError, ExportResult};
use crate::goal::Goal;
use crate::task::Task;
use serde::Serialize;

#[derive(Serialize)]
struct TaskCsvRecord<'a> {
    #[serde(rename = "Task")]
    title: &'a str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Priority")]
    priority: &'static str,
    #[serde(rename = "Duration (days)")]
    duration_days: String,
    #[serde(rename = "Start Date")]
    start_date: String,
    #[serde(rename = "End Date")]
    end_date: String,
    #[serde(rename = "Status")]
    status: &'static str,
    #[serde(rename = "Description")]
    description: &'a str,
}

impl<'a> From<&'a Task> for TaskCsvRecord<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            title: &task.title,
            category: task.category.as_str(),
            priority: task.priority.as_str(),
            duration_days: format!("{:.1}", task.estimated_duration_days),
            start_date: task.start_date.to_string(),
            end_date: task.end_date.to_string(),
            status: task.status.as_str(),
            description: &task.description,
        }
    }
}

/// One row per task in input order.
pub fn render_csv(goal: &Goal) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for task in &goal.tasks {
        writer.serialize(TaskCsvRecord::from(task))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
