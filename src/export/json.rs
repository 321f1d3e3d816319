use super::ExportResult;
use crate::goal::Goal;

/// The full goal, tasks and schedule included.
pub fn render_json(goal: &Goal) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(goal)?)
}
