use crate::task::TaskId;
use thiserror::Error;

/// Failures of the planning pipeline (graph build, scheduling, analysis, status edits).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The producer handed over an empty task list.
    #[error("cannot build a task graph from an empty task list")]
    GraphConstruction,

    /// Dependency resolution found a cycle through the named task.
    #[error("cyclic dependency detected at task {task_id} ('{title}')")]
    CyclicDependency { task_id: TaskId, title: String },

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("task {0} not found")]
    TaskNotFound(TaskId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
