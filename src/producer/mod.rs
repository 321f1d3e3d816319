//! The boundary to whatever supplies the unscheduled task list.
//!
//! A remote service is tried first when one is configured. Any failure there
//! falls back to the keyword templates, which always succeed.

pub mod fallback;
pub mod remote;

pub use fallback::{FallbackProducer, TemplateKind};
pub use remote::RemoteProducer;

use crate::task::RawTask;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerRequest {
    pub goal: String,
    pub total_days: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl ProducerRequest {
    pub fn new(goal: impl Into<String>, total_days: f64) -> Self {
        Self {
            goal: goal.into(),
            total_days,
            due_date: None,
        }
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }
}

#[derive(Debug, Error)]
pub enum ProducerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("producer returned no tasks")]
    Empty,

    #[error("producer unavailable: {0}")]
    Unavailable(String),
}

pub trait TaskProducer: Send + Sync {
    fn name(&self) -> &'static str;

    fn produce(
        &self,
        request: &ProducerRequest,
    ) -> impl Future<Output = Result<Vec<RawTask>, ProducerError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ProducedTasks {
    pub tasks: Vec<RawTask>,
    pub source: TaskSource,
}

/// Asks `primary` first and falls back to the templates on any failure,
/// including an empty list. Never fails.
pub async fn produce_with_fallback<P: TaskProducer>(
    primary: Option<&P>,
    fallback: &FallbackProducer,
    request: &ProducerRequest,
) -> ProducedTasks {
    if let Some(producer) = primary {
        match producer.produce(request).await {
            Ok(tasks) if !tasks.is_empty() => {
                tracing::info!(producer = producer.name(), tasks = tasks.len(), "tasks produced");
                return ProducedTasks {
                    tasks,
                    source: TaskSource::Remote,
                };
            }
            Ok(_) => {
                tracing::warn!(
                    producer = producer.name(),
                    "producer returned no tasks, using fallback"
                );
            }
            Err(e) => {
                tracing::warn!(producer = producer.name(), %e, "producer failed, using fallback");
            }
        }
    }

    let tasks = fallback.tasks_for(request);
    tracing::info!(
        template = fallback.template_for(&request.goal).as_str(),
        tasks = tasks.len(),
        "tasks produced from template"
    );
    ProducedTasks {
        tasks,
        source: TaskSource::Fallback,
    }
}

/// Extracts the task list from a producer response body.
///
/// Accepts `{"tasks": [...]}`, a bare array, a chat-completion envelope whose
/// `choices[0].message.content` holds one of those, or any of them wrapped in
/// surrounding prose. Records that are not objects are skipped.
pub fn parse_task_payload(body: &str) -> Result<Vec<RawTask>, ProducerError> {
    let value = match serde_json::from_str::<Value>(body.trim()) {
        Ok(value) => value,
        Err(err) => {
            let embedded =
                embedded_json(body).ok_or_else(|| ProducerError::Parse(err.to_string()))?;
            serde_json::from_str::<Value>(embedded)
                .map_err(|e| ProducerError::Parse(e.to_string()))?
        }
    };
    tasks_from_value(value)
}

fn embedded_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn tasks_from_value(value: Value) -> Result<Vec<RawTask>, ProducerError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("tasks") {
                items
            } else if let Some(content) = map
                .get("choices")
                .and_then(|c| c.get(0))
                .and_then(|c| c.get("message"))
                .and_then(|m| m.get("content"))
                .and_then(Value::as_str)
            {
                return parse_task_payload(content);
            } else {
                return Err(ProducerError::Parse("response has no task list".to_string()));
            }
        }
        _ => return Err(ProducerError::Parse("response is not an object or array".to_string())),
    };

    let tasks: Vec<RawTask> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value::<RawTask>(item) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::debug!(%e, "skipping unreadable task record");
                None
            }
        })
        .collect();

    if tasks.is_empty() {
        return Err(ProducerError::Empty);
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tasks_object() {
        let tasks = parse_task_payload(
            r#"{"tasks": [{"title": "Plan", "estimatedDurationDays": 2}, {"title": "Build", "dependsOn": [0]}]}"#,
        )
        .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].depends_on, vec![0]);
    }

    #[test]
    fn parses_bare_array_and_skips_non_objects() {
        let tasks = parse_task_payload(r#"[{"title": "Only"}, 3, "text"]"#).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Only");
    }

    #[test]
    fn unwraps_chat_completion_content_with_prose() {
        let body = serde_json::json!({
            "choices": [{
                "message": {
                    "content": "Here is your plan:\n{\"tasks\": [{\"title\": \"Draft\"}]}\nGood luck!"
                }
            }]
        })
        .to_string();
        let tasks = parse_task_payload(&body).unwrap();
        assert_eq!(tasks[0].title, "Draft");
    }

    #[test]
    fn rejects_garbage_and_empty_lists() {
        assert!(matches!(parse_task_payload("not json"), Err(ProducerError::Parse(_))));
        assert!(matches!(parse_task_payload(r#"{"tasks": []}"#), Err(ProducerError::Empty)));
        assert!(matches!(parse_task_payload(r#"{"other": 1}"#), Err(ProducerError::Parse(_))));
    }
}
