use crate::error::UnknownVariant;
use chrono::{Datelike, NaiveDate};
use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Days between 0001-01-01 (CE day 1) and the unix epoch, used for polars date columns.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub const DEFAULT_DURATION_DAYS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| UnknownVariant::new("task id", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum TaskCategory {
    Planning,
    Design,
    #[default]
    Development,
    Testing,
    Deployment,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Planning,
        TaskCategory::Design,
        TaskCategory::Development,
        TaskCategory::Testing,
        TaskCategory::Deployment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Planning => "Planning",
            TaskCategory::Design => "Design",
            TaskCategory::Development => "Development",
            TaskCategory::Testing => "Testing",
            TaskCategory::Deployment => "Deployment",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] =
        [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "High",
            TaskPriority::Medium => "Medium",
            TaskPriority::Low => "Low",
        }
    }

    /// Contribution of one active task to a day's workload score.
    pub fn weight(&self) -> u32 {
        match self {
            TaskPriority::High => 3,
            TaskPriority::Medium => 2,
            TaskPriority::Low => 1,
        }
    }

    /// RFC 5545 PRIORITY value (1 highest, 9 lowest).
    pub fn ical_priority(&self) -> u8 {
        match self {
            TaskPriority::High => 1,
            TaskPriority::Medium => 5,
            TaskPriority::Low => 9,
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("priority", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// pending -> in_progress -> completed -> pending
    pub fn next(&self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "pending" | "todo" => Ok(TaskStatus::Pending),
            "in_progress" | "inprogress" | "active" => Ok(TaskStatus::InProgress),
            "completed" | "complete" | "done" => Ok(TaskStatus::Completed),
            _ => Err(UnknownVariant::new("status", s)),
        }
    }
}

/// One unscheduled task record as handed over by a producer.
///
/// Every field is optional on the wire; missing or unusable values fall back to
/// defaults instead of rejecting the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: TaskCategory,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: TaskPriority,
    #[serde(
        default = "default_duration",
        alias = "estimated_duration_days",
        deserialize_with = "lenient_duration"
    )]
    pub estimated_duration_days: f64,
    #[serde(default, alias = "depends_on", deserialize_with = "lenient_indices")]
    pub depends_on: Vec<i64>,
}

impl RawTask {
    pub fn new(title: impl Into<String>, estimated_duration_days: f64) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category: TaskCategory::default(),
            priority: TaskPriority::default(),
            estimated_duration_days,
            depends_on: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, depends_on: impl IntoIterator<Item = i64>) -> Self {
        self.depends_on = depends_on.into_iter().collect();
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = category;
        self
    }
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_DAYS
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_category<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskCategory, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}

fn lenient_priority<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TaskPriority, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}

fn lenient_duration<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(DEFAULT_DURATION_DAYS),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(DEFAULT_DURATION_DAYS),
        _ => DEFAULT_DURATION_DAYS,
    })
}

fn lenient_indices<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_i64).collect(),
        Some(Value::Number(n)) => n.as_i64().into_iter().collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub estimated_duration_days: f64,
    pub start_day: f64,
    pub end_day: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TaskStatus,
    pub dependencies: Vec<TaskId>,
    pub order_index: usize,
}

impl Task {
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        estimated_duration_days: f64,
        plan_start: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category: TaskCategory::default(),
            priority: TaskPriority::default(),
            estimated_duration_days,
            start_day: 0.0,
            end_day: 0.0,
            start_date: plan_start,
            end_date: plan_start,
            status: TaskStatus::Pending,
            dependencies: Vec::new(),
            order_index: 0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_day - self.start_day
    }

    pub fn depends_on(&self, other: TaskId) -> bool {
        self.dependencies.contains(&other)
    }

    pub fn to_dataframe_row(&self, is_critical: bool) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(13);

        let number: [u32; 1] = [self.order_index as u32 + 1];
        columns.push(Series::new(PlSmallStr::from_static("#"), number).into_column());

        let title: [&str; 1] = [self.title.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("title"), title).into_column());

        let category: [&str; 1] = [self.category.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("category"), category).into_column());

        let priority: [&str; 1] = [self.priority.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("priority"), priority).into_column());

        let status: [&str; 1] = [self.status.as_str()];
        columns.push(Series::new(PlSmallStr::from_static("status"), status).into_column());

        let duration: [f64; 1] = [round_days(self.estimated_duration_days)];
        columns.push(Series::new(PlSmallStr::from_static("duration_days"), duration).into_column());

        let start_day: [f64; 1] = [round_days(self.start_day)];
        columns.push(Series::new(PlSmallStr::from_static("start_day"), start_day).into_column());

        let end_day: [f64; 1] = [round_days(self.end_day)];
        columns.push(Series::new(PlSmallStr::from_static("end_day"), end_day).into_column());

        columns.push(Self::series_from_date("start_date", self.start_date)?.into_column());
        columns.push(Self::series_from_date("end_date", self.end_date)?.into_column());

        let dependency_count: [u32; 1] = [self.dependencies.len() as u32];
        columns.push(
            Series::new(PlSmallStr::from_static("dependencies"), dependency_count).into_column(),
        );

        let critical: [bool; 1] = [is_critical];
        columns.push(Series::new(PlSmallStr::from_static("critical"), critical).into_column());

        DataFrame::new(columns)
    }

    fn series_from_date(name: &str, date: NaiveDate) -> PolarsResult<Series> {
        let data: [i32; 1] = [date.num_days_from_ce() - EPOCH_DAYS_FROM_CE];
        Series::new(name.into(), data).cast(&DataType::Date)
    }
}

fn round_days(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_task_defaults_missing_fields() {
        let raw: RawTask = serde_json::from_str(r#"{"title": "Kickoff"}"#).unwrap();
        assert_eq!(raw.title, "Kickoff");
        assert!(raw.description.is_empty());
        assert_eq!(raw.category, TaskCategory::Development);
        assert_eq!(raw.priority, TaskPriority::Medium);
        assert_eq!(raw.estimated_duration_days, DEFAULT_DURATION_DAYS);
        assert!(raw.depends_on.is_empty());
    }

    #[test]
    fn raw_task_tolerates_unknown_and_mistyped_values() {
        let raw: RawTask = serde_json::from_str(
            r#"{
                "title": null,
                "category": "Research",
                "priority": "urgent",
                "estimatedDurationDays": "2.5",
                "dependsOn": [0, "one", 2.5, -1, 3]
            }"#,
        )
        .unwrap();
        assert!(raw.title.is_empty());
        assert_eq!(raw.category, TaskCategory::Development);
        assert_eq!(raw.priority, TaskPriority::Medium);
        assert_eq!(raw.estimated_duration_days, 2.5);
        assert_eq!(raw.depends_on, vec![0, -1, 3]);
    }

    #[test]
    fn raw_task_accepts_snake_case_aliases() {
        let raw: RawTask = serde_json::from_str(
            r#"{"title": "Build", "category": "testing", "estimated_duration_days": 4, "depends_on": [1]}"#,
        )
        .unwrap();
        assert_eq!(raw.category, TaskCategory::Testing);
        assert_eq!(raw.estimated_duration_days, 4.0);
        assert_eq!(raw.depends_on, vec![1]);
    }

    #[test]
    fn status_parsing_and_cycle() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("Completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("blocked".parse::<TaskStatus>().is_err());
        assert_eq!(TaskStatus::Completed.next(), TaskStatus::Pending);
    }

    #[test]
    fn priority_weights() {
        assert_eq!(TaskPriority::High.weight(), 3);
        assert_eq!(TaskPriority::Medium.weight(), 2);
        assert_eq!(TaskPriority::Low.weight(), 1);
        assert_eq!(TaskPriority::Low.ical_priority(), 9);
    }

    #[test]
    fn dataframe_row_has_expected_columns() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let mut task = Task::new(TaskId::new(), "Design", 2.0, start);
        task.end_day = 2.0;
        let df = task.to_dataframe_row(true).unwrap();
        assert_eq!(df.height(), 1);
        for name in ["#", "title", "duration_days", "start_date", "critical"] {
            assert!(df.column(name).is_ok(), "missing column {name}");
        }
        assert_eq!(df.column("critical").unwrap().bool().unwrap().get(0), Some(true));
    }
}
