pub mod calculations;
pub mod config;
pub mod error;
pub mod export;
pub mod goal;
pub mod graph;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod planner;
pub mod producer;
pub mod schedule;
pub mod stats;
pub mod task;
pub(crate) mod task_validation;
pub mod views;

pub use calculations::{
    CriticalPath, CriticalPathAnalyzer, DayPlan, DayProjector, DayTask, WorkloadLevel,
};
pub use config::{ConfigError, PlannerConfig};
pub use error::{PlanError, UnknownVariant};
pub use export::{ExportError, ExportFormat, save_export};
pub use goal::Goal;
pub use graph::TaskGraph;
pub use planner::{PlanRequest, Planner, build_goal, resolve_total_days};
pub use producer::{
    FallbackProducer, ProducerError, ProducerRequest, RemoteProducer, TaskProducer, TemplateKind,
    produce_with_fallback,
};
pub use schedule::{MAX_TOTAL_DAYS, ScheduleSummary, TimelineScheduler};
pub use stats::PlanStats;
pub use task::{RawTask, Task, TaskCategory, TaskId, TaskPriority, TaskStatus};
