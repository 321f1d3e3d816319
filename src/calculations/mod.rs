pub mod critical_path;
pub mod day_projection;
pub mod forward_pass;
pub mod rescale;

pub use critical_path::{CriticalPath, CriticalPathAnalyzer};
pub use day_projection::{DayPlan, DayProjector, DayTask, WorkloadLevel};
pub use forward_pass::{DayWindow, ForwardPass};
pub use rescale::{Rescale, fit_to_horizon};
