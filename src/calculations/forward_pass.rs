use crate::error::PlanError;
use crate::graph::TaskGraph;

/// Continuous day offsets of one task relative to plan day 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DayWindow {
    pub start_day: f64,
    pub end_day: f64,
}

impl DayWindow {
    pub fn duration(&self) -> f64 {
        self.end_day - self.start_day
    }
}

/// Earliest-start / earliest-finish pass over the dependency graph.
pub struct ForwardPass<'a> {
    graph: &'a TaskGraph,
}

impl<'a> ForwardPass<'a> {
    pub fn new(graph: &'a TaskGraph) -> Self {
        Self { graph }
    }

    /// Returns one window per task, indexed like `graph.tasks()`.
    ///
    /// A task starts at the latest end of its dependencies (0 without any) and
    /// ends `estimated_duration_days` later.
    pub fn execute(&self) -> Result<Vec<DayWindow>, PlanError> {
        let order = self.graph.topological_order()?;
        let tasks = self.graph.tasks();
        let mut windows = vec![DayWindow::default(); tasks.len()];

        for idx in order {
            let start_day = self
                .graph
                .dependencies_of(idx)
                .into_iter()
                .map(|dep_idx| windows[dep_idx].end_day)
                .fold(0.0_f64, f64::max);
            windows[idx] = DayWindow {
                start_day,
                end_day: start_day + tasks[idx].estimated_duration_days,
            };
        }

        Ok(windows)
    }
}

/// Largest end day across all windows, 0 for an empty slice.
pub fn horizon(windows: &[DayWindow]) -> f64 {
    windows.iter().map(|w| w.end_day).fold(0.0_f64, f64::max)
}
