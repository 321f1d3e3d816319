use crate::error::PlanError;
use crate::task::{RawTask, Task, TaskId};
use chrono::NaiveDate;
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Tasks plus their dependency edges (dependency -> dependent), addressed by position.
///
/// Tasks own only the ids of what they depend on; the graph and the id lookup
/// live here.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    id_to_index: HashMap<TaskId, usize>,
    graph: DiGraph<usize, ()>,
    nodes: Vec<NodeIndex>,
}

impl TaskGraph {
    /// Builds the graph from a producer's ordered records, assigning fresh ids.
    ///
    /// `depends_on` entries outside `[0, n)` are dropped. Self references are kept
    /// and surface later as a cycle.
    pub fn build(raw_tasks: Vec<RawTask>, plan_start: NaiveDate) -> Result<Self, PlanError> {
        if raw_tasks.is_empty() {
            return Err(PlanError::GraphConstruction);
        }

        let count = raw_tasks.len();
        let ids: Vec<TaskId> = (0..count).map(|_| TaskId::new()).collect();
        let mut tasks = Vec::with_capacity(count);

        for (idx, raw) in raw_tasks.into_iter().enumerate() {
            let title = if raw.title.trim().is_empty() {
                format!("Task {}", idx + 1)
            } else {
                raw.title.trim().to_string()
            };

            let duration = sanitize_duration(raw.estimated_duration_days, &title);

            let mut dependencies: Vec<TaskId> = Vec::with_capacity(raw.depends_on.len());
            for dep_idx in raw.depends_on {
                if dep_idx < 0 || dep_idx as usize >= count {
                    tracing::debug!(
                        task = %title,
                        dep_idx,
                        "dropping out-of-range dependency index"
                    );
                    continue;
                }
                let dep_id = ids[dep_idx as usize];
                if !dependencies.contains(&dep_id) {
                    dependencies.push(dep_id);
                }
            }

            let mut task = Task::new(ids[idx], title, duration, plan_start);
            task.description = raw.description;
            task.category = raw.category;
            task.priority = raw.priority;
            task.dependencies = dependencies;
            task.order_index = idx;
            tasks.push(task);
        }

        Self::from_tasks(tasks)
    }

    /// Rebuilds a graph over already-identified tasks (for example a scheduled goal).
    /// Dependency ids that do not name a task in the list are ignored.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, PlanError> {
        if tasks.is_empty() {
            return Err(PlanError::GraphConstruction);
        }

        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut id_to_index: HashMap<TaskId, usize> = HashMap::with_capacity(tasks.len());
        let mut nodes = Vec::with_capacity(tasks.len());

        // Add nodes first
        for (idx, task) in tasks.iter().enumerate() {
            nodes.push(graph.add_node(idx));
            id_to_index.insert(task.id, idx);
        }

        // Add edges: dependency -> task
        for (idx, task) in tasks.iter().enumerate() {
            for dep_id in &task.dependencies {
                if let Some(&dep_idx) = id_to_index.get(dep_id) {
                    graph.add_edge(nodes[dep_idx], nodes[idx], ());
                }
            }
        }

        tracing::debug!(
            tasks = graph.node_count(),
            edges = graph.edge_count(),
            "built task graph"
        );

        Ok(Self {
            tasks,
            id_to_index,
            graph,
            nodes,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn index_of(&self, id: TaskId) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.index_of(id).map(|idx| &self.tasks[idx])
    }

    /// Positions of the tasks `idx` depends on, in the task's own dependency order.
    pub fn dependencies_of(&self, idx: usize) -> Vec<usize> {
        self.tasks[idx]
            .dependencies
            .iter()
            .filter_map(|dep_id| self.id_to_index.get(dep_id).copied())
            .collect()
    }

    /// Positions of the tasks that depend on `idx`.
    pub fn dependents_of(&self, idx: usize) -> Vec<usize> {
        let mut dependents: Vec<usize> = self
            .graph
            .neighbors_directed(self.nodes[idx], Direction::Outgoing)
            .map(|node| self.graph[node])
            .collect();
        dependents.sort_unstable();
        dependents.dedup();
        dependents
    }

    /// Task positions ordered so every dependency precedes its dependents.
    pub fn topological_order(&self) -> Result<Vec<usize>, PlanError> {
        let order = toposort(&self.graph, None).map_err(|cycle| {
            let task = &self.tasks[self.graph[cycle.node_id()]];
            PlanError::CyclicDependency {
                task_id: task.id,
                title: task.title.clone(),
            }
        })?;
        Ok(order.into_iter().map(|node| self.graph[node]).collect())
    }
}

fn sanitize_duration(duration: f64, title: &str) -> f64 {
    if duration.is_finite() && duration >= 0.0 {
        return duration;
    }
    tracing::warn!(task = %title, duration, "clamping unusable duration to 0 days");
    0.0
}
