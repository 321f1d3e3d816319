use crate::error::PlanError;
use crate::graph::TaskGraph;
use crate::task::TaskId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const EPSILON: f64 = 1e-6;

fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// Tasks lying on some maximum-length dependency chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalPath {
    /// Length of the longest chain, in days.
    pub length: f64,
    /// Every task on at least one longest chain, in input order.
    pub task_ids: Vec<TaskId>,
    /// One longest chain from its first task to its last.
    pub chain: Vec<TaskId>,
}

impl CriticalPath {
    pub fn contains(&self, id: TaskId) -> bool {
        self.task_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }
}

pub struct CriticalPathAnalyzer<'a> {
    graph: &'a TaskGraph,
}

impl<'a> CriticalPathAnalyzer<'a> {
    pub fn new(graph: &'a TaskGraph) -> Self {
        Self { graph }
    }

    /// Longest weighted path ending at each task, weights being task durations.
    pub fn path_lengths(&self) -> Result<Vec<f64>, PlanError> {
        let order = self.graph.topological_order()?;
        let tasks = self.graph.tasks();
        let mut lengths = vec![0.0_f64; tasks.len()];
        for idx in order {
            let longest_dep = self
                .graph
                .dependencies_of(idx)
                .into_iter()
                .map(|dep_idx| lengths[dep_idx])
                .fold(0.0_f64, f64::max);
            lengths[idx] = longest_dep + tasks[idx].estimated_duration_days;
        }
        Ok(lengths)
    }

    /// Marks every task that lies on some maximal chain, walking backward from
    /// each task whose path length equals the critical length and following every
    /// dependency whose length matches the remaining target.
    pub fn analyze(&self) -> Result<CriticalPath, PlanError> {
        let lengths = self.path_lengths()?;
        let tasks = self.graph.tasks();
        let critical_length = lengths.iter().copied().fold(0.0_f64, f64::max);

        let mut marked: HashSet<usize> = HashSet::new();
        let mut stack: Vec<usize> = (0..tasks.len())
            .filter(|&idx| approx_equal(lengths[idx], critical_length))
            .collect();

        while let Some(idx) = stack.pop() {
            if !marked.insert(idx) {
                continue;
            }
            let remaining = lengths[idx] - tasks[idx].estimated_duration_days;
            for dep_idx in self.graph.dependencies_of(idx) {
                if approx_equal(lengths[dep_idx], remaining) && !marked.contains(&dep_idx) {
                    stack.push(dep_idx);
                }
            }
        }

        let mut members: Vec<usize> = marked.into_iter().collect();
        members.sort_unstable_by_key(|&idx| tasks[idx].order_index);

        let chain = self.longest_chain(&lengths, critical_length);

        tracing::debug!(
            length = critical_length,
            tasks = members.len(),
            "critical path analysed"
        );

        Ok(CriticalPath {
            length: critical_length,
            task_ids: members.into_iter().map(|idx| tasks[idx].id).collect(),
            chain: chain.into_iter().map(|idx| tasks[idx].id).collect(),
        })
    }

    /// First maximal chain in input order, returned source first.
    fn longest_chain(&self, lengths: &[f64], critical_length: f64) -> Vec<usize> {
        let tasks = self.graph.tasks();
        let Some(mut current) =
            (0..tasks.len()).find(|&idx| approx_equal(lengths[idx], critical_length))
        else {
            return Vec::new();
        };

        let mut chain = vec![current];
        loop {
            let remaining = lengths[current] - tasks[current].estimated_duration_days;
            let next = self
                .graph
                .dependencies_of(current)
                .into_iter()
                .find(|&dep_idx| approx_equal(lengths[dep_idx], remaining));
            match next {
                Some(dep_idx) => {
                    chain.push(dep_idx);
                    current = dep_idx;
                }
                None => break,
            }
        }
        chain.reverse();
        chain
    }
}
