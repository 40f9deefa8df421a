//! The fixed stage DAG and build ordering.
//!
//! ```text
//! build-prerequisites -> source -> engine
//! build-prerequisites -> source -> minimal -> full
//! ```
//!
//! Edges point from a stage to the stages that build on top of it, so a topological
//! sort yields dependencies first.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

use super::BuildTarget;
use crate::core::PlanError;

/// Directed graph of build stages.
pub struct StageGraph {
    graph: DiGraph<BuildTarget, ()>,
    node_map: HashMap<BuildTarget, NodeIndex>,
}

impl StageGraph {
    /// The pipeline's stage graph.
    #[must_use]
    pub fn pipeline() -> Self {
        let mut stages = Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        };

        stages.add_dependency(BuildTarget::Source, BuildTarget::BuildPrerequisites);
        stages.add_dependency(BuildTarget::Engine, BuildTarget::Source);
        stages.add_dependency(BuildTarget::Minimal, BuildTarget::Source);
        stages.add_dependency(BuildTarget::Full, BuildTarget::Minimal);
        stages
    }

    fn ensure_node(&mut self, stage: BuildTarget) -> NodeIndex {
        *self.node_map.entry(stage).or_insert_with(|| self.graph.add_node(stage))
    }

    /// `stage` builds on top of `depends_on`.
    fn add_dependency(&mut self, stage: BuildTarget, depends_on: BuildTarget) {
        let from = self.ensure_node(depends_on);
        let to = self.ensure_node(stage);
        if !self.graph.contains_edge(from, to) {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Direct dependencies of `stage`.
    #[must_use]
    pub fn dependencies_of(&self, stage: BuildTarget) -> Vec<BuildTarget> {
        self.node_map
            .get(&stage)
            .map(|&idx| {
                self.graph
                    .neighbors_directed(idx, petgraph::Direction::Incoming)
                    .map(|n| self.graph[n])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All stages, dependencies before dependents.
    ///
    /// # Errors
    ///
    /// Fails only if the graph has been built with a cycle, which is a defect.
    pub fn build_order(&self) -> Result<Vec<BuildTarget>, PlanError> {
        toposort(&self.graph, None)
            .map(|indices| indices.into_iter().map(|idx| self.graph[idx]).collect())
            .map_err(|cycle| {
                PlanError::configuration(format!(
                    "build stage graph contains a cycle at '{}'",
                    self.graph[cycle.node_id()]
                ))
            })
    }
}
