//! Full-plan assembly on top of the batch protocol.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GraphResult;
use crate::{AnalyzerId, DependencyGraph};

/// The complete resolved ordering of a dependency graph.
///
/// Produced by [`DependencyGraph::into_plan`]. `ordered` places every
/// registered analyzer after all of its dependencies; `implicit` lists the
/// analyzers that were pulled in transitively (named as a dependency but
/// never explicitly requested), in registration order. Whether those deserve
/// a warning or are silently acceptable is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Every analyzer, dependencies before dependents.
    pub ordered: Vec<AnalyzerId>,
    /// Analyzers included only because something depended on them.
    pub implicit: Vec<AnalyzerId>,
}

impl BuildPlan {
    /// Returns the number of analyzers in the plan.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true if the plan contains no analyzers.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Returns true if any analyzer was included only transitively.
    pub fn has_implicit(&self) -> bool {
        !self.implicit.is_empty()
    }

    /// Position of `id` in the resolved order.
    pub fn position(&self, id: &AnalyzerId) -> Option<usize> {
        self.ordered.iter().position(|entry| entry == id)
    }
}

impl DependencyGraph {
    /// Resolves the whole graph into a [`BuildPlan`].
    ///
    /// Drains [`DependencyGraph::next_batch`] until the empty batch signals
    /// completion and concatenates the results. Consumes the graph: a graph
    /// that reported a cycle must not be reused, and taking `self` by value
    /// makes that unrepresentable.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::GraphError::CycleDetected`] from the first batch
    /// that runs into a cycle.
    ///
    /// # Example
    ///
    /// ```
    /// use ordo_graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.add_analyzer("EnergyCluster");
    /// graph.add_dependency("EnergyCluster", "CalorimeterHits");
    ///
    /// let plan = graph.into_plan().unwrap();
    /// assert_eq!(plan.ordered[0].as_str(), "CalorimeterHits");
    /// assert_eq!(plan.implicit[0].as_str(), "CalorimeterHits");
    /// ```
    pub fn into_plan(mut self) -> GraphResult<BuildPlan> {
        let implicit = self.implicit_analyzers();
        let mut ordered = Vec::with_capacity(self.len());

        loop {
            let batch = self.next_batch()?;
            if batch.is_empty() {
                break;
            }
            ordered.extend(batch);
        }

        if !implicit.is_empty() {
            debug!(count = implicit.len(), "analyzers included transitively only");
        }
        Ok(BuildPlan { ordered, implicit })
    }
}
