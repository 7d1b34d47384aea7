//! Dependency graph for analyzer build ordering.
//!
//! The graph owns the node set, per-node dependency lists, and the
//! bookkeeping needed to emit a valid dependencies-first order in batches.
//! Callers register analyzers and edges, then drain the order through
//! [`DependencyGraph::next_batch`] until an empty batch signals completion,
//! or a cycle is reported.
//!
//! # Design
//!
//! Resolution is a post-order depth-first traversal with back-edge cycle
//! detection: a dependency that is already on the active traversal stack
//! closes a cycle. Among several simultaneously available independent
//! analyzers the engine picks in registration order, so the emitted sequence
//! is fully determined by the order of `add_analyzer`/`add_dependency` calls.
//!
//! The graph is an explicit, independently instantiable object. Nothing is
//! shared between instances, so planning sessions never interfere.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::error::{GraphError, GraphResult};
use crate::AnalyzerId;

/// A dependency graph over named analyzers.
///
/// Each node is a bare name; each edge `from -> to` declares that `from`
/// requires `to` to be placed first. Edges may reference names that were
/// never registered explicitly - the endpoints are auto-registered, and
/// [`DependencyGraph::implicit_analyzers`] reports which names were only
/// ever reached that way.
///
/// # Example
///
/// ```
/// use ordo_graph::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
/// graph.add_analyzer("VertexFitter");
/// graph.add_analyzer("TrackMatcher");
/// graph.add_dependency("VertexFitter", "TrackMatcher");
///
/// let batch = graph.next_batch().unwrap();
/// assert_eq!(batch[0].as_str(), "TrackMatcher");
/// assert_eq!(batch[1].as_str(), "VertexFitter");
/// assert!(graph.next_batch().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Declared dependencies per analyzer, in declaration order.
    /// Duplicate declarations are kept; resolution skips the repeats.
    adjacency: FxHashMap<AnalyzerId, Vec<AnalyzerId>>,
    /// Registration order, for deterministic iteration and tie-breaking.
    insertion_order: Vec<AnalyzerId>,
    /// Names registered through [`DependencyGraph::add_analyzer`], as opposed
    /// to names first seen as an edge endpoint.
    explicit: FxHashSet<AnalyzerId>,
    /// Independent analyzers: not yet known to be a dependency of any other.
    /// FIFO over registration order; a name leaves permanently the first
    /// time an edge targets it.
    roots: VecDeque<AnalyzerId>,
    /// Emission order so far.
    resolved: Vec<AnalyzerId>,
    resolved_set: FxHashSet<AnalyzerId>,
    /// Names on the active resolution stack. Always empty between calls.
    in_progress: FxHashSet<AnalyzerId>,
    /// Registered but not yet resolved.
    pending: FxHashSet<AnalyzerId>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered analyzers, explicit or implicit.
    pub fn len(&self) -> usize {
        self.insertion_order.len()
    }

    /// Returns true if no analyzer has been registered.
    pub fn is_empty(&self) -> bool {
        self.insertion_order.is_empty()
    }

    /// Returns true if `id` is registered, explicitly or as an edge endpoint.
    pub fn contains(&self, id: &AnalyzerId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Registers an analyzer by name.
    ///
    /// New analyzers start out independent (a candidate entry point for
    /// resolution) and pending. Re-adding an existing name is a no-op,
    /// except that a name previously known only as a dependency target is
    /// upgraded to explicitly requested.
    pub fn add_analyzer(&mut self, id: impl Into<AnalyzerId>) {
        let id = id.into();
        self.register(&id);
        self.explicit.insert(id);
    }

    /// Declares that `from` requires `to` to be resolved first.
    ///
    /// Unseen endpoints are auto-registered. The edge is appended to `from`'s
    /// declaration list even if already present; resolution tolerates the
    /// duplicates and never emits a name twice. `to` stops being independent.
    /// Self-edges are accepted here and surface as a cycle during resolution.
    pub fn add_dependency(&mut self, from: impl Into<AnalyzerId>, to: impl Into<AnalyzerId>) {
        let from = from.into();
        let to = to.into();
        self.register(&from);
        self.register(&to);

        if let Some(deps) = self.adjacency.get_mut(&from) {
            deps.push(to.clone());
        }

        // No-op if `to` already left the root set.
        self.roots.retain(|root| *root != to);
        trace!(analyzer = %from, dependency = %to, "dependency declared");
    }

    /// Returns the declared dependencies of `id`, in declaration order.
    ///
    /// Unknown names yield an empty slice rather than an error, so
    /// speculative queries need no separate existence check.
    pub fn dependencies(&self, id: &AnalyzerId) -> &[AnalyzerId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns all registered names in registration order.
    pub fn analyzer_ids(&self) -> impl Iterator<Item = &AnalyzerId> {
        self.insertion_order.iter()
    }

    /// Returns the currently independent analyzers, oldest first.
    pub fn root_analyzers(&self) -> impl Iterator<Item = &AnalyzerId> {
        self.roots.iter()
    }

    /// Returns names that were only ever reached as a dependency target and
    /// never registered through [`DependencyGraph::add_analyzer`], in
    /// registration order.
    ///
    /// The engine resolves these like any other node; whether their presence
    /// deserves a warning is the caller's policy.
    pub fn implicit_analyzers(&self) -> Vec<AnalyzerId> {
        self.insertion_order
            .iter()
            .filter(|id| !self.explicit.contains(*id))
            .cloned()
            .collect()
    }

    /// Returns the names emitted so far, in emission order.
    pub fn resolved(&self) -> &[AnalyzerId] {
        &self.resolved
    }

    /// Returns true once every registered analyzer has been emitted.
    pub fn is_fully_resolved(&self) -> bool {
        self.pending.is_empty()
    }

    /// Resolves and returns the next batch of the order.
    ///
    /// Pops the oldest independent analyzer and resolves its full dependency
    /// chain, returning the newly placed names with dependencies before
    /// dependents. Once no independent analyzer remains, an empty batch
    /// signals that the whole graph is resolved; if unresolved analyzers
    /// remain without any independent entry point, the leftover is resolved
    /// from the oldest pending name, which either completes a residual
    /// acyclic component or reports the cycle keeping it alive.
    ///
    /// # Errors
    ///
    /// [`GraphError::CycleDetected`] naming both endpoints of the back edge.
    /// After an error the graph makes no consistency guarantees and must be
    /// discarded.
    pub fn next_batch(&mut self) -> GraphResult<Vec<AnalyzerId>> {
        let start = if let Some(root) = self.roots.pop_front() {
            root
        } else if let Some(stuck) = self.first_pending() {
            stuck
        } else {
            return Ok(Vec::new());
        };

        let mut batch = Vec::new();
        if let Err(err) = self.resolve_from(&start, &mut batch) {
            self.in_progress.clear();
            return Err(err);
        }
        debug!(root = %start, placed = batch.len(), "resolved batch");
        Ok(batch)
    }

    /// Registers `id` if unseen. Does not mark it explicit.
    fn register(&mut self, id: &AnalyzerId) {
        if self.adjacency.contains_key(id) {
            return;
        }
        self.adjacency.insert(id.clone(), Vec::new());
        self.insertion_order.push(id.clone());
        self.roots.push_back(id.clone());
        self.pending.insert(id.clone());
    }

    /// Oldest registered analyzer that is still pending.
    fn first_pending(&self) -> Option<AnalyzerId> {
        self.insertion_order
            .iter()
            .find(|id| self.pending.contains(*id))
            .cloned()
    }

    /// Post-order depth-first resolution of `node` and everything it needs.
    ///
    /// A dependency that is already on the active stack closes a cycle; the
    /// whole call aborts with both names. Dependencies already emitted are
    /// skipped, which also collapses duplicate declarations.
    fn resolve_from(&mut self, node: &AnalyzerId, batch: &mut Vec<AnalyzerId>) -> GraphResult<()> {
        self.in_progress.insert(node.clone());

        // Clone releases the adjacency borrow before recursing.
        let deps = self.dependencies(node).to_vec();
        for dep in deps {
            if self.resolved_set.contains(&dep) {
                continue;
            }
            if self.in_progress.contains(&dep) {
                return Err(GraphError::cycle(node.clone(), dep));
            }
            self.resolve_from(&dep, batch)?;
        }

        self.in_progress.remove(node);
        self.pending.remove(node);
        self.resolved_set.insert(node.clone());
        self.resolved.push(node.clone());
        batch.push(node.clone());
        trace!(analyzer = %node, "analyzer placed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> AnalyzerId {
        AnalyzerId::new(name)
    }

    #[test]
    fn empty_graph() {
        let mut graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.is_fully_resolved());
        assert_eq!(graph.next_batch().unwrap(), Vec::<AnalyzerId>::new());
    }

    #[test]
    fn registration_is_idempotent() {
        let mut graph = DependencyGraph::new();
        graph.add_analyzer("a");
        graph.add_analyzer("a");
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.root_analyzers().count(), 1);
    }

    #[test]
    fn dependencies_of_unknown_name_are_empty() {
        let graph = DependencyGraph::new();
        assert!(graph.dependencies(&id("nope")).is_empty());
    }

    #[test]
    fn edge_endpoints_are_auto_registered() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        assert!(graph.contains(&id("a")));
        assert!(graph.contains(&id("b")));
        assert_eq!(graph.dependencies(&id("a")), &[id("b")]);
        // `b` is a dependency target, so only `a` stays independent.
        assert_eq!(graph.root_analyzers().collect::<Vec<_>>(), [&id("a")]);
    }

    #[test]
    fn duplicate_edges_are_kept_in_the_declaration_list() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("a", "b");
        assert_eq!(graph.dependencies(&id("a")), &[id("b"), id("b")]);
    }

    #[test]
    fn duplicate_edges_do_not_duplicate_emission() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("a", "b");
        assert_eq!(graph.next_batch().unwrap(), [id("b"), id("a")]);
        assert!(graph.next_batch().unwrap().is_empty());
    }

    #[test]
    fn linear_chain_resolves_dependencies_first() {
        let mut graph = DependencyGraph::new();
        graph.add_analyzer("a");
        graph.add_analyzer("b");
        graph.add_analyzer("c");
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "c");

        assert_eq!(graph.next_batch().unwrap(), [id("c"), id("b"), id("a")]);
        assert!(graph.next_batch().unwrap().is_empty());
        assert!(graph.is_fully_resolved());
    }

    #[test]
    fn two_node_cycle_is_reported_with_both_names() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "a");

        let err = graph.next_batch().unwrap_err();
        let GraphError::CycleDetected {
            analyzer,
            dependency,
        } = err
        else {
            panic!("expected a cycle");
        };
        assert_eq!(
            [analyzer.as_str(), dependency.as_str()].into_iter().collect::<std::collections::BTreeSet<_>>(),
            ["a", "b"].into_iter().collect()
        );
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "a");

        let err = graph.next_batch().unwrap_err();
        assert_eq!(
            err,
            GraphError::CycleDetected {
                analyzer: id("a"),
                dependency: id("a"),
            }
        );
    }

    #[test]
    fn diamond_emits_each_analyzer_once() {
        let mut graph = DependencyGraph::new();
        for name in ["a", "b", "c", "d"] {
            graph.add_analyzer(name);
        }
        graph.add_dependency("a", "b");
        graph.add_dependency("a", "c");
        graph.add_dependency("b", "d");
        graph.add_dependency("c", "d");

        let batch = graph.next_batch().unwrap();
        assert_eq!(batch, [id("d"), id("b"), id("c"), id("a")]);
        assert!(graph.next_batch().unwrap().is_empty());
    }

    #[test]
    fn independent_analyzers_come_one_batch_each_in_registration_order() {
        let mut graph = DependencyGraph::new();
        graph.add_analyzer("x");
        graph.add_analyzer("y");
        graph.add_analyzer("z");

        assert_eq!(graph.next_batch().unwrap(), [id("x")]);
        assert_eq!(graph.next_batch().unwrap(), [id("y")]);
        assert_eq!(graph.next_batch().unwrap(), [id("z")]);
        assert!(graph.next_batch().unwrap().is_empty());
    }

    #[test]
    fn rootless_acyclic_residue_still_resolves() {
        // c <-> d is a pure cycle; a is only a dependency of c, so no root
        // exists anywhere. The fallback path must still place a before the
        // cycle is finally reported.
        let mut graph = DependencyGraph::new();
        graph.add_analyzer("a");
        graph.add_dependency("c", "d");
        graph.add_dependency("d", "c");
        graph.add_dependency("c", "a");

        assert_eq!(graph.next_batch().unwrap(), [id("a")]);
        assert!(matches!(
            graph.next_batch(),
            Err(GraphError::CycleDetected { .. })
        ));
    }

    #[test]
    fn implicit_analyzers_are_tracked() {
        let mut graph = DependencyGraph::new();
        graph.add_analyzer("a");
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "c");
        assert_eq!(graph.implicit_analyzers(), [id("b"), id("c")]);

        // Explicit registration afterwards clears the implicit mark.
        graph.add_analyzer("b");
        assert_eq!(graph.implicit_analyzers(), [id("c")]);
    }

    #[test]
    fn resolved_accumulates_across_batches() {
        let mut graph = DependencyGraph::new();
        graph.add_analyzer("x");
        graph.add_analyzer("y");
        graph.next_batch().unwrap();
        graph.next_batch().unwrap();
        assert_eq!(graph.resolved(), &[id("x"), id("y")]);
    }
}
