//! # ordo-graph
//!
//! Pure graph data structures for analyzer dependency ordering.
//!
//! This crate provides the core dependency-resolution engine used to decide
//! the build and instantiation order of named analyzers. It contains no I/O
//! and no analysis logic: callers scan their sources, feed the discovered
//! `(analyzer, dependency)` pairs into a [`DependencyGraph`], and drain the
//! resulting order out of it.
//!
//! ## Overview
//!
//! - **Pure Data Structures**: no I/O, no file system dependencies
//! - **Deterministic**: the emitted order is fully determined by the
//!   registration order of analyzers and edges
//! - **Cycle-Safe**: circular dependencies are detected and reported with
//!   both offending names instead of crashing or looping
//! - **Incremental**: the order comes out in batches, one independent
//!   analyzer's dependency chain at a time
//!
//! ## Quick Start
//!
//! ```rust
//! use ordo_graph::DependencyGraph;
//!
//! let mut graph = DependencyGraph::new();
//!
//! // Register the analyzers the user asked for
//! graph.add_analyzer("VertexFitter");
//! graph.add_analyzer("EnergyCluster");
//!
//! // Edges discovered by scanning their sources
//! graph.add_dependency("VertexFitter", "TrackMatcher");
//! graph.add_dependency("EnergyCluster", "TrackMatcher");
//!
//! // Resolve everything into one dependency-respecting order
//! let plan = graph.into_plan().unwrap();
//! let names: Vec<_> = plan.ordered.iter().map(|id| id.as_str()).collect();
//! assert_eq!(names, ["TrackMatcher", "VertexFitter", "EnergyCluster"]);
//!
//! // TrackMatcher was never requested explicitly - the caller decides
//! // whether that deserves a warning.
//! assert_eq!(plan.implicit[0].as_str(), "TrackMatcher");
//! ```
//!
//! ## Incremental use
//!
//! [`DependencyGraph::next_batch`] exposes the underlying protocol: each call
//! resolves one independent analyzer and everything it needs, an empty batch
//! signals completion, and a detected cycle aborts the session. After a cycle
//! error the graph must be discarded.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (batch resolution at `debug`, per-node
//! placement at `trace`) and installs no subscriber - install your own.

pub mod analyzer_id;
pub mod error;
pub mod graph;
pub mod plan;

pub use analyzer_id::AnalyzerId;
pub use error::{GraphError, GraphResult};
pub use graph::DependencyGraph;
pub use plan::BuildPlan;

#[cfg(test)]
mod tests;
