//! Error types for graph operations.

use crate::AnalyzerId;
use thiserror::Error;

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while resolving a dependency graph.
///
/// Registration never fails and unknown-name queries return empty results,
/// so the only failure the engine itself can produce is a detected cycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// A circular dependency was detected during resolution.
    ///
    /// `analyzer` was being resolved when its dependency `dependency` turned
    /// out to already be on the active resolution stack. Both names belong to
    /// the cycle; fixing either declaration breaks it. A graph that has
    /// reported this error makes no further consistency guarantees and must
    /// be discarded.
    #[error("circular dependency detected between '{analyzer}' and '{dependency}'")]
    CycleDetected {
        /// The analyzer whose dependency list closed the cycle.
        analyzer: AnalyzerId,
        /// The dependency that was still in progress.
        dependency: AnalyzerId,
    },
}

impl GraphError {
    /// Creates a cycle error from the two back-edge endpoints.
    pub fn cycle(analyzer: impl Into<AnalyzerId>, dependency: impl Into<AnalyzerId>) -> Self {
        Self::CycleDetected {
            analyzer: analyzer.into(),
            dependency: dependency.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_error_names_both_endpoints() {
        let err = GraphError::cycle("EnergyCluster", "TrackMatcher");
        let message = err.to_string();
        assert!(message.contains("EnergyCluster"));
        assert!(message.contains("TrackMatcher"));
    }
}
