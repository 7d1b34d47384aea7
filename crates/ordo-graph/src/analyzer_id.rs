//! Analyzer identifier type.
//!
//! Analyzers are identified by name. The name is the only payload a node in
//! the dependency graph carries: the graph orders names, it knows nothing
//! else about the analyzer behind one. Names come from the caller (typically
//! the analyzer's class or file name discovered while scanning sources) and
//! are compared verbatim, case-sensitively.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique name of an analyzer participating in dependency ordering.
///
/// # Examples
///
/// ```
/// use ordo_graph::AnalyzerId;
///
/// let id = AnalyzerId::new("VertexFitter");
/// assert_eq!(id.as_str(), "VertexFitter");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyzerId(String);

impl AnalyzerId {
    /// Creates an identifier from an analyzer name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the analyzer name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnalyzerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for AnalyzerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnalyzerId({})", self.0)
    }
}

impl From<&str> for AnalyzerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AnalyzerId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for AnalyzerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
