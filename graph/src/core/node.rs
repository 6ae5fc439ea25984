use chrono::{DateTime, Utc};
use smallvec::SmallVec;

/// Parent ids of a node. Simulated commits never have more than two.
pub type Parents = SmallVec<[String; 2]>;

/// A commit node in the DAG
#[derive(Debug, Clone, PartialEq)]
pub struct CommitNode {
    /// Commit id (`C<n>`)
    pub id: String,
    /// Parent commit ids, first parent first
    pub parents: Parents,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Commit message
    pub message: String,
}

impl CommitNode {
    pub fn new(
        id: impl Into<String>,
        parents: impl IntoIterator<Item = String>,
        timestamp: DateTime<Utc>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parents: parents.into_iter().collect(),
            timestamp,
            message: message.into(),
        }
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}
