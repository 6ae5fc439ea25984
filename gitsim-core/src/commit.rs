use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Commit identifier of the form `C<n>`, where `n` is the allocation sequence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn from_sequence(sequence: usize) -> Self {
        CommitId(format!("C{}", sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric part of a `C<n>` id
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix('C')?.parse().ok()
    }

    /// Allocation order. Ids without a sequence sort after all others.
    pub(crate) fn sort_key(&self) -> (u64, &str) {
        (self.sequence().unwrap_or(u64::MAX), &self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CommitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        CommitId(id.to_string())
    }
}

impl PartialEq<str> for CommitId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CommitId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An immutable historical record with one or two parent links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    id: CommitId,
    message: String,
    parent: Option<CommitId>,
    #[serde(default)]
    second_parent: Option<CommitId>,
    #[serde(with = "crate::persist::timestamp")]
    timestamp: DateTime<Utc>,
}

impl Commit {
    pub(crate) fn new(
        id: CommitId,
        message: impl Into<String>,
        parent: Option<CommitId>,
        second_parent: Option<CommitId>,
    ) -> Self {
        Commit {
            id,
            message: message.into(),
            parent,
            second_parent,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> &CommitId {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First parent; `None` only for a root commit
    pub fn parent(&self) -> Option<&CommitId> {
        self.parent.as_ref()
    }

    /// Present only on merge commits
    pub fn second_parent(&self) -> Option<&CommitId> {
        self.second_parent.as_ref()
    }

    /// Parents in order, first parent first
    pub fn parents(&self) -> impl Iterator<Item = &CommitId> {
        self.parent.iter().chain(self.second_parent.iter())
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_id_sequence() {
        assert_eq!(CommitId::from_sequence(12).as_str(), "C12");
        assert_eq!(CommitId::from("C7").sequence(), Some(7));
        assert_eq!(CommitId::from("X7").sequence(), None);
        assert_eq!(CommitId::from("C").sequence(), None);
    }

    #[test]
    fn test_sort_key_is_numeric() {
        let mut ids: Vec<CommitId> = ["C10", "C2", "C0", "zz"].into_iter().map(CommitId::from).collect();
        ids.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        let ids: Vec<_> = ids.iter().map(CommitId::as_str).collect();
        assert_eq!(ids, vec!["C0", "C2", "C10", "zz"]);
    }

    #[test]
    fn test_parents_order() {
        let merge = Commit::new(
            CommitId::from("C3"),
            "merge",
            Some(CommitId::from("C2")),
            Some(CommitId::from("C1")),
        );
        let parents: Vec<_> = merge.parents().map(CommitId::as_str).collect();
        assert_eq!(parents, vec!["C2", "C1"]);
        assert!(merge.is_merge());
        assert!(!merge.is_root());
    }
}
