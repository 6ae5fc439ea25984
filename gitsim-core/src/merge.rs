use crate::commit::{Commit, CommitId};
use crate::error::RepoError;
use crate::repository::Repository;
use std::fmt;
use tracing::debug;

/// Result of merging a branch into the current branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Both heads already point at the same commit; nothing was created
    UpToDate,
    /// A two-parent commit was recorded on the current branch
    Merged {
        commit: CommitId,
        source: String,
        target: String,
    },
}

impl MergeOutcome {
    pub fn merged_commit(&self) -> Option<&CommitId> {
        match self {
            MergeOutcome::UpToDate => None,
            MergeOutcome::Merged { commit, .. } => Some(commit),
        }
    }
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeOutcome::UpToDate => write!(f, "Already up to date. Nothing to merge."),
            MergeOutcome::Merged { source, target, .. } => {
                write!(f, "Merged '{}' into '{}'", source, target)
            }
        }
    }
}

impl Repository {
    /// Merge `source` into the current branch.
    ///
    /// Merges are metadata only: the new commit's first parent is the current
    /// head and its second parent the source head. The source branch does not
    /// move.
    pub fn merge_branches(&mut self, source: &str) -> Result<MergeOutcome, RepoError> {
        let target_head = self.resolve_current()?.head().clone();
        let source_head = self
            .branch(source)
            .ok_or_else(|| RepoError::BranchNotFound(source.to_string()))?
            .head()
            .clone();

        if target_head == source_head {
            debug!(source = %source, head = %target_head, "merge is a no-op");
            return Ok(MergeOutcome::UpToDate);
        }

        let target = self.current_branch().to_string();
        let id = self.next_commit_id();
        let message = format!("Merge branch '{}' into {}", source, target);
        let commit = Commit::new(id.clone(), message, Some(target_head), Some(source_head));

        debug!(commit = %id, source = %source, target = %target, "created merge commit");
        self.insert_commit(commit);
        self.advance_current(id.clone())?;

        Ok(MergeOutcome::Merged {
            commit: id,
            source: source.to_string(),
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_creates_two_parent_commit() {
        let mut repo = Repository::new();
        repo.create_branch("b").unwrap();
        repo.checkout_branch("b").unwrap();
        repo.create_commit("work").unwrap();
        repo.checkout_branch("master").unwrap();
        let master_before = repo.head().unwrap().clone();
        let b_head = repo.branch("b").unwrap().head().clone();

        let outcome = repo.merge_branches("b").unwrap();

        assert_eq!(outcome.to_string(), "Merged 'b' into 'master'");
        let merged = outcome.merged_commit().unwrap().clone();
        assert_eq!(repo.head().unwrap(), &merged);

        let commit = repo.commit(merged.as_str()).unwrap();
        assert_eq!(commit.parent().unwrap(), &master_before);
        assert_eq!(commit.second_parent().unwrap(), &b_head);
        assert_eq!(commit.message(), "Merge branch 'b' into master");

        // The source branch stays where it was
        assert_eq!(repo.branch("b").unwrap().head(), &b_head);
    }

    #[test]
    fn test_merge_of_equal_heads_is_idempotent_noop() {
        let mut repo = Repository::new();
        repo.create_branch("twin").unwrap();

        for _ in 0..2 {
            let outcome = repo.merge_branches("twin").unwrap();
            assert_eq!(outcome, MergeOutcome::UpToDate);
            assert_eq!(outcome.to_string(), "Already up to date. Nothing to merge.");
            assert_eq!(repo.commit_count(), 1);
        }
    }

    #[test]
    fn test_merge_current_branch_into_itself() {
        let mut repo = Repository::new();
        repo.create_commit("one").unwrap();

        assert_eq!(repo.merge_branches("master").unwrap(), MergeOutcome::UpToDate);
        assert_eq!(repo.commit_count(), 2);
    }

    #[test]
    fn test_merge_unknown_branch() {
        let mut repo = Repository::new();
        let before = repo.clone();

        let err = repo.merge_branches("nope").unwrap_err();

        assert_eq!(err, RepoError::BranchNotFound("nope".to_string()));
        assert_eq!(repo, before);
    }

    #[test]
    fn test_merge_is_one_directional() {
        let mut repo = Repository::new();
        repo.create_branch("b").unwrap();
        repo.create_commit("master work").unwrap();

        repo.checkout_branch("b").unwrap();
        let outcome = repo.merge_branches("master").unwrap();

        // b was behind master; merging still records a merge commit on b
        let id = outcome.merged_commit().unwrap();
        assert_eq!(repo.branch("b").unwrap().head(), id);
        assert_eq!(repo.branch("master").unwrap().head(), &"C1");
        assert_eq!(repo.commit(id.as_str()).unwrap().parent().unwrap(), &"C0");
        assert_eq!(repo.commit(id.as_str()).unwrap().second_parent().unwrap(), &"C1");
    }
}
