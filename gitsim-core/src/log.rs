use crate::commit::{Commit, CommitId};
use crate::error::RepoError;
use crate::repository::Repository;
use chrono::{DateTime, Local, Utc};
use std::fmt;

pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One commit as shown by `log`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub id: CommitId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Commit: {}", self.id)?;
        writeln!(f, "Message: {}", self.message)?;
        write!(
            f,
            "Date: {}",
            self.timestamp.with_timezone(&Local).format(LOG_DATE_FORMAT)
        )
    }
}

/// First-parent history of a branch, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitLog {
    pub entries: Vec<LogEntry>,
}

impl CommitLog {
    pub fn ids(&self) -> impl Iterator<Item = &CommitId> {
        self.entries.iter().map(|entry| &entry.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for CommitLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "No commits yet");
        }
        for (position, entry) in self.entries.iter().enumerate() {
            if position > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Walks `parent` links only; second parents are never followed
pub struct FirstParentHistory<'a> {
    repo: &'a Repository,
    next: Option<&'a CommitId>,
}

impl<'a> Iterator for FirstParentHistory<'a> {
    type Item = &'a Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let commit = self.repo.commit(self.next?.as_str())?;
        self.next = commit.parent();
        Some(commit)
    }
}

impl Repository {
    /// First-parent history starting at `start` (inclusive)
    pub fn first_parent_history<'a>(&'a self, start: &'a CommitId) -> FirstParentHistory<'a> {
        FirstParentHistory {
            repo: self,
            next: Some(start),
        }
    }

    /// History of the current branch along first parents.
    ///
    /// Commits that only reached the branch through a merge's second parent
    /// are not listed.
    pub fn get_commit_log(&self) -> Result<CommitLog, RepoError> {
        let head = self.resolve_current()?.head();

        let entries = self
            .first_parent_history(head)
            .map(|commit| LogEntry {
                id: commit.id().clone(),
                message: commit.message().to_string(),
                timestamp: commit.timestamp(),
            })
            .collect();

        Ok(CommitLog { entries })
    }
}
