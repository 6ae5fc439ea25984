use std::path::PathBuf;
use thiserror::Error;

/// Expected, recoverable failures of repository operations.
///
/// The repository is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    #[error("Branch '{0}' already exists")]
    BranchExists(String),

    #[error("Branch '{0}' not found")]
    BranchNotFound(String),

    #[error("Current branch '{0}' not found")]
    CurrentBranchMissing(String),
}

/// Failures while writing or reading a saved repository
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("File {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed repository file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

/// A saved repository that parses but breaks a model invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("current branch '{0}' is not among the saved branches")]
    UnknownCurrentBranch(String),

    #[error("branch '{branch}' points at unknown commit {commit}")]
    DanglingHead { branch: String, commit: String },

    #[error("commit {commit} references unknown parent {parent}")]
    DanglingParent { commit: String, parent: String },

    #[error("commit {commit} is its own ancestor")]
    Cycle { commit: String },

    #[error("entry '{key}' holds a record named '{name}'")]
    KeyMismatch { key: String, name: String },
}
