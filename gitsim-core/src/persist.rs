//! Saving and loading repositories as JSON.
//!
//! The document holds `commits` (id → record), `branches` (name → record)
//! and `current_branch`. `current_branch` decides the active branch on load;
//! unknown keys such as a stray `head` are ignored.

use crate::branch::Branch;
use crate::commit::Commit;
use crate::error::{IntegrityError, PersistError};
use crate::repository::Repository;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    commits: BTreeMap<String, Commit>,
    branches: BTreeMap<String, Branch>,
    current_branch: String,
}

impl Repository {
    pub fn to_json(&self) -> Result<String, PersistError> {
        let snapshot = Snapshot {
            commits: self
                .commits()
                .map(|commit| (commit.id().to_string(), commit.clone()))
                .collect(),
            branches: self
                .branches()
                .map(|branch| (branch.name().to_string(), branch.clone()))
                .collect(),
            current_branch: self.current_branch().to_string(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    pub fn from_json(text: &str) -> Result<Self, PersistError> {
        let snapshot: Snapshot = serde_json::from_str(text)?;
        Ok(Self::from_snapshot(snapshot)?)
    }

    /// Write the repository to `path`.
    ///
    /// The document is written to a temporary file next to `path` and renamed
    /// over it, so a failed save leaves any previous file intact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let io_error = |source: std::io::Error| PersistError::Io {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut file = NamedTempFile::new_in(&dir).map_err(io_error)?;
        file.write_all(json.as_bytes()).map_err(io_error)?;
        file.as_file().sync_all().map_err(io_error)?;
        file.persist(path).map_err(|err| io_error(err.error))?;

        info!(path = %path.display(), commits = self.commit_count(), "saved repository");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PersistError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| PersistError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match Self::from_json(&text) {
            Ok(repo) => {
                info!(path = %path.display(), commits = repo.commit_count(), "loaded repository");
                Ok(repo)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "rejected repository file");
                Err(err)
            }
        }
    }

    fn from_snapshot(snapshot: Snapshot) -> Result<Self, IntegrityError> {
        let mut commits = Vec::with_capacity(snapshot.commits.len());
        for (key, commit) in snapshot.commits {
            if commit.id() != key.as_str() {
                return Err(IntegrityError::KeyMismatch {
                    key,
                    name: commit.id().to_string(),
                });
            }
            commits.push(commit);
        }
        let commits = topological_order(commits)?;

        let position: HashMap<&str, usize> = commits
            .iter()
            .enumerate()
            .map(|(slot, commit)| (commit.id().as_str(), slot))
            .collect();

        for (key, branch) in &snapshot.branches {
            if branch.name() != key {
                return Err(IntegrityError::KeyMismatch {
                    key: key.clone(),
                    name: branch.name().to_string(),
                });
            }
            if !position.contains_key(branch.head().as_str()) {
                return Err(IntegrityError::DanglingHead {
                    branch: key.clone(),
                    commit: branch.head().to_string(),
                });
            }
        }

        if !snapshot.branches.contains_key(&snapshot.current_branch) {
            return Err(IntegrityError::UnknownCurrentBranch(snapshot.current_branch));
        }

        Ok(Repository::from_parts(
            commits,
            snapshot.branches,
            snapshot.current_branch,
        ))
    }
}

/// Orders commits so every parent precedes its children (Kahn's algorithm).
///
/// Ready commits are taken lowest id sequence first, so a dense `C<n>`
/// history comes back in allocation order.
fn topological_order(commits: Vec<Commit>) -> Result<Vec<Commit>, IntegrityError> {
    let slots: HashMap<&str, usize> = commits
        .iter()
        .enumerate()
        .map(|(slot, commit)| (commit.id().as_str(), slot))
        .collect();

    let mut pending = vec![0usize; commits.len()];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); commits.len()];
    for (slot, commit) in commits.iter().enumerate() {
        for parent in commit.parents() {
            let &parent_slot = slots.get(parent.as_str()).ok_or_else(|| {
                IntegrityError::DanglingParent {
                    commit: commit.id().to_string(),
                    parent: parent.to_string(),
                }
            })?;
            pending[slot] += 1;
            children[parent_slot].push(slot);
        }
    }

    let mut ready: BinaryHeap<Reverse<((u64, &str), usize)>> = commits
        .iter()
        .enumerate()
        .filter(|(slot, _)| pending[*slot] == 0)
        .map(|(slot, commit)| Reverse((commit.id().sort_key(), slot)))
        .collect();

    let mut order = Vec::with_capacity(commits.len());
    while let Some(Reverse((_, slot))) = ready.pop() {
        order.push(slot);
        for &child in &children[slot] {
            pending[child] -= 1;
            if pending[child] == 0 {
                ready.push(Reverse((commits[child].id().sort_key(), child)));
            }
        }
    }

    // Anything left unvisited sits on a cycle or descends from one.
    if order.len() < commits.len() {
        let stuck = commits
            .iter()
            .enumerate()
            .filter(|(slot, _)| pending[*slot] > 0)
            .map(|(_, commit)| commit)
            .min_by(|a, b| a.id().sort_key().cmp(&b.id().sort_key()));
        let commit = stuck.map(|c| c.id().to_string()).unwrap_or_default();
        return Err(IntegrityError::Cycle { commit });
    }

    let mut taken: Vec<Option<Commit>> = commits.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|slot| taken[slot].take())
        .collect())
}

/// ISO-8601 timestamps.
///
/// Written as RFC 3339 in UTC with as many fractional digits as needed.
/// Read as RFC 3339, or as a naive `YYYY-MM-DDTHH:MM:SS[.f]` in local time.
pub(crate) mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| de::Error::custom(format!("invalid timestamp '{}'", text)))
    }

    pub fn parse(text: &str) -> Option<DateTime<Utc>> {
        if let Ok(value) = DateTime::parse_from_rfc3339(text) {
            return Some(value.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|local| local.with_timezone(&Utc))
    }
}
