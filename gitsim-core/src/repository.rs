use crate::branch::{Branch, Palette};
use crate::commit::{Commit, CommitId};
use crate::error::RepoError;
use graph::{CommitNode, Dag};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

pub const ROOT_MESSAGE: &str = "Initial commit";
pub const DEFAULT_BRANCH: &str = "master";

/// The commit graph, the branch pointers and the current branch.
///
/// Commits are append-only and kept in allocation order. Branches are never
/// removed; only their heads move. `current_branch` always names an existing
/// branch unless the repository was assembled from inconsistent parts, which
/// every operation still checks for.
#[derive(Debug, Clone, PartialEq)]
pub struct Repository {
    commits: Vec<Commit>,
    index: HashMap<CommitId, usize>,
    branches: BTreeMap<String, Branch>,
    current_branch: String,
    palette: Palette,
}

impl Repository {
    /// A repository holding only `C0` and `master`
    pub fn new() -> Self {
        Self::with_palette(Palette::default())
    }

    pub fn with_palette(palette: Palette) -> Self {
        let root = Commit::new(CommitId::from_sequence(0), ROOT_MESSAGE, None, None);
        let master = Branch::new(DEFAULT_BRANCH, root.id().clone(), palette.color_for(0));

        let mut repo = Repository {
            commits: Vec::new(),
            index: HashMap::new(),
            branches: BTreeMap::new(),
            current_branch: DEFAULT_BRANCH.to_string(),
            palette,
        };
        repo.insert_commit(root);
        repo.branches.insert(DEFAULT_BRANCH.to_string(), master);
        repo
    }

    /// Reassemble a repository from already validated parts
    pub(crate) fn from_parts(
        commits: Vec<Commit>,
        branches: BTreeMap<String, Branch>,
        current_branch: String,
    ) -> Self {
        let mut repo = Repository {
            commits: Vec::with_capacity(commits.len()),
            index: HashMap::with_capacity(commits.len()),
            branches,
            current_branch,
            palette: Palette::default(),
        };
        for commit in commits {
            repo.insert_commit(commit);
        }
        repo
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Replace the palette used for branches created from now on
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Commits in allocation order
    pub fn commits(&self) -> impl Iterator<Item = &Commit> {
        self.commits.iter()
    }

    pub fn commit(&self, id: &str) -> Option<&Commit> {
        self.index.get(id).map(|&slot| &self.commits[slot])
    }

    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Branches ordered by name
    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.values()
    }

    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branches.get(name)
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    /// Head of the current branch
    pub fn head(&self) -> Option<&CommitId> {
        self.branches.get(&self.current_branch).map(Branch::head)
    }

    /// Record a commit on the current branch and advance its head
    pub fn create_commit(&mut self, message: impl Into<String>) -> Result<CommitId, RepoError> {
        let parent = self.resolve_current()?.head().clone();
        let id = self.next_commit_id();
        let commit = Commit::new(id.clone(), message, Some(parent), None);

        debug!(commit = %id, parent = ?commit.parent().map(CommitId::as_str), branch = %self.current_branch, "created commit");
        self.insert_commit(commit);
        self.advance_current(id.clone())?;
        Ok(id)
    }

    /// Create a branch at the current head.
    ///
    /// Returns the commit the new branch points at.
    pub fn create_branch(&mut self, name: &str) -> Result<CommitId, RepoError> {
        if self.branches.contains_key(name) {
            return Err(RepoError::BranchExists(name.to_string()));
        }

        let head = self.resolve_current()?.head().clone();
        let color = self.palette.color_for(self.branches.len()).to_string();
        self.branches
            .insert(name.to_string(), Branch::new(name, head.clone(), color));

        debug!(branch = %name, at = %head, "created branch");
        Ok(head)
    }

    /// Make `name` the current branch. Commits and heads are not touched.
    pub fn checkout_branch(&mut self, name: &str) -> Result<(), RepoError> {
        if !self.branches.contains_key(name) {
            return Err(RepoError::BranchNotFound(name.to_string()));
        }

        self.current_branch = name.to_string();
        debug!(branch = %name, "checked out branch");
        Ok(())
    }

    /// Project the commits into a DAG for rendering.
    ///
    /// Edges run from each parent to its child; a merge commit contributes a
    /// second, merge-typed edge from its second parent.
    pub fn build_graph(&self) -> Dag {
        let mut dag = Dag::new();
        for commit in &self.commits {
            dag.add_node(CommitNode::new(
                commit.id().as_str(),
                commit.parents().map(|p| p.as_str().to_string()),
                commit.timestamp(),
                commit.message(),
            ));
        }
        dag
    }

    pub(crate) fn resolve_current(&self) -> Result<&Branch, RepoError> {
        self.branches
            .get(&self.current_branch)
            .ok_or_else(|| RepoError::CurrentBranchMissing(self.current_branch.clone()))
    }

    pub(crate) fn advance_current(&mut self, head: CommitId) -> Result<(), RepoError> {
        let current = self.current_branch.clone();
        self.branches
            .get_mut(&current)
            .ok_or(RepoError::CurrentBranchMissing(current))?
            .advance(head);
        Ok(())
    }

    /// `C<count>`, skipping ahead if a loaded history already used that id
    pub(crate) fn next_commit_id(&self) -> CommitId {
        let mut sequence = self.commits.len();
        loop {
            let id = CommitId::from_sequence(sequence);
            if !self.index.contains_key(&id) {
                return id;
            }
            sequence += 1;
        }
    }

    pub(crate) fn insert_commit(&mut self, commit: Commit) {
        self.index.insert(commit.id().clone(), self.commits.len());
        self.commits.push(commit);
    }

    #[cfg(test)]
    pub(crate) fn force_current_branch(&mut self, name: &str) {
        self.current_branch = name.to_string();
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch_names(repo: &Repository) -> Vec<&str> {
        repo.branches().map(Branch::name).collect()
    }

    #[test]
    fn test_initial_repository() {
        let repo = Repository::new();

        assert_eq!(repo.commit_count(), 1);
        let root = repo.commit("C0").unwrap();
        assert_eq!(root.message(), "Initial commit");
        assert!(root.parent().is_none());
        assert!(root.second_parent().is_none());

        assert_eq!(branch_names(&repo), vec!["master"]);
        assert_eq!(repo.branch("master").unwrap().head(), &"C0");
        assert_eq!(repo.current_branch(), "master");
    }

    #[test]
    fn test_create_commit_advances_current_branch() {
        let mut repo = Repository::new();

        let id = repo.create_commit("x").unwrap();

        assert_eq!(id, "C1");
        let commit = repo.commit("C1").unwrap();
        assert_eq!(commit.parent().unwrap(), &"C0");
        assert_eq!(commit.message(), "x");
        assert_eq!(repo.branch("master").unwrap().head(), &"C1");
        assert_eq!(repo.head().unwrap(), &"C1");
    }

    #[test]
    fn test_commit_ids_increase_and_never_collide() {
        let mut repo = Repository::new();
        repo.create_branch("side").unwrap();
        for i in 0..5 {
            repo.create_commit(format!("master {i}")).unwrap();
            repo.checkout_branch("side").unwrap();
            repo.create_commit(format!("side {i}")).unwrap();
            repo.checkout_branch("master").unwrap();
        }
        repo.merge_branches("side").unwrap();

        let sequences: Vec<u64> = repo.commits().map(|c| c.id().sequence().unwrap()).collect();
        assert_eq!(sequences, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_create_branch_at_current_head() {
        let mut repo = Repository::new();
        repo.create_commit("one").unwrap();

        let at = repo.create_branch("feature").unwrap();

        assert_eq!(at, "C1");
        let feature = repo.branch("feature").unwrap();
        assert_eq!(feature.head(), &"C1");
        assert_eq!(feature.color(), "#4caf50");
        // Creating a branch does not switch to it
        assert_eq!(repo.current_branch(), "master");
    }

    #[test]
    fn test_duplicate_branch_is_rejected_without_side_effects() {
        let mut repo = Repository::new();
        repo.create_branch("feature").unwrap();
        let before = repo.clone();

        let err = repo.create_branch("feature").unwrap_err();

        assert_eq!(err, RepoError::BranchExists("feature".to_string()));
        assert_eq!(err.to_string(), "Branch 'feature' already exists");
        assert_eq!(repo, before);
    }

    #[test]
    fn test_branch_heads_are_independent() {
        let mut repo = Repository::new();
        repo.create_branch("feature").unwrap();

        repo.create_commit("only on master").unwrap();

        assert_eq!(repo.branch("master").unwrap().head(), &"C1");
        assert_eq!(repo.branch("feature").unwrap().head(), &"C0");
    }

    #[test]
    fn test_checkout_unknown_branch_keeps_current() {
        let mut repo = Repository::new();

        let err = repo.checkout_branch("nonexistent").unwrap_err();

        assert_eq!(err.to_string(), "Branch 'nonexistent' not found");
        assert_eq!(repo.current_branch(), "master");
    }

    #[test]
    fn test_checkout_switches_without_moving_commits() {
        let mut repo = Repository::new();
        repo.create_branch("feature").unwrap();

        repo.checkout_branch("feature").unwrap();
        let id = repo.create_commit("on feature").unwrap();

        assert_eq!(repo.current_branch(), "feature");
        assert_eq!(repo.branch("feature").unwrap().head(), &id);
        assert_eq!(repo.branch("master").unwrap().head(), &"C0");
        assert_eq!(repo.commit_count(), 2);
    }

    #[test]
    fn test_missing_current_branch_is_reported() {
        let mut repo = Repository::new();
        repo.force_current_branch("ghost");

        let err = repo.create_commit("lost").unwrap_err();
        assert_eq!(err.to_string(), "Current branch 'ghost' not found");
        assert_eq!(repo.commit_count(), 1);

        assert!(matches!(
            repo.create_branch("other"),
            Err(RepoError::CurrentBranchMissing(_))
        ));
        assert!(repo.branch("other").is_none());
    }

    #[test]
    fn test_build_graph_has_edge_per_parent_link() {
        let mut repo = Repository::new();
        repo.create_branch("b").unwrap();
        repo.checkout_branch("b").unwrap();
        repo.create_commit("work").unwrap();
        repo.checkout_branch("master").unwrap();
        repo.create_commit("main work").unwrap();
        repo.merge_branches("b").unwrap();

        let dag = repo.build_graph();

        assert_eq!(dag.node_count(), 4);
        assert_eq!(dag.edge_count(), 4);
        assert!(dag.edges().contains(&graph::Edge::new("C0", "C1")));
        assert!(dag.edges().contains(&graph::Edge::new("C0", "C2")));
        assert!(dag.edges().contains(&graph::Edge::new("C2", "C3")));
        assert!(dag.edges().contains(&graph::Edge::merge("C1", "C3")));
        assert_eq!(dag.stats().merge_commits, 1);
    }
}
