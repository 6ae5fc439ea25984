use super::{edge::Edge, node::CommitNode};
use std::collections::HashMap;

/// Directed acyclic graph of commits.
///
/// Nodes keep their insertion order, which callers use as the allocation
/// order of commits. Edges always point from a parent to its child.
#[derive(Debug, Clone, Default)]
pub struct Dag {
    nodes: Vec<CommitNode>,
    /// Quick lookup: commit ID -> position in `nodes`
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    /// Quick lookup: commit ID -> children IDs
    children: HashMap<String, Vec<String>>,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit node to the DAG.
    ///
    /// The first parent yields a regular edge, any further parent a merge edge.
    /// Adding an id that is already present keeps the first node.
    pub fn add_node(&mut self, node: CommitNode) {
        if self.index.contains_key(&node.id) {
            return;
        }
        let id = node.id.clone();

        for (position, parent_id) in node.parents.iter().enumerate() {
            let edge = if position == 0 {
                Edge::new(parent_id.clone(), id.clone())
            } else {
                Edge::merge(parent_id.clone(), id.clone())
            };
            self.edges.push(edge);

            self.children
                .entry(parent_id.clone())
                .or_default()
                .push(id.clone());
        }

        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
    }

    pub fn get(&self, commit_id: &str) -> Option<&CommitNode> {
        self.index.get(commit_id).map(|&slot| &self.nodes[slot])
    }

    pub fn contains(&self, commit_id: &str) -> bool {
        self.index.contains_key(commit_id)
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &CommitNode> {
        self.nodes.iter()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get all root commits (no parents)
    pub fn roots(&self) -> Vec<&CommitNode> {
        self.nodes.iter().filter(|node| node.is_root()).collect()
    }

    /// Get all leaf commits (no children)
    pub fn leaves(&self) -> Vec<&CommitNode> {
        self.nodes
            .iter()
            .filter(|node| !self.children.contains_key(&node.id))
            .collect()
    }

    /// Get children of a commit
    pub fn get_children(&self, commit_id: &str) -> Vec<&CommitNode> {
        self.children
            .get(commit_id)
            .map(|child_ids| child_ids.iter().filter_map(|id| self.get(id)).collect())
            .unwrap_or_default()
    }

    /// Get parents of a commit
    pub fn get_parents(&self, commit_id: &str) -> Vec<&CommitNode> {
        self.get(commit_id)
            .map(|node| node.parents.iter().filter_map(|id| self.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the DAG
    pub fn stats(&self) -> DagStats {
        DagStats {
            total_commits: self.nodes.len(),
            total_edges: self.edges.len(),
            merge_commits: self.nodes.iter().filter(|n| n.is_merge()).count(),
            root_commits: self.roots().len(),
            leaf_commits: self.leaves().len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagStats {
    pub total_commits: usize,
    pub total_edges: usize,
    pub merge_commits: usize,
    pub root_commits: usize,
    pub leaf_commits: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn node(id: &str, parents: &[&str]) -> CommitNode {
        CommitNode::new(id, parents.iter().map(|p| p.to_string()), Utc::now(), id)
    }

    fn diamond() -> Dag {
        let mut dag = Dag::new();
        dag.add_node(node("C0", &[]));
        dag.add_node(node("C1", &["C0"]));
        dag.add_node(node("C2", &["C0"]));
        dag.add_node(node("C3", &["C1", "C2"]));
        dag
    }

    #[test]
    fn test_edges_point_from_parent_to_child() {
        let dag = diamond();

        assert_eq!(dag.edge_count(), 4);
        assert!(dag.edges().contains(&Edge::new("C0", "C1")));
        assert!(dag.edges().contains(&Edge::new("C1", "C3")));
        assert!(dag.edges().contains(&Edge::merge("C2", "C3")));
    }

    #[test]
    fn test_children_and_parents() {
        let dag = diamond();

        let children: Vec<_> = dag.get_children("C0").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(children, vec!["C1", "C2"]);

        let parents: Vec<_> = dag.get_parents("C3").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(parents, vec!["C1", "C2"]);
        assert!(dag.get_parents("missing").is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = diamond().stats();

        assert_eq!(
            stats,
            DagStats {
                total_commits: 4,
                total_edges: 4,
                merge_commits: 1,
                root_commits: 1,
                leaf_commits: 1,
            }
        );
    }

    #[test]
    fn test_nodes_keep_insertion_order() {
        let dag = diamond();
        let ids: Vec<_> = dag.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["C0", "C1", "C2", "C3"]);
    }
}
