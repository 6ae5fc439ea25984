use crate::core::{CommitNode, Dag};
use std::collections::HashSet;

/// A lane represents a vertical column in the graph
pub type LaneIdx = usize;

/// Lane state on a commit line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// Empty lane (no line)
    Empty,
    /// Vertical line passing through
    Pass,
    /// This commit occupies this lane
    Commit,
}

/// A row in the graph visualization
#[derive(Debug, Clone)]
pub struct Row {
    pub commit: CommitNode,
    /// Lane holding the commit
    pub primary_lane: LaneIdx,
    /// Lane assignments on the commit line
    pub lanes: Vec<Lane>,
    /// Lanes that end at this commit, drawn above the commit line
    pub converging: Vec<LaneIdx>,
    /// Lanes opened for second parents, drawn below the commit line
    pub forking: Vec<LaneIdx>,
    /// Lanes still carrying history once this row is drawn
    pub outgoing: Vec<Lane>,
}

impl Row {
    pub fn commit_id(&self) -> &str {
        &self.commit.id
    }
}

/// Builds newest-first rows from a DAG.
///
/// Each lane tracks the commit it expects next. A commit takes the first lane
/// waiting for it and hands that lane to its first parent; further parents
/// open new lanes unless some lane already waits for them.
#[derive(Debug, Default)]
pub struct RowBuilder {
    active: Vec<Option<String>>,
}

impl RowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_rows(&mut self, dag: &Dag) -> Vec<Row> {
        self.active.clear();

        Self::topological_order(dag)
            .into_iter()
            .map(|commit| self.build_row(commit))
            .collect()
    }

    fn build_row(&mut self, commit: &CommitNode) -> Row {
        let waiting: Vec<LaneIdx> = self
            .active
            .iter()
            .enumerate()
            .filter(|(_, expected)| expected.as_deref() == Some(commit.id.as_str()))
            .map(|(lane, _)| lane)
            .collect();

        let primary_lane = match waiting.first() {
            Some(&lane) => lane,
            None => self.claim_free_lane(),
        };
        let converging = waiting.iter().skip(1).copied().collect::<Vec<_>>();
        for &lane in &converging {
            self.active[lane] = None;
        }

        let mut lanes: Vec<Lane> = self
            .active
            .iter()
            .enumerate()
            .map(|(lane, expected)| {
                if lane == primary_lane {
                    Lane::Commit
                } else if expected.is_some() {
                    Lane::Pass
                } else {
                    Lane::Empty
                }
            })
            .collect();
        while lanes.last() == Some(&Lane::Empty) {
            lanes.pop();
        }

        self.active[primary_lane] = commit.parents.first().cloned();

        let mut forking = Vec::new();
        for parent in commit.parents.iter().skip(1) {
            if self.active.iter().any(|expected| expected.as_ref() == Some(parent)) {
                continue;
            }
            let lane = self.claim_free_lane();
            self.active[lane] = Some(parent.clone());
            forking.push(lane);
        }

        while matches!(self.active.last(), Some(None)) {
            self.active.pop();
        }

        let outgoing = self
            .active
            .iter()
            .map(|expected| if expected.is_some() { Lane::Pass } else { Lane::Empty })
            .collect();

        Row {
            commit: commit.clone(),
            primary_lane,
            lanes,
            converging,
            forking,
            outgoing,
        }
    }

    /// First empty lane, or a new one at the right edge
    fn claim_free_lane(&mut self) -> LaneIdx {
        match self.active.iter().position(Option::is_none) {
            Some(lane) => lane,
            None => {
                self.active.push(None);
                self.active.len() - 1
            }
        }
    }

    /// Children before parents; ties keep reverse insertion order.
    fn topological_order(dag: &Dag) -> Vec<&CommitNode> {
        let mut sorted = Vec::with_capacity(dag.node_count());
        let mut visited: HashSet<&str> = HashSet::new();

        for start in dag.nodes() {
            if !visited.insert(start.id.as_str()) {
                continue;
            }

            // Iterative post-order walk so long histories cannot exhaust the stack.
            let mut stack: Vec<(&CommitNode, usize)> = vec![(start, 0)];
            while let Some(top) = stack.last_mut() {
                let node = top.0;
                let parent = node.parents.get(top.1);
                top.1 += 1;

                match parent {
                    Some(parent_id) => {
                        if let Some(parent) = dag.get(parent_id) {
                            if visited.insert(parent.id.as_str()) {
                                stack.push((parent, 0));
                            }
                        }
                    }
                    None => {
                        sorted.push(node);
                        stack.pop();
                    }
                }
            }
        }

        sorted.reverse();
        sorted
    }
}
