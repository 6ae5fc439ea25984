/// An edge from a parent commit to one of its children
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Parent commit id
    pub from: String,
    /// Child commit id
    pub to: String,
    pub edge_type: EdgeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// First-parent link
    Regular,
    /// Second-parent link of a merge commit
    Merge,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            edge_type: EdgeType::Regular,
        }
    }

    pub fn merge(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            edge_type: EdgeType::Merge,
        }
    }
}
