use crate::core::CommitNode;
use crate::render::Color;
use std::collections::HashMap;

/// A branch name drawn next to the commit it points at
#[derive(Debug, Clone, PartialEq)]
pub struct BranchLabel {
    pub name: String,
    pub color: Color,
    pub is_current: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoration {
    pub branches: Vec<BranchLabel>,
}

/// Collects branch heads so rows can be labelled without touching the repository
#[derive(Debug, Default)]
pub struct RefDecorator {
    branches: HashMap<String, Vec<BranchLabel>>,
}

impl RefDecorator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_branch(&mut self, commit_id: impl Into<String>, label: BranchLabel) {
        self.branches.entry(commit_id.into()).or_default().push(label);
    }

    pub fn decorate(&self, commit: &CommitNode) -> Decoration {
        let mut branches = self.branches.get(&commit.id).cloned().unwrap_or_default();
        // Current branch first, then alphabetical
        branches.sort_by(|a, b| b.is_current.cmp(&a.is_current).then_with(|| a.name.cmp(&b.name)));

        Decoration { branches }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn label(name: &str, is_current: bool) -> BranchLabel {
        BranchLabel {
            name: name.to_string(),
            color: Color::Default,
            is_current,
        }
    }

    #[test]
    fn test_current_branch_is_listed_first() {
        let commit = CommitNode::new("C1", vec!["C0".to_string()], Utc::now(), "work");
        let mut decorator = RefDecorator::new();
        decorator.add_branch("C1", label("zeta", false));
        decorator.add_branch("C1", label("alpha", false));
        decorator.add_branch("C1", label("master", true));

        let decoration = decorator.decorate(&commit);

        let names: Vec<_> = decoration.branches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["master", "alpha", "zeta"]);
    }

    #[test]
    fn test_undecorated_commit() {
        let commit = CommitNode::new("C3", Vec::new(), Utc::now(), "root");
        let decoration = RefDecorator::new().decorate(&commit);
        assert_eq!(decoration, Decoration::default());
    }
}
