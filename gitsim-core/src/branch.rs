use crate::commit::CommitId;
use serde::{Deserialize, Serialize};

/// Colors handed out to branches in creation order
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#2196f3", "#4caf50", "#9c27b0", "#ff9800", "#e91e63", "#607d8b",
];

/// A named, mutable pointer to a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    name: String,
    head: CommitId,
    color: String,
}

impl Branch {
    pub(crate) fn new(name: impl Into<String>, head: CommitId, color: impl Into<String>) -> Self {
        Branch {
            name: name.into(),
            head,
            color: color.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn head(&self) -> &CommitId {
        &self.head
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub(crate) fn advance(&mut self, head: CommitId) {
        self.head = head;
    }
}

/// Branch color selection.
///
/// The color of a branch depends only on how many branches existed before it,
/// so the same command sequence always yields the same colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// An empty list falls back to [`DEFAULT_PALETTE`]
    pub fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Palette { colors }
        }
    }

    pub fn color_for(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps_around() {
        let palette = Palette::default();
        assert_eq!(palette.color_for(0), "#2196f3");
        assert_eq!(palette.color_for(5), "#607d8b");
        assert_eq!(palette.color_for(6), "#2196f3");
    }

    #[test]
    fn test_empty_palette_uses_defaults() {
        assert_eq!(Palette::new(Vec::new()), Palette::default());

        let custom = Palette::new(vec!["#000000".to_string()]);
        assert_eq!(custom.color_for(3), "#000000");
    }
}
