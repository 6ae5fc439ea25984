use crate::repository::Repository;
use graph::{AsciiRenderer, BranchLabel, Color, RefDecorator, RenderOptions};

/// Branch labels for every head, with the current branch marked
pub fn decorations(repo: &Repository) -> RefDecorator {
    let mut decorator = RefDecorator::new();
    for branch in repo.branches() {
        decorator.add_branch(
            branch.head().as_str(),
            BranchLabel {
                name: branch.name().to_string(),
                color: Color::from_hex(branch.color()).unwrap_or_default(),
                is_current: branch.name() == repo.current_branch(),
            },
        );
    }
    decorator
}

/// Draw the commit graph of `repo` as text. Reads only.
pub fn render_graph(repo: &Repository, options: RenderOptions) -> String {
    AsciiRenderer::new(options).render_dag(&repo.build_graph(), &decorations(repo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_after_merge() {
        let mut repo = Repository::new();
        repo.create_branch("b").unwrap();
        repo.checkout_branch("b").unwrap();
        repo.create_commit("work").unwrap();
        repo.checkout_branch("master").unwrap();
        repo.merge_branches("b").unwrap();

        let output = render_graph(&repo, RenderOptions::default());

        let expected = [
            "* C2 (*master) Merge branch 'b' into master",
            "|\\",
            "| * C1 (b) work",
            "|/",
            "* C0 Initial commit",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_labels_use_branch_colors() {
        let repo = Repository::new();
        let decorator = decorations(&repo);
        let root = repo.build_graph().get("C0").cloned().unwrap();

        let decoration = decorator.decorate(&root);

        assert_eq!(decoration.branches.len(), 1);
        assert_eq!(decoration.branches[0].color, Color::Rgb(0x21, 0x96, 0xf3));
        assert!(decoration.branches[0].is_current);
    }
}
