use super::{chars, text::TextLayout, Color};
use crate::core::Dag;
use crate::decor::{Decoration, RefDecorator};
use crate::layout::{Lane, Row, RowBuilder};

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Emit ANSI colors for branch labels
    pub color: bool,
    /// Maximum display width of a commit message
    pub message_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            message_width: 60,
        }
    }
}

/// Plain-text renderer for the commit graph.
///
/// Rows come out newest first; every lane takes two columns so diagonal
/// connectors fit between neighbouring lanes.
pub struct AsciiRenderer {
    options: RenderOptions,
    text: TextLayout,
}

impl AsciiRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            text: TextLayout::new(),
        }
    }

    pub fn render_dag(&self, dag: &Dag, decorator: &RefDecorator) -> String {
        let rows = RowBuilder::new().build_rows(dag);
        self.render(&rows, decorator)
    }

    pub fn render(&self, rows: &[Row], decorator: &RefDecorator) -> String {
        let mut lines = Vec::with_capacity(rows.len() * 2);
        let mut incoming: &[Lane] = &[];

        for row in rows {
            if !row.converging.is_empty() {
                lines.push(self.converge_line(row, incoming));
            }

            lines.push(self.commit_line(row, &decorator.decorate(&row.commit)));

            if !row.forking.is_empty() {
                lines.push(self.fork_line(row));
            }

            incoming = &row.outgoing;
        }

        lines.join("\n")
    }

    fn commit_line(&self, row: &Row, decoration: &Decoration) -> String {
        let mut line: String = row
            .lanes
            .iter()
            .flat_map(|lane| {
                let ch = match lane {
                    Lane::Commit => chars::COMMIT,
                    Lane::Pass => chars::VERTICAL,
                    Lane::Empty => chars::SPACE,
                };
                [ch, chars::SPACE]
            })
            .collect();

        line.push_str(&row.commit.id);

        for branch in &decoration.branches {
            let marker = if branch.is_current { "*" } else { "" };
            let label = format!("({}{})", marker, branch.name);
            line.push(' ');
            if self.options.color && branch.color != Color::Default {
                line.push_str(&branch.color.to_ansi());
                line.push_str(&label);
                line.push_str(Color::RESET);
            } else {
                line.push_str(&label);
            }
        }

        let message = self
            .text
            .truncate_to_width(&row.commit.message, self.options.message_width);
        if !message.is_empty() {
            line.push(' ');
            line.push_str(&message);
        }

        line
    }

    /// Lanes ending at this commit slide left into it.
    ///
    /// Converging lanes always sit right of the commit's lane. A lane further
    /// away than its neighbour runs along `_` until it reaches the commit.
    fn converge_line(&self, row: &Row, incoming: &[Lane]) -> String {
        let mut cells = vec![chars::SPACE; incoming.len().max(1) * 2];

        for (idx, lane) in incoming.iter().enumerate() {
            if *lane == Lane::Pass && !row.converging.contains(&idx) {
                cells[idx * 2] = chars::VERTICAL;
            }
        }
        for &idx in &row.converging {
            cells[idx * 2 - 1] = chars::CONVERGE;
        }
        for &idx in &row.converging {
            fill(&mut cells, row.primary_lane * 2 + 1, idx * 2 - 1, chars::CONVERGE_FILL);
        }

        finish(cells)
    }

    /// Second-parent lanes branch off the commit, joined to its column by `-`
    fn fork_line(&self, row: &Row) -> String {
        let mut cells = vec![chars::SPACE; row.outgoing.len().max(1) * 2 + 1];
        let primary = row.primary_lane;

        for (idx, lane) in row.outgoing.iter().enumerate() {
            if *lane == Lane::Pass && !row.forking.contains(&idx) {
                cells[idx * 2] = chars::VERTICAL;
            }
        }
        for &idx in &row.forking {
            if idx > primary {
                cells[idx * 2 - 1] = chars::FORK_RIGHT;
            } else {
                cells[idx * 2 + 1] = chars::FORK_LEFT;
            }
        }
        for &idx in &row.forking {
            if idx > primary {
                fill(&mut cells, primary * 2 + 1, idx * 2 - 1, chars::FORK_FILL);
            } else {
                fill(&mut cells, idx * 2 + 2, primary * 2, chars::FORK_FILL);
            }
        }

        finish(cells)
    }
}

/// Blank cells in `start..end` become `ch`; lines already drawn there stay.
fn fill(cells: &mut [char], start: usize, end: usize, ch: char) {
    for cell in cells.iter_mut().take(end).skip(start) {
        if *cell == chars::SPACE {
            *cell = ch;
        }
    }
}

fn finish(cells: Vec<char>) -> String {
    let line: String = cells.into_iter().collect();
    line.trim_end().to_string()
}
