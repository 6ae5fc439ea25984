use crate::branch::Palette;
use crate::command::Command;
use crate::error::PersistError;
use crate::repository::Repository;
use crate::view;
use graph::RenderOptions;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_SAVE_FILE: &str = "git_repo.json";
pub const DEFAULT_COMMIT_MESSAGE: &str = "New commit";

pub const HELP_TEXT: &str = "Available commands:
- commit [message]: Create a new commit
- branch <name>: Create a new branch
- checkout <name>: Switch to another branch
- merge <branch>: Merge another branch into current
- log: Show commit history
- graph: Draw the commit graph
- clear: Clear terminal output
- save [filename]: Save repository to file
- load <filename>: Load repository from file
- help: Show this help message
- exit: Leave the simulator";

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Target of `save` without a filename
    pub default_save_file: PathBuf,
    /// Colors for new branches, also applied to loaded repositories
    pub palette: Palette,
    pub render: RenderOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            default_save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            palette: Palette::default(),
            render: RenderOptions::default(),
        }
    }
}

/// What the front end should do besides printing the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    None,
    ClearScreen,
    Exit,
}

/// Result of one shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    pub action: ShellAction,
}

impl Outcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            action: ShellAction::None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            action: ShellAction::None,
        }
    }

    fn action(action: ShellAction) -> Self {
        Self {
            success: true,
            message: String::new(),
            action,
        }
    }
}

/// Dispatches commands to a repository it owns.
///
/// Every failure comes back as an unsuccessful [`Outcome`]; the session stays
/// usable for the next command.
pub struct Session {
    repo: Repository,
    options: SessionOptions,
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        let repo = Repository::with_palette(options.palette.clone());
        Self { repo, options }
    }

    pub fn with_repository(mut repo: Repository, options: SessionOptions) -> Self {
        repo.set_palette(options.palette.clone());
        Self { repo, options }
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn status_line(&self) -> String {
        format!("Current branch: {}", self.repo.current_branch())
    }

    pub fn render_graph(&self) -> String {
        view::render_graph(&self.repo, self.options.render)
    }

    /// Parse and run one line; blank lines yield `None`
    pub fn execute_line(&mut self, line: &str) -> Option<Outcome> {
        Command::parse(line).map(|command| self.execute(command))
    }

    pub fn execute(&mut self, command: Command) -> Outcome {
        debug!(?command, "executing");

        match command {
            Command::Commit { message } => {
                let message = message.unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string());
                match self.repo.create_commit(message.as_str()) {
                    Ok(id) => Outcome::ok(format!("Created commit {}: {}", id, message)),
                    Err(err) => Outcome::error(format!("Error: {}", err)),
                }
            }
            Command::Branch { name: None } | Command::Checkout { name: None } => {
                Outcome::error("Error: Branch name required")
            }
            Command::Branch { name: Some(name) } => match self.repo.create_branch(&name) {
                Ok(at) => Outcome::ok(format!("Created branch '{}' at commit {}", name, at)),
                Err(err) => Outcome::error(format!("Error: {}", err)),
            },
            Command::Checkout { name: Some(name) } => match self.repo.checkout_branch(&name) {
                Ok(()) => Outcome::ok(format!("Switched to branch '{}'", name)),
                Err(err) => Outcome::error(format!("Error: {}", err)),
            },
            Command::Merge { branch: None } => Outcome::error("Error: Source branch required"),
            Command::Merge { branch: Some(branch) } => match self.repo.merge_branches(&branch) {
                Ok(outcome) => Outcome::ok(outcome.to_string()),
                Err(err) => Outcome::error(format!("Error: {}", err)),
            },
            Command::Log => match self.repo.get_commit_log() {
                Ok(log) => Outcome::ok(log.to_string()),
                Err(_) => Outcome::error("Error: Current branch not found"),
            },
            Command::Graph => Outcome::ok(self.render_graph()),
            Command::Clear => Outcome::action(ShellAction::ClearScreen),
            Command::Save { file } => {
                let path = file
                    .map(PathBuf::from)
                    .unwrap_or_else(|| self.options.default_save_file.clone());
                match self.repo.save(&path) {
                    Ok(()) => Outcome::ok(format!("Repository saved to {}", path.display())),
                    Err(err) => Outcome::error(format!("Error saving repository: {}", err)),
                }
            }
            Command::Load { file: None } => Outcome::error("Error: Filename required"),
            Command::Load { file: Some(file) } => self.load(PathBuf::from(file)),
            Command::Help => Outcome::ok(HELP_TEXT),
            Command::Exit => Outcome::action(ShellAction::Exit),
            Command::Unknown(name) => Outcome::error(format!(
                "Unknown command: {}. Type 'help' for available commands.",
                name
            )),
        }
    }

    fn load(&mut self, path: PathBuf) -> Outcome {
        match Repository::load(&path) {
            Ok(mut repo) => {
                repo.set_palette(self.options.palette.clone());
                self.repo = repo;
                Outcome::ok(format!("Repository loaded from {}", path.display()))
            }
            Err(PersistError::NotFound(_)) => {
                Outcome::error(format!("Error: File {} not found", path.display()))
            }
            Err(err) => Outcome::error(format!("Error loading repository: {}", err)),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
