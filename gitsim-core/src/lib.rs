pub mod branch;
pub mod command;
pub mod commit;
pub mod error;
pub mod log;
pub mod merge;
pub mod persist;
pub mod repository;
pub mod shell;
pub mod view;

pub use branch::{Branch, Palette, DEFAULT_PALETTE};
pub use command::Command;
pub use commit::{Commit, CommitId};
pub use error::{IntegrityError, PersistError, RepoError};
pub use log::{CommitLog, LogEntry};
pub use merge::MergeOutcome;
pub use repository::Repository;
pub use shell::{Outcome, Session, SessionOptions, ShellAction, DEFAULT_SAVE_FILE};
pub use view::render_graph;
