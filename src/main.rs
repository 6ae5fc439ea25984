mod config;
mod repl;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::SimConfig;
use gitsim_core::{Repository, Session};
use repl::Repl;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gitsim")]
#[command(about = "A simulator of Git's branching model", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Do not redraw the commit graph after each change
    #[arg(long, global = true)]
    no_graph: bool,
    /// Disable colored branch labels
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive shell (default)
    Shell {
        /// Repository file to start from
        #[arg(long)]
        load: Option<PathBuf>,
    },
    /// Execute commands from a file, one per line
    Run {
        /// Script with one command per line
        script: PathBuf,
        /// Repository file to start from
        #[arg(long)]
        load: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SimConfig::load(cli.config.as_deref())?;
    if cli.no_graph {
        config.show_graph = false;
    }
    if cli.no_color {
        config.color = false;
    }

    match cli.command.unwrap_or(Commands::Shell { load: None }) {
        Commands::Shell { load } => {
            let session = open_session(&config, load.as_deref())?;
            let stdin = io::stdin();
            Repl::new(session, &config).run_interactive(stdin.lock(), &mut io::stdout())?;
        }
        Commands::Run { script, load } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let session = open_session(&config, load.as_deref())?;

            let mut repl = Repl::new(session, &config);
            repl.run_script(&text, &mut io::stdout())?;
            if repl.failures() > 0 {
                bail!("{} command(s) failed", repl.failures());
            }
        }
    }

    Ok(())
}

fn open_session(config: &SimConfig, load: Option<&Path>) -> Result<Session> {
    let options = config.session_options();
    match load {
        Some(path) => {
            let repo = Repository::load(path)
                .with_context(|| format!("Failed to load repository from {}", path.display()))?;
            Ok(Session::with_repository(repo, options))
        }
        None => Ok(Session::new(options)),
    }
}
