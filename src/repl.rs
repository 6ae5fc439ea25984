use crate::config::SimConfig;
use anyhow::Result;
use gitsim_core::{Command, Outcome, Session, ShellAction};
use std::io::{BufRead, Write};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Front end shared by the interactive shell and script runs
pub struct Repl<'a> {
    session: Session,
    config: &'a SimConfig,
    failures: usize,
}

impl<'a> Repl<'a> {
    pub fn new(session: Session, config: &'a SimConfig) -> Self {
        Self {
            session,
            config,
            failures: 0,
        }
    }

    /// Commands that reported an error so far
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Interactive loop: prompt, read a line, run it, until EOF or `exit`
    pub fn run_interactive<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        writeln!(out, "Git Branching Simulator")?;
        writeln!(out, "Type 'help' for available commands")?;
        writeln!(out)?;
        if self.config.show_graph {
            writeln!(out, "{}\n", self.session.render_graph())?;
        }

        loop {
            write!(out, "$ ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            if !self.step(&line, out)? {
                break;
            }
        }
        Ok(())
    }

    /// Run `script` line by line, echoing each command as the shell would.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn run_script<W: Write>(&mut self, script: &str, out: &mut W) -> Result<()> {
        for line in script.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            writeln!(out, "$ {}", line)?;
            if !self.step(line, out)? {
                break;
            }
        }
        Ok(())
    }

    /// Returns `false` once the session asked to exit
    fn step<W: Write>(&mut self, line: &str, out: &mut W) -> Result<bool> {
        let Some(command) = Command::parse(line) else {
            return Ok(true);
        };
        let redraw = self.config.show_graph && command.is_mutating();
        let outcome = self.session.execute(command);

        if !outcome.success {
            self.failures += 1;
        }
        self.present(&outcome, redraw && outcome.success, out)
    }

    fn present<W: Write>(&self, outcome: &Outcome, redraw: bool, out: &mut W) -> Result<bool> {
        match outcome.action {
            ShellAction::Exit => return Ok(false),
            ShellAction::ClearScreen => write!(out, "{}", CLEAR_SCREEN)?,
            ShellAction::None => {}
        }

        if !outcome.message.is_empty() {
            writeln!(out, "{}", outcome.message)?;
        }
        if redraw {
            writeln!(out)?;
            writeln!(out, "{}", self.session.render_graph())?;
        }
        writeln!(out, "{}", self.session.status_line())?;
        writeln!(out)?;
        Ok(true)
    }
}
