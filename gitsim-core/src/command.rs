/// A shell command after tokenizing.
///
/// Missing required arguments are kept as `None` so the shell can answer
/// with a usage message instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Commit { message: Option<String> },
    Branch { name: Option<String> },
    Checkout { name: Option<String> },
    Merge { branch: Option<String> },
    Log,
    Graph,
    Clear,
    Save { file: Option<String> },
    Load { file: Option<String> },
    Help,
    Exit,
    Unknown(String),
}

impl Command {
    /// Split `line` on whitespace; the first word picks the command,
    /// case-insensitively. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let name = words.next()?.to_lowercase();
        let args: Vec<&str> = words.collect();
        let first = || args.first().map(|arg| arg.to_string());

        let command = match name.as_str() {
            "commit" => Command::Commit {
                message: (!args.is_empty()).then(|| args.join(" ")),
            },
            "branch" => Command::Branch { name: first() },
            "checkout" => Command::Checkout { name: first() },
            "merge" => Command::Merge { branch: first() },
            "log" => Command::Log,
            "graph" => Command::Graph,
            "clear" => Command::Clear,
            "save" => Command::Save { file: first() },
            "load" => Command::Load { file: first() },
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            _ => Command::Unknown(name),
        };
        Some(command)
    }

    /// Whether the command can change repository state
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Commit { .. }
                | Command::Branch { .. }
                | Command::Checkout { .. }
                | Command::Merge { .. }
                | Command::Load { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("   \t "), None);
    }

    #[test]
    fn test_commit_message_joins_words() {
        assert_eq!(
            Command::parse("commit  fix   the build"),
            Some(Command::Commit {
                message: Some("fix the build".to_string())
            })
        );
        assert_eq!(Command::parse("commit"), Some(Command::Commit { message: None }));
    }

    #[test]
    fn test_command_names_are_case_insensitive() {
        assert_eq!(
            Command::parse("CheckOut feature"),
            Some(Command::Checkout {
                name: Some("feature".to_string())
            })
        );
        assert_eq!(Command::parse("LOG"), Some(Command::Log));
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        assert_eq!(
            Command::parse("branch a b"),
            Some(Command::Branch {
                name: Some("a".to_string())
            })
        );
        assert_eq!(Command::parse("merge"), Some(Command::Merge { branch: None }));
    }

    #[test]
    fn test_unknown_command_keeps_lowercased_name() {
        assert_eq!(
            Command::parse("Rebase main"),
            Some(Command::Unknown("rebase".to_string()))
        );
    }
}
