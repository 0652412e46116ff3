use std::io::Write;

use super::{Action, Command, CommandError};
use crate::core::state::ShellState;

const HELP_LINES: &[(&str, &str)] = &[
    ("cat <file>...", "print file contents"),
    ("cd [dir]", "change the working directory"),
    ("echo [text]", "print text"),
    ("exit [code]", "leave the shell"),
    ("help", "show this list"),
    ("ls [dir]", "list a directory"),
    ("pwd", "print the working directory"),
    ("type <name>", "describe how a name would run"),
];

#[derive(Clone)]
pub struct HelpCommand;

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HelpCommand {
    fn execute(
        &self,
        _args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
        _err: &mut dyn Write,
    ) -> Result<Action, CommandError> {
        writeln!(out, "Builtin commands:")?;
        for (usage, description) in HELP_LINES {
            writeln!(out, "  {:<14} {}", usage, description)?;
        }
        Ok(Action::Continue)
    }
}
