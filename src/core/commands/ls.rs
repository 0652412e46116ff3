use std::fs;
use std::io::Write;

use super::{Action, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct LsCommand;

impl Default for LsCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl LsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for LsCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
        _err: &mut dyn Write,
    ) -> Result<Action, CommandError> {
        let typed = args.first().map(|s| s.as_str()).unwrap_or(".");
        let path = state.resolve(typed);
        if !path.exists() {
            return Err(CommandError::NoSuchPath("ls", typed.to_string()));
        }
        if !path.is_dir() {
            return Err(CommandError::NotADirectory("ls", typed.to_string()));
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&path)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        for name in names {
            writeln!(out, "{}", name)?;
        }
        Ok(Action::Continue)
    }
}
