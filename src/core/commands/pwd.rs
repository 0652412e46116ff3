use std::io::Write;

use super::{Action, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct PwdCommand;

impl Default for PwdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(
        &self,
        _args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
        _err: &mut dyn Write,
    ) -> Result<Action, CommandError> {
        // Prints the state verbatim; no canonicalization.
        writeln!(out, "{}", state.cwd().display())?;
        Ok(Action::Continue)
    }
}
