use std::io::Write;

use super::{Action, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct EchoCommand;

impl Default for EchoCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for EchoCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        out: &mut dyn Write,
        _err: &mut dyn Write,
    ) -> Result<Action, CommandError> {
        writeln!(out, "{}", args.join(" "))?;
        Ok(Action::Continue)
    }
}
