use std::io::Write;

use super::{Action, Command, CommandError, BUILTIN_NAMES};
use crate::core::state::ShellState;
use crate::process::lookup;

#[derive(Clone)]
pub struct TypeCommand;

impl Default for TypeCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for TypeCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
        _err: &mut dyn Write,
    ) -> Result<Action, CommandError> {
        // One name per call keeps failures to one error line.
        let Some(name) = args.first() else {
            return Err(CommandError::MissingOperand("type", "operand"));
        };

        if BUILTIN_NAMES.contains(&name.as_str()) {
            writeln!(out, "{} is a shell builtin", name)?;
        } else if let Some(path) = lookup::resolve(name, state.cwd()) {
            writeln!(out, "{} is {}", name, path.display())?;
        } else {
            return Err(CommandError::NotFound(name.clone()));
        }
        Ok(Action::Continue)
    }
}
