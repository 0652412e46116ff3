use std::io::Write;

use super::{Action, Command, CommandError};
use crate::core::state::ShellState;
use crate::path::PathExpander;

#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        _out: &mut dyn Write,
        _err: &mut dyn Write,
    ) -> Result<Action, CommandError> {
        let target = args.first().map(|s| s.as_str()).unwrap_or("~");
        let expanded = self
            .path_expander
            .expand(target, state.cwd())
            .map_err(|_| CommandError::HomeNotSet)?;

        // The error carries the path as the user typed it.
        if !expanded.is_dir() {
            return Err(CommandError::NoSuchPath("cd", target.to_string()));
        }

        state.set_cwd(expanded);
        Ok(Action::Continue)
    }
}
