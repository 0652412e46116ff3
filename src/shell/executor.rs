use crate::core::commands::{Action, CommandExecutor};
use crate::core::redirect;
use crate::core::state::ShellState;
use crate::core::tokenizer;
use crate::error::ShellError;

/// Takes one raw line through tokenizing, redirection parsing and
/// dispatch. Kept apart from `Shell` so the full pipeline runs in
/// tests without a terminal or a signal handler.
pub(crate) fn dispatch_line(
    executor: &CommandExecutor,
    state: &mut ShellState,
    line: &str,
) -> Result<Action, ShellError> {
    if line.trim().is_empty() {
        return Ok(Action::Continue);
    }

    let tokens = tokenizer::tokenize(line);
    let request = redirect::extract(tokens)?;
    if request.argv.is_empty() {
        // Redirections with no command run nothing and open nothing.
        return Ok(Action::Continue);
    }

    Ok(executor.execute(&request, state)?)
}

pub(crate) trait CommandHandler {
    fn execute_line(&mut self, line: &str) -> Result<Action, ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_line(&mut self, line: &str) -> Result<Action, ShellError> {
        dispatch_line(&self.executor, &mut self.state, line)
    }
}
