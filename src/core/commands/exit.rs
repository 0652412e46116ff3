use std::io::Write;

use super::{Action, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(
        &self,
        args: &[String],
        _state: &mut ShellState,
        _out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Action, CommandError> {
        // Termination happens in the REPL once the sinks are closed,
        // not here.
        let Some(arg) = args.first() else {
            return Ok(Action::Exit(0));
        };
        match arg.parse::<i32>() {
            Ok(code) => Ok(Action::Exit(code)),
            Err(_) => {
                writeln!(err, "exit: {}: numeric argument required", arg)?;
                Ok(Action::Exit(1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn run(args: &[&str]) -> (Action, String) {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut state = ShellState::with_dir(PathBuf::from("/"));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let action = ExitCommand::new()
            .execute(&args, &mut state, &mut out, &mut err)
            .unwrap();
        assert!(out.is_empty());
        (action, String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_exit_without_argument_is_code_zero() {
        assert_eq!(run(&[]), (Action::Exit(0), String::new()));
    }

    #[test]
    fn test_exit_with_numeric_argument() {
        assert_eq!(run(&["0"]), (Action::Exit(0), String::new()));
        assert_eq!(run(&["7"]), (Action::Exit(7), String::new()));
        assert_eq!(run(&["-3"]), (Action::Exit(-3), String::new()));
    }

    #[test]
    fn test_exit_with_bad_argument_reports_and_uses_code_one() {
        let (action, err) = run(&["abc"]);
        assert_eq!(action, Action::Exit(1));
        assert_eq!(err, "exit: abc: numeric argument required\n");
    }

    #[test]
    fn test_exit_ignores_extra_arguments() {
        assert_eq!(run(&["2", "9"]).0, Action::Exit(2));
    }
}
