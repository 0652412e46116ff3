use std::fs::File;
use std::io::{self, ErrorKind, Write};

use super::{Action, Command, CommandError};
use crate::core::state::ShellState;

#[derive(Clone)]
pub struct CatCommand;

impl Default for CatCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CatCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CatCommand {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Action, CommandError> {
        if args.is_empty() {
            return Err(CommandError::MissingOperand("cat", "file operand"));
        }

        // A bad file is reported and skipped; the rest still print.
        for arg in args {
            let path = state.resolve(arg);
            let mut file = match File::open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    writeln!(err, "cat: {}: No such file or directory", arg)?;
                    continue;
                }
                Err(_) => {
                    writeln!(err, "cat: {}: Error reading file", arg)?;
                    continue;
                }
            };
            if io::copy(&mut file, out).is_err() {
                writeln!(err, "cat: {}: Error reading file", arg)?;
            }
        }
        Ok(Action::Continue)
    }
}
