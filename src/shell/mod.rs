use rustyline::{config::Configurer, history::FileHistory, Editor};

mod executor;

use crate::{
    core::{
        commands::{Action, CommandExecutor},
        state::ShellState,
    },
    error::ShellError,
    flags::Flags,
    input::ShellCompleter,
};

use executor::CommandHandler;

pub struct Shell {
    pub(crate) editor: Editor<ShellCompleter, FileHistory>,
    pub(crate) state: ShellState,
    pub(crate) executor: CommandExecutor,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let mut completer = ShellCompleter::new();
        completer.refresh_commands();

        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(completer));
        editor.set_auto_add_history(true);

        let state = ShellState::new()?;
        if let Some(helper) = editor.helper_mut() {
            helper.set_current_dir(state.cwd().to_path_buf());
        }

        // Keep the shell itself alive on ctrl-c; spawned children are
        // left with the default disposition and die on their own.
        ctrlc::set_handler(move || {
            println!("\nUse 'exit' to exit the shell");
        })?;

        Ok(Shell {
            editor,
            state,
            executor: CommandExecutor::new(),
            flags,
        })
    }

    /// The read-eval loop. Returns the shell's exit code: the argument
    /// of `exit`, or 0 on end of input.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        loop {
            match self.editor.readline("$ ") {
                Ok(line) => match self.execute_line(&line) {
                    Ok(Action::Exit(code)) => return Ok(code),
                    Ok(Action::Continue) => {
                        // Completion resolves relative paths against the
                        // shell's directory, so keep the helper in step.
                        if let Some(helper) = self.editor.helper_mut() {
                            helper.set_current_dir(self.state.cwd().to_path_buf());
                        }
                    }
                    Err(e) => {
                        if !self.flags.is_set("quiet") {
                            eprintln!("{}", e);
                        }
                    }
                },
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    if !self.flags.is_set("quiet") {
                        println!("^C");
                    }
                    continue;
                }
                Err(rustyline::error::ReadlineError::Eof) => return Ok(0),
                Err(e) => return Err(e.into()),
            }
        }
    }
}
