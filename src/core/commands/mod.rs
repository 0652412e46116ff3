use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Write};

mod cat;
mod cd;
mod echo;
mod exit;
mod help;
mod ls;
mod pwd;
mod type_cmd;

pub use cat::CatCommand;
pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use ls::LsCommand;
pub use pwd::PwdCommand;
pub use type_cmd::TypeCommand;

use crate::core::redirect::{ExecutionRequest, RedirectError};
use crate::core::state::ShellState;
use crate::process::{ProcessError, ProcessExecutor};

/// The closed set of builtin names. `type` and the completer read
/// this; the registry below must stay in step with it.
pub const BUILTIN_NAMES: &[&str] = &["cat", "cd", "echo", "exit", "help", "ls", "pwd", "type"];

#[derive(Debug)]
pub enum CommandError {
    NotFound(String),
    NoSuchPath(&'static str, String),
    NotADirectory(&'static str, String),
    MissingOperand(&'static str, &'static str),
    HomeNotSet,
    Io(std::io::Error),
    Redirect(RedirectError),
    Process(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::NotFound(name) => write!(f, "{}: not found", name),
            CommandError::NoSuchPath(cmd, path) => {
                write!(f, "{}: {}: No such file or directory", cmd, path)
            }
            CommandError::NotADirectory(cmd, path) => {
                write!(f, "{}: {}: Not a directory", cmd, path)
            }
            CommandError::MissingOperand(cmd, what) => write!(f, "{}: missing {}", cmd, what),
            CommandError::HomeNotSet => write!(f, "cd: HOME not set"),
            CommandError::Io(e) => write!(f, "{}", e),
            CommandError::Redirect(e) => write!(f, "{}", e),
            CommandError::Process(e) => write!(f, "{}", e),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::Io(err)
    }
}

impl From<RedirectError> for CommandError {
    fn from(err: RedirectError) -> Self {
        CommandError::Redirect(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::Process(err)
    }
}

impl std::error::Error for CommandError {}

/// What the REPL does after a command: keep looping, or stop with an
/// exit code. Only the `exit` builtin produces the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Exit(i32),
}

pub trait Command {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Action, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cat(CatCommand),
    Cd(CdCommand),
    Echo(EchoCommand),
    Exit(ExitCommand),
    Help(HelpCommand),
    Ls(LsCommand),
    Pwd(PwdCommand),
    Type(TypeCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        args: &[String],
        state: &mut ShellState,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Action, CommandError> {
        match self {
            CommandType::Cat(cmd) => cmd.execute(args, state, out, err),
            CommandType::Cd(cmd) => cmd.execute(args, state, out, err),
            CommandType::Echo(cmd) => cmd.execute(args, state, out, err),
            CommandType::Exit(cmd) => cmd.execute(args, state, out, err),
            CommandType::Help(cmd) => cmd.execute(args, state, out, err),
            CommandType::Ls(cmd) => cmd.execute(args, state, out, err),
            CommandType::Pwd(cmd) => cmd.execute(args, state, out, err),
            CommandType::Type(cmd) => cmd.execute(args, state, out, err),
        }
    }
}

#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    process_executor: ProcessExecutor,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cat", CommandType::Cat(CatCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("echo", CommandType::Echo(EchoCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("help", CommandType::Help(HelpCommand::new()));
        commands.insert("ls", CommandType::Ls(LsCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand::new()));
        commands.insert("type", CommandType::Type(TypeCommand::new()));

        CommandExecutor {
            commands,
            process_executor: ProcessExecutor::new(),
        }
    }

    /// Runs one execution request. Handler failures become exactly one
    /// line on the active error sink and the loop keeps going; only a
    /// sink that cannot be opened comes back as `Err`.
    pub fn execute(
        &self,
        request: &ExecutionRequest,
        state: &mut ShellState,
    ) -> Result<Action, CommandError> {
        let Some(name) = request.argv.first() else {
            return Ok(Action::Continue);
        };

        // Sinks open before anything runs, so a truncating redirection
        // empties its target even when the command then fails.
        let out_file = request.redirect.open_stdout(state.cwd())?;
        let err_file = request.redirect.open_stderr(state.cwd())?;

        match self.commands.get(name.as_str()) {
            Some(builtin) => Self::run_builtin(builtin, request, state, out_file, err_file),
            None => {
                self.process_executor
                    .spawn_process(&request.argv, state.cwd(), out_file, err_file)?;
                Ok(Action::Continue)
            }
        }
    }

    // Scopes the sinks to one call: files (or the shell's own streams)
    // are handed to the builtin as plain writers and flushed before
    // returning, whatever the handler did.
    fn run_builtin(
        builtin: &CommandType,
        request: &ExecutionRequest,
        state: &mut ShellState,
        mut out_file: Option<File>,
        mut err_file: Option<File>,
    ) -> Result<Action, CommandError> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut out_lock;
        let mut err_lock;

        let out: &mut dyn Write = match out_file.as_mut() {
            Some(file) => file,
            None => {
                out_lock = stdout.lock();
                &mut out_lock
            }
        };
        let err: &mut dyn Write = match err_file.as_mut() {
            Some(file) => file,
            None => {
                err_lock = stderr.lock();
                &mut err_lock
            }
        };

        let action = match builtin.execute(&request.argv[1..], state, out, err) {
            Ok(action) => action,
            Err(e) => {
                let _ = writeln!(err, "{}", e);
                Action::Continue
            }
        };

        let _ = out.flush();
        let _ = err.flush();
        Ok(action)
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::redirect::extract;
    use crate::core::tokenizer::tokenize;
    use std::fs;
    use std::path::Path;

    fn request(line: &str) -> ExecutionRequest {
        extract(tokenize(line)).unwrap()
    }

    fn run(executor: &CommandExecutor, state: &mut ShellState, line: &str) -> Action {
        executor.execute(&request(line), state).unwrap()
    }

    #[test]
    fn test_builtin_detection() {
        let executor = CommandExecutor::new();
        for name in BUILTIN_NAMES {
            assert!(executor.is_builtin(name));
        }
        assert_eq!(executor.commands.len(), BUILTIN_NAMES.len());
        assert!(!executor.is_builtin("sh"));
        assert!(!executor.is_builtin(""));
    }

    #[test]
    fn test_builtin_stdout_redirects_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        run(&executor, &mut state, "echo hello there > out.txt");
        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "hello there\n"
        );
    }

    #[test]
    fn test_truncate_leaves_one_line_after_two_runs() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        run(&executor, &mut state, "echo foo > out.txt");
        run(&executor, &mut state, "echo foo > out.txt");
        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "foo\n"
        );
    }

    #[test]
    fn test_append_accumulates_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        run(&executor, &mut state, "echo one >> log.txt");
        run(&executor, &mut state, "echo two >> log.txt");
        assert_eq!(
            fs::read_to_string(dir.path().join("log.txt")).unwrap(),
            "one\ntwo\n"
        );
    }

    #[test]
    fn test_builtin_error_goes_to_redirected_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        let action = run(&executor, &mut state, "cd /definitely/missing 2> err.txt");
        assert_eq!(action, Action::Continue);
        assert_eq!(
            fs::read_to_string(dir.path().join("err.txt")).unwrap(),
            "cd: /definitely/missing: No such file or directory\n"
        );
        // The failed cd must not move the state.
        assert_eq!(state.cwd(), dir.path());
    }

    #[test]
    fn test_truncate_happens_even_when_the_command_fails() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        fs::write(dir.path().join("out.txt"), "stale contents\n").unwrap();
        run(&executor, &mut state, "cd /definitely/missing > out.txt 2> err.txt");
        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_external_not_found_message_lands_in_redirected_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        run(&executor, &mut state, "zzz-no-such-command 2> err.txt");
        assert_eq!(
            fs::read_to_string(dir.path().join("err.txt")).unwrap(),
            "zzz-no-such-command: command not found\n"
        );
    }

    #[test]
    fn test_external_command_runs_with_redirection() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        run(&executor, &mut state, "sh -c 'printf external' > out.txt");
        assert_eq!(
            fs::read_to_string(dir.path().join("out.txt")).unwrap(),
            "external"
        );
    }

    #[test]
    fn test_exit_action_reaches_the_caller() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        assert_eq!(run(&executor, &mut state, "exit 7"), Action::Exit(7));
        assert_eq!(run(&executor, &mut state, "exit"), Action::Exit(0));
    }

    #[test]
    fn test_unopenable_sink_aborts_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        // A regular file where a parent directory is needed.
        fs::write(dir.path().join("blocker"), "").unwrap();
        let result = executor.execute(&request("echo hi > blocker/out.txt"), &mut state);
        assert!(matches!(
            result,
            Err(CommandError::Redirect(RedirectError::OpenFailed { .. }))
        ));
        assert!(!dir.path().join("blocker").is_dir());
    }

    #[test]
    fn test_empty_argv_is_not_dispatched() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new();
        let mut state = ShellState::with_dir(dir.path().to_path_buf());

        let empty = ExecutionRequest {
            argv: Vec::new(),
            redirect: Default::default(),
        };
        assert_eq!(
            executor.execute(&empty, &mut state).unwrap(),
            Action::Continue
        );
        assert_eq!(state.cwd(), Path::new(dir.path()));
    }
}
