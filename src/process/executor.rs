use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use super::{lookup, ProcessError};

#[derive(Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        ProcessExecutor
    }

    /// Runs an external command and waits for it. `None` sinks mean
    /// the child inherits the shell's streams; stdin is always
    /// inherited. Resolution and spawn failures come back as
    /// `<name>: command not found` on the error sink rather than as
    /// an `Err`.
    pub fn spawn_process(
        &self,
        argv: &[String],
        cwd: &Path,
        stdout: Option<File>,
        mut stderr: Option<File>,
    ) -> Result<(), ProcessError> {
        let Some(name) = argv.first() else {
            return Ok(());
        };

        let Some(program) = lookup::resolve(name, cwd) else {
            return Self::report_not_found(name, stderr.as_mut());
        };

        let child_err = match stderr.as_ref() {
            // Cloned so a spawn failure can still be written into the
            // redirected file afterwards.
            Some(file) => Stdio::from(file.try_clone()?),
            None => Stdio::inherit(),
        };

        let mut command = Command::new(&program);
        command
            .args(&argv[1..])
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(match stdout {
                Some(file) => Stdio::from(file),
                None => Stdio::inherit(),
            })
            .stderr(child_err);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(_) => return Self::report_not_found(name, stderr.as_mut()),
        };

        // Block until the child exits; the status is not inspected.
        let _status = child.wait()?;
        Ok(())
    }

    fn report_not_found(name: &str, stderr: Option<&mut File>) -> Result<(), ProcessError> {
        match stderr {
            Some(file) => {
                writeln!(file, "{}: command not found", name)?;
                file.flush()?;
            }
            None => eprintln!("{}: command not found", name),
        }
        Ok(())
    }
}
