use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    Truncate,
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub path: String,
    pub mode: RedirectMode,
}

impl RedirectTarget {
    /// Opens the target for writing, creating missing parent
    /// directories first. Relative paths resolve against `cwd`, the
    /// shell's working directory, never the process's.
    pub fn open(&self, cwd: &Path) -> Result<File, RedirectError> {
        let path = self.resolved(cwd);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| RedirectError::OpenFailed {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true);
        match self.mode {
            RedirectMode::Truncate => options.truncate(true),
            RedirectMode::Append => options.append(true),
        };
        options.open(&path).map_err(|e| RedirectError::OpenFailed {
            path: self.path.clone(),
            source: e,
        })
    }

    fn resolved(&self, cwd: &Path) -> PathBuf {
        let path = Path::new(&self.path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            cwd.join(path)
        }
    }
}

/// Where a command's stdout and stderr go. `None` means the stream is
/// inherited from the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectSpec {
    pub stdout: Option<RedirectTarget>,
    pub stderr: Option<RedirectTarget>,
}

impl RedirectSpec {
    pub fn open_stdout(&self, cwd: &Path) -> Result<Option<File>, RedirectError> {
        self.stdout.as_ref().map(|t| t.open(cwd)).transpose()
    }

    pub fn open_stderr(&self, cwd: &Path) -> Result<Option<File>, RedirectError> {
        self.stderr.as_ref().map(|t| t.open(cwd)).transpose()
    }
}

/// One parsed command line: the argument vector (index 0 names the
/// command) plus its redirections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub argv: Vec<String>,
    pub redirect: RedirectSpec,
}

#[derive(Debug)]
pub enum RedirectError {
    MissingTarget(String),
    OpenFailed { path: String, source: std::io::Error },
}

impl fmt::Display for RedirectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectError::MissingTarget(op) => {
                write!(f, "syntax error: missing redirection target after '{}'", op)
            }
            RedirectError::OpenFailed { path, source } => write!(f, "{}: {}", path, source),
        }
    }
}

impl std::error::Error for RedirectError {}

fn operator(token: &str) -> Option<(Stream, RedirectMode)> {
    match token {
        ">" | "1>" => Some((Stream::Stdout, RedirectMode::Truncate)),
        ">>" | "1>>" => Some((Stream::Stdout, RedirectMode::Append)),
        "2>" => Some((Stream::Stderr, RedirectMode::Truncate)),
        "2>>" => Some((Stream::Stderr, RedirectMode::Append)),
        _ => None,
    }
}

/// Pulls redirection operator/target pairs out of the token stream.
/// Remaining tokens keep their order; the last target for a stream
/// wins. An operator without a following token is a syntax error.
pub fn extract(tokens: Vec<String>) -> Result<ExecutionRequest, RedirectError> {
    let mut argv = Vec::new();
    let mut redirect = RedirectSpec::default();

    let mut tokens = tokens.into_iter();
    while let Some(token) = tokens.next() {
        let Some((stream, mode)) = operator(&token) else {
            argv.push(token);
            continue;
        };
        let Some(path) = tokens.next() else {
            return Err(RedirectError::MissingTarget(token));
        };
        let target = RedirectTarget { path, mode };
        match stream {
            Stream::Stdout => redirect.stdout = Some(target),
            Stream::Stderr => redirect.stderr = Some(target),
        }
    }

    Ok(ExecutionRequest { argv, redirect })
}
