use std::env;
use std::path::{Path, PathBuf};

use crate::error::ShellError;
use crate::path::PathExpander;

/// The shell's working directory. The process-global cwd is never
/// touched; every handler that cares about "where we are" reads this
/// instead, and only a successful `cd` writes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    cwd: PathBuf,
}

impl ShellState {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self::with_dir(env::current_dir()?))
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        ShellState { cwd: dir }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    // Callers must have verified the directory exists; see CdCommand.
    pub fn set_cwd(&mut self, dir: PathBuf) {
        self.cwd = dir;
    }

    /// Resolves a user-supplied path against this state: relative
    /// paths join the working directory, and `.`/`..` segments are
    /// folded away lexically (symlinks are left alone).
    pub fn resolve(&self, input: &str) -> PathBuf {
        let path = Path::new(input);
        if path.is_absolute() {
            PathExpander::normalize(path)
        } else {
            PathExpander::normalize(&self.cwd.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_process_cwd() {
        let state = ShellState::new().unwrap();
        assert_eq!(state.cwd(), env::current_dir().unwrap());
    }

    #[test]
    fn test_resolve_relative_joins_state_dir() {
        let state = ShellState::with_dir(PathBuf::from("/tmp/base"));
        assert_eq!(state.resolve("sub/file"), PathBuf::from("/tmp/base/sub/file"));
    }

    #[test]
    fn test_resolve_absolute_ignores_state_dir() {
        let state = ShellState::with_dir(PathBuf::from("/tmp/base"));
        assert_eq!(state.resolve("/etc/hosts"), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn test_resolve_folds_dot_segments() {
        let state = ShellState::with_dir(PathBuf::from("/tmp/base"));
        assert_eq!(state.resolve("./x/../y"), PathBuf::from("/tmp/base/y"));
        assert_eq!(state.resolve(".."), PathBuf::from("/tmp"));
    }

    #[test]
    fn test_set_cwd_replaces_value() {
        let mut state = ShellState::with_dir(PathBuf::from("/a"));
        state.set_cwd(PathBuf::from("/b"));
        assert_eq!(state.cwd(), Path::new("/b"));
    }
}
