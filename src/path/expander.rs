use crate::error::ShellError;
use std::path::{Component, Path, PathBuf};

#[derive(Clone)]
pub struct PathExpander;

impl Default for PathExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    /// Expands a `cd`-style target: `~` and `~/rest` resolve under the
    /// home directory, relative paths resolve against `base`, and the
    /// result is normalized. `base` must be absolute.
    pub fn expand(&self, path: &str, base: &Path) -> Result<PathBuf, ShellError> {
        let raw = if path.starts_with('~') {
            self.expand_tilde(path)?
        } else {
            Path::new(path).to_path_buf()
        };
        let joined = if raw.is_absolute() {
            raw
        } else {
            base.join(raw)
        };
        Ok(Self::normalize(&joined))
    }

    fn expand_tilde(&self, path: &str) -> Result<PathBuf, ShellError> {
        if path.len() == 1 {
            // Just "~"
            return dirs::home_dir().ok_or(ShellError::HomeDirNotFound);
        }
        match path[1..].strip_prefix('/') {
            Some(rest) => {
                // "~/path"
                let mut home = dirs::home_dir().ok_or(ShellError::HomeDirNotFound)?;
                for part in rest.split('/').filter(|p| !p.is_empty()) {
                    home.push(part);
                }
                Ok(home)
            }
            // "~user" forms are not expanded; they fall through as a
            // plain relative path and fail the caller's exists check.
            None => Ok(Path::new(path).to_path_buf()),
        }
    }

    /// Folds `.` and `..` components without consulting the
    /// filesystem, so symlinked directories keep the name the user
    /// travelled through. `..` at the root stays at the root.
    pub fn normalize(path: &Path) -> PathBuf {
        let mut out = PathBuf::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => match out.components().next_back() {
                    Some(Component::Normal(_)) => {
                        out.pop();
                    }
                    Some(Component::RootDir) => {}
                    _ => out.push(".."),
                },
                other => out.push(other),
            }
        }
        out
    }
}
