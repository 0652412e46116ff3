use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

#[derive(Clone)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    /// Completes `incomplete` against the filesystem. Relative input
    /// searches under `base` while the candidates keep the form the
    /// user typed; directories gain a trailing slash, files a trailing
    /// space.
    pub fn complete_path(&self, incomplete: &str, base: &Path) -> Vec<Pair> {
        let (typed_dir, file_prefix) = Self::split_input(incomplete);
        let search_dir = if Path::new(&typed_dir).is_absolute() {
            PathBuf::from(&typed_dir)
        } else if typed_dir.is_empty() {
            base.to_path_buf()
        } else {
            base.join(&typed_dir)
        };

        Self::matches_in(&search_dir, &typed_dir, &file_prefix)
    }

    // Everything up to and including the final slash, then the prefix
    // still being typed.
    fn split_input(incomplete: &str) -> (String, String) {
        match incomplete.rfind('/') {
            Some(idx) => (
                incomplete[..=idx].to_string(),
                incomplete[idx + 1..].to_string(),
            ),
            None => (String::new(), incomplete.to_string()),
        }
    }

    fn matches_in(search_dir: &Path, typed_dir: &str, file_prefix: &str) -> Vec<Pair> {
        let mut matches = Vec::new();

        if let Ok(entries) = fs::read_dir(search_dir) {
            for entry in entries.filter_map(Result::ok) {
                if let Some(name) = entry.file_name().to_str() {
                    if name.starts_with(file_prefix) {
                        matches.push(Self::pair_for(typed_dir, name, entry.path().is_dir()));
                    }
                }
            }
        }

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    fn pair_for(typed_dir: &str, name: &str, is_dir: bool) -> Pair {
        let completed = format!("{}{}", typed_dir, name);
        if is_dir {
            Pair {
                display: format!("{}/", completed),
                replacement: format!("{}/", completed),
            }
        } else {
            Pair {
                display: completed.clone(),
                replacement: format!("{} ", completed),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|p| p.replacement).collect()
    }

    #[test]
    fn test_relative_input_searches_the_given_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let completer = PathCompleter::new();
        let matches = replacements(completer.complete_path("n", dir.path()));
        assert_eq!(matches, ["nested/", "notes.txt "]);
    }

    #[test]
    fn test_typed_directory_prefix_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.txt"), "").unwrap();

        let completer = PathCompleter::new();
        let matches = replacements(completer.complete_path("sub/in", dir.path()));
        assert_eq!(matches, ["sub/inner.txt "]);
    }

    #[test]
    fn test_absolute_input_ignores_the_base() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        fs::write(other.path().join("target.txt"), "").unwrap();

        let completer = PathCompleter::new();
        let typed = format!("{}/targ", other.path().display());
        let matches = replacements(completer.complete_path(&typed, dir.path()));
        assert_eq!(matches, [format!("{}/target.txt ", other.path().display())]);
    }

    #[test]
    fn test_empty_input_lists_the_base_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("only.txt"), "").unwrap();

        let completer = PathCompleter::new();
        let matches = replacements(completer.complete_path("", dir.path()));
        assert_eq!(matches, ["only.txt "]);
    }

    #[test]
    fn test_no_match_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let completer = PathCompleter::new();
        assert!(completer.complete_path("zzz", dir.path()).is_empty());
    }
}
