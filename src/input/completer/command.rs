use std::{borrow::Cow, collections::BTreeMap, env, fs};

use rustyline::completion::Pair;

use crate::core::commands::BUILTIN_NAMES;

#[derive(Clone)]
pub struct CommandCompleter {
    commands: BTreeMap<Cow<'static, str>, ()>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        let mut completer = Self {
            commands: BTreeMap::new(),
        };
        completer.refresh_commands();
        completer
    }

    /// Rebuilds the candidate set: the builtins plus every file name
    /// reachable through PATH.
    pub fn refresh_commands(&mut self) {
        self.commands.clear();
        self.add_builtin_commands();
        self.add_path_commands();
    }

    fn add_builtin_commands(&mut self) {
        for name in BUILTIN_NAMES {
            self.commands.insert(Cow::Borrowed(*name), ());
        }
    }

    fn add_path_commands(&mut self) {
        if let Some(path_var) = env::var_os("PATH") {
            for path in env::split_paths(&path_var) {
                if let Ok(entries) = fs::read_dir(path) {
                    for entry in entries.filter_map(Result::ok) {
                        if let Ok(file_type) = entry.file_type() {
                            if file_type.is_file() || file_type.is_symlink() {
                                if let Some(name) = entry.file_name().to_str() {
                                    self.commands.insert(Cow::Owned(name.to_string()), ());
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn complete_command(&self, line: &str) -> Vec<Pair> {
        let input = line.trim();
        let mut matches = Vec::new();
        for cmd in self.commands.keys() {
            if cmd.starts_with(input) {
                matches.push(Pair {
                    display: cmd.to_string(),
                    replacement: cmd.to_string(),
                });
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_always_candidates() {
        let completer = CommandCompleter::new();
        for name in BUILTIN_NAMES {
            let matches = completer.complete_command(name);
            assert!(
                matches.iter().any(|p| p.replacement == *name),
                "{} should complete to itself",
                name
            );
        }
    }

    #[test]
    fn test_prefix_filters_candidates() {
        let completer = CommandCompleter::new();
        for pair in completer.complete_command("ec") {
            assert!(pair.replacement.starts_with("ec"));
        }
    }
}
