use std::env;
use std::ffi::{CString, OsStr};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Resolves a command name the way the launcher runs it: a name with
/// a path separator is taken as a path (relative ones against `cwd`),
/// anything else is searched for along `PATH` in order.
pub fn resolve(name: &str, cwd: &Path) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    if name.contains('/') {
        let candidate = if Path::new(name).is_absolute() {
            PathBuf::from(name)
        } else {
            cwd.join(name)
        };
        return is_executable(&candidate).then_some(candidate);
    }
    search_dirs(&env::var_os("PATH")?, name)
}

/// First executable file named `name` under the `PATH`-formatted
/// directory list, in list order.
pub fn search_dirs(path_var: &OsStr, name: &str) -> Option<PathBuf> {
    env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    let Ok(cpath) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // access(2) checks the real uid, not the effective one.
    unsafe { libc::access(cpath.as_ptr(), libc::X_OK) == 0 }
}
