use std::fmt;

pub mod executor;
pub mod lookup;

pub use executor::ProcessExecutor;

#[derive(Debug)]
pub enum ProcessError {
    Io(std::io::Error),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
