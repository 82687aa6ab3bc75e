use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MacroError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Settings lookup failed: {0}")]
    Settings(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Host error: {0}")]
    Host(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MacroError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MacroError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures that come from the file system rather than the host
    pub fn is_io(&self) -> bool {
        matches!(self, MacroError::Io { .. })
    }
}
