use std::fmt;
use std::path::PathBuf;

/// Result type for storyboard-scanner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a scan. Per-file read failures are logged and skipped instead.
#[derive(Debug)]
pub enum Error {
    /// Source root does not exist or is not a directory
    RootNotFound(PathBuf),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RootNotFound(path) => {
                write!(f, "Source directory not found: {}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {}
