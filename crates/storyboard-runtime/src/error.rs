use std::fmt;
use std::path::PathBuf;

/// Result type for storyboard-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating a storyboard
#[derive(Debug)]
pub enum Error {
    /// Scanner layer error
    Scan(storyboard_scanner::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Writing the generated output failed; the previous file is untouched
    Write { path: PathBuf, source: std::io::Error },

    /// Configuration error
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Scan(err) => write!(f, "Scan error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Scan(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Write { source, .. } => Some(source),
            Error::Config(_) => None,
        }
    }
}

impl From<storyboard_scanner::Error> for Error {
    fn from(err: storyboard_scanner::Error) -> Self {
        Error::Scan(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
