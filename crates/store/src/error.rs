use core::fmt::{self, Display};
use serde_json::error::Category;
use std::io::{self, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The backing storage could not be read or written.
    Io(ErrorKind),
    /// The snapshot could not be encoded as JSON.
    Encode,
    /// The stored data is not a valid snapshot.
    Corrupt,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err.kind())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io => Self::Io(ErrorKind::Other),
            Category::Syntax | Category::Data | Category::Eof => Self::Corrupt,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(kind) => write!(f, "Failed to access the saved session ({kind})."),
            Self::Encode => f.write_str("Failed to encode the session snapshot."),
            Self::Corrupt => f.write_str("The saved session is corrupt."),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
