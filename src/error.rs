use serde_json::error::Category;
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    /// The quiz definition could not be read.
    FailedRead,
    /// JSON syntax error detected.
    Syntax,
    /// Unexpected JSON data types encountered.
    Data,
    /// The quiz definition lists no questions.
    NoQuestions,
    /// The engine rejected the quiz definition.
    Engine(engine::Error),
}

impl From<std::io::Error> for Error {
    fn from(_: std::io::Error) -> Self {
        Self::FailedRead
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Self::Data,
            Category::Syntax | Category::Eof => Self::Syntax,
            Category::Io => Self::FailedRead,
        }
    }
}

impl From<engine::Error> for Error {
    fn from(err: engine::Error) -> Self {
        Self::Engine(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;
        match self {
            FailedRead => f.write_str("Failed to read the quiz definition."),
            Syntax => f.write_str("Syntax error in quiz JSON detected."),
            Data => f.write_str("Unexpected data types in quiz JSON detected."),
            NoQuestions => f.write_str("The quiz definition has no questions."),
            Engine(err) => write!(f, "Invalid quiz definition: {err}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
