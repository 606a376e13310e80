use core::fmt::{self, Display};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Navigation target lies outside of the question list.
    OutOfRange,
    /// Selected option does not exist on the current question.
    InvalidOption,
    /// Answers can no longer change once the session is over.
    AlreadyFinished,
    /// A recorded option order does not fit the question it was recorded for.
    InvalidLayout,
    /// The quiz has no questions at all.
    NoQuestions,
    /// A question offers fewer than two options.
    TooFewOptions,
    /// A question's correct index does not point into its options.
    AnswerOutOfRange,
    /// Two questions share the same ID.
    DuplicateQuestion,
    /// Pass threshold is not a fraction in `[0, 1]`.
    InvalidThreshold,
    /// Time limit must be at least one second.
    InvalidTimeLimit,
}

impl Error {
    /// Whether the error stems from a malformed quiz definition (as opposed to a rejected operation).
    pub const fn is_definition(self) -> bool {
        !matches!(self, Self::OutOfRange | Self::InvalidOption | Self::AlreadyFinished | Self::InvalidLayout)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OutOfRange => "Question index is out of range.",
            Self::InvalidOption => "No such option for the current question.",
            Self::AlreadyFinished => "The quiz has already been finished.",
            Self::InvalidLayout => "The saved question layout does not match the quiz.",
            Self::NoQuestions => "The quiz contains no questions.",
            Self::TooFewOptions => "Every question needs at least two options.",
            Self::AnswerOutOfRange => "A correct index does not point to any option.",
            Self::DuplicateQuestion => "Question IDs must be unique.",
            Self::InvalidThreshold => "Pass threshold must be between 0 and 1.",
            Self::InvalidTimeLimit => "Time limit must be at least one second.",
        })
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
