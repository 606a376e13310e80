use core::{
    fmt::{self, Display},
    str::FromStr,
};

/// A user action typed into the terminal. Indices are zero-based; the terminal shows them one-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Select(usize),
    Next,
    Prev,
    GoTo(usize),
    Finish,
    Review,
    Restart,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown,
    BadNumber,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "Type a command or `h` for help.",
            Self::Unknown => "Unknown command. Type `h` for help.",
            Self::BadNumber => "Numbers start at 1.",
        })
    }
}

/// Parses a one-based number into a zero-based index.
fn index(text: &str) -> Result<usize, ParseError> {
    let number: usize = text.parse().map_err(|_| ParseError::BadNumber)?;
    number.checked_sub(1).ok_or(ParseError::BadNumber)
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(ParseError::Empty)?;
        let arg = words.next();
        if words.next().is_some() {
            return Err(ParseError::Unknown);
        }

        Ok(match (head.to_ascii_lowercase().as_str(), arg) {
            ("n" | "next", None) => Self::Next,
            ("p" | "prev", None) => Self::Prev,
            ("g" | "go", Some(arg)) => Self::GoTo(index(arg)?),
            ("f" | "finish", None) => Self::Finish,
            ("r" | "review", None) => Self::Review,
            ("restart", None) => Self::Restart,
            ("h" | "help" | "?", None) => Self::Help,
            ("q" | "quit", None) => Self::Quit,
            (word, None) if word.bytes().all(|b| b.is_ascii_digit()) => Self::Select(index(word)?),
            _ => return Err(ParseError::Unknown),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, ParseError};

    #[test]
    fn parses_selections_as_zero_based() {
        assert_eq!("1".parse(), Ok(Command::Select(0)));
        assert_eq!(" 4 ".parse(), Ok(Command::Select(3)));
        assert_eq!("0".parse::<Command>(), Err(ParseError::BadNumber));
    }

    #[test]
    fn parses_navigation() {
        assert_eq!("n".parse(), Ok(Command::Next));
        assert_eq!("NEXT".parse(), Ok(Command::Next));
        assert_eq!("p".parse(), Ok(Command::Prev));
        assert_eq!("g 3".parse(), Ok(Command::GoTo(2)));
        assert_eq!("go x".parse::<Command>(), Err(ParseError::BadNumber));
        assert_eq!("g".parse::<Command>(), Err(ParseError::Unknown));
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!("f".parse(), Ok(Command::Finish));
        assert_eq!("review".parse(), Ok(Command::Review));
        assert_eq!("restart".parse(), Ok(Command::Restart));
        assert_eq!("?".parse(), Ok(Command::Help));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!("jump".parse::<Command>(), Err(ParseError::Unknown));
        assert_eq!("n 2".parse::<Command>(), Err(ParseError::Unknown));
        assert_eq!("g 1 2".parse::<Command>(), Err(ParseError::Unknown));
    }
}
