use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input did not reduce to a season code + 2-digit year.
    InvalidTerm(String),
    /// The input did not reduce to a department + catalog number.
    InvalidCourseName(String),
    /// The input did not reduce to a recognized grade token.
    InvalidGrade(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTerm(input) => write!(f, "'{input}' is not a valid term"),
            Self::InvalidCourseName(input) => write!(f, "'{input}' is not a valid course name"),
            Self::InvalidGrade(input) => write!(f, "'{input}' is not a valid grade"),
        }
    }
}

impl std::error::Error for ParseError {}
