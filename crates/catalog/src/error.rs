use std::fmt;

use gradcheck_core::{CourseName, Term};

/// Error type for catalog operations.
///
/// The first four variants are resolution outcomes the rule engine turns
/// into claim annotations; `Network`/`Malformed`/`Config` are infrastructure
/// failures.
#[derive(Debug, Clone)]
pub enum CatalogError {
    /// The service has no data for the term at all.
    TermNotFound(Term),
    /// The department had no offerings that term.
    DeptNotFound { dept: String, term: Term },
    /// No offering in the department matched the catalog number.
    ClassNotFound { course: CourseName, term: Term },
    /// A future-term claim with no historical offering in any known term.
    NoClassInfo { course: CourseName, term: Term },
    /// Transport failure (connection, timeout).
    Network(String),
    /// The service answered with a body we cannot make sense of.
    Malformed(String),
    /// Bad client configuration.
    Config(String),
}

impl CatalogError {
    /// Whether this is a resolution outcome (translatable into a claim
    /// annotation) rather than an infrastructure failure.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Self::TermNotFound(_)
                | Self::DeptNotFound { .. }
                | Self::ClassNotFound { .. }
                | Self::NoClassInfo { .. }
        )
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TermNotFound(term) => write!(f, "the catalog has no data for {term}"),
            Self::DeptNotFound { dept, term } => {
                write!(f, "the {dept} department had no offerings in {term}")
            }
            Self::ClassNotFound { course, term } => {
                write!(f, "{course} wasn't offered in {term}")
            }
            Self::NoClassInfo { course, term } => {
                write!(
                    f,
                    "intending to take {course} in {term}, but no prior offering was found"
                )
            }
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed catalog response: {msg}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}
