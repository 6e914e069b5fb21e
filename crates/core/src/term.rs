use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Season
// ---------------------------------------------------------------------------

/// Academic season. Variant order is chronological within a year, so the
/// derived `Ord` gives WI < SP < SU < FA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Winter => "WI",
            Self::Spring => "SP",
            Self::Summer => "SU",
            Self::Fall => "FA",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "WI" => Some(Self::Winter),
            "SP" => Some(Self::Spring),
            "SU" => Some(Self::Summer),
            "FA" => Some(Self::Fall),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Term
// ---------------------------------------------------------------------------

/// An academic term token ("FA23"). Totally ordered by (year, season), so
/// WI22 < SP22 < SU22 < FA22 < WI23.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term {
    year: u8,
    season: Season,
}

impl Term {
    pub fn new(season: Season, year: u8) -> Self {
        Self { year, season }
    }

    pub fn season(&self) -> Season {
        self.season
    }

    /// Two-digit year (23 for 2023).
    pub fn year(&self) -> u8 {
        self.year
    }

    /// Parse a possibly sloppy term token. Alphabetic and numeric characters
    /// are partitioned and recombined, so " fA '2 2" parses as FA22. Anything
    /// that does not reduce to a season code + 2-digit year is rejected.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let letters: String = input
            .chars()
            .filter(|c| c.is_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

        if letters.len() != 2 || digits.len() != 2 {
            return Err(ParseError::InvalidTerm(input.to_string()));
        }

        let season = Season::from_code(&letters)
            .ok_or_else(|| ParseError::InvalidTerm(input.to_string()))?;
        let year = digits
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidTerm(input.to_string()))?;

        Ok(Self { year, season })
    }
}

impl FromStr for Term {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.season, self.year)
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
