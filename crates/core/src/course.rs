use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// A normalized course name: department + catalog number ("ECE 2720").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseName {
    dept: String,
    number: String,
}

impl CourseName {
    /// Parse a possibly sloppy course name. Alphabetic and numeric characters
    /// are partitioned and recombined, so " ecE2720" parses as "ECE 2720".
    /// An empty department or a catalog number that is not a small integer is
    /// rejected.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let dept: String = input
            .chars()
            .filter(|c| c.is_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let number: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

        if dept.is_empty() || number.is_empty() || number.len() > 5 {
            return Err(ParseError::InvalidCourseName(input.to_string()));
        }

        Ok(Self { dept, number })
    }

    pub fn dept(&self) -> &str {
        &self.dept
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// The catalog number as an integer, for level comparisons
    /// ("ECE 4750" is at level 4750).
    pub fn level(&self) -> u32 {
        // The number is all digits and at most 5 of them (checked at parse).
        self.number.parse().unwrap_or(0)
    }
}

impl FromStr for CourseName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CourseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.dept, self.number)
    }
}

impl Serialize for CourseName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CourseName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(D::Error::custom)
    }
}
