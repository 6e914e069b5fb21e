use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// A validated grade token. Letter grades carry quality points; S/U and
/// their exempt forms do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
    S,
    U,
    Sx,
    Ux,
}

impl Grade {
    /// Parse a possibly sloppy grade. Letters and +/- modifiers are
    /// partitioned and recombined, so " + a" parses as A+.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let letters: String = input
            .chars()
            .filter(|c| c.is_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let modifiers: String = input.chars().filter(|c| *c == '+' || *c == '-').collect();

        Self::from_token(&format!("{letters}{modifiers}"))
            .ok_or_else(|| ParseError::InvalidGrade(input.to_string()))
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "A+" => Some(Self::APlus),
            "A" => Some(Self::A),
            "A-" => Some(Self::AMinus),
            "B+" => Some(Self::BPlus),
            "B" => Some(Self::B),
            "B-" => Some(Self::BMinus),
            "C+" => Some(Self::CPlus),
            "C" => Some(Self::C),
            "C-" => Some(Self::CMinus),
            "D+" => Some(Self::DPlus),
            "D" => Some(Self::D),
            "D-" => Some(Self::DMinus),
            "F" => Some(Self::F),
            "S" => Some(Self::S),
            "U" => Some(Self::U),
            "SX" => Some(Self::Sx),
            "UX" => Some(Self::Ux),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
            Self::S => "S",
            Self::U => "U",
            Self::Sx => "SX",
            Self::Ux => "UX",
        }
    }

    /// Quality points for letter grades (A+ = 4.3 down to F = 0);
    /// None for S/U-basis grades.
    pub fn quality_points(&self) -> Option<f32> {
        match self {
            Self::APlus => Some(4.3),
            Self::A => Some(4.0),
            Self::AMinus => Some(3.7),
            Self::BPlus => Some(3.3),
            Self::B => Some(3.0),
            Self::BMinus => Some(2.7),
            Self::CPlus => Some(2.3),
            Self::C => Some(2.0),
            Self::CMinus => Some(1.7),
            Self::DPlus => Some(1.3),
            Self::D => Some(1.0),
            Self::DMinus => Some(0.7),
            Self::F => Some(0.0),
            Self::S | Self::U | Self::Sx | Self::Ux => None,
        }
    }
}

impl FromStr for Grade {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Grade {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_sloppy_input() {
        assert_eq!(Grade::parse(" + a").unwrap(), Grade::APlus);
        assert_eq!(Grade::parse("b-").unwrap(), Grade::BMinus);
        assert_eq!(Grade::parse("sx").unwrap(), Grade::Sx);
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        assert!(Grade::parse("E").is_err());
        assert!(Grade::parse("A++").is_err());
        assert!(Grade::parse("").is_err());
    }

    #[test]
    fn quality_points_for_letter_grades() {
        assert_eq!(Grade::APlus.quality_points(), Some(4.3));
        assert_eq!(Grade::F.quality_points(), Some(0.0));
        assert_eq!(Grade::S.quality_points(), None);
        assert_eq!(Grade::Ux.quality_points(), None);
    }

    #[test]
    fn display_round_trips() {
        for token in ["A+", "C-", "F", "S", "UX"] {
            assert_eq!(Grade::parse(token).unwrap().to_string(), token);
        }
    }
}
