use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use gradcheck_core::{CourseName, Grade, Term, ValidityMap};

// ---------------------------------------------------------------------------
// Requirement tags
// ---------------------------------------------------------------------------

/// The degree requirements a claim can target. Closed set: the extraction
/// boundary parses tags, so an unrecognized tag can never reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReqTag {
    Calc,
    Multi,
    DiffEq,
    LinAlg,
    IntroProg,
    GenChem,
    Phys1,
    ExpPhys,
    Phys2,
    Phys3,
    DigLogic,
    PhysEd,
    Circuits,
    DataScience,
    Electromag,
    IntroProb,
    EmbeddedSys,
    Microelectronics,
    SigSys,
    Cde,
    Upper4000,
    Upper3000,
    Fws,
    LiberalStudies,
    Ote,
    Aae,
    EngrDist,
    EngrInterest,
    Extra,
}

impl ReqTag {
    /// The tag token as it appears in checklist documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calc => "CALC.",
            Self::Multi => "MULTI.",
            Self::DiffEq => "DIFF. EQ.",
            Self::LinAlg => "LIN. ALG.",
            Self::IntroProg => "INTRO. PROG.",
            Self::GenChem => "GEN. CHEM.",
            Self::Phys1 => "PHYS. 1",
            Self::ExpPhys => "EXP. PHYS.",
            Self::Phys2 => "PHYS. 2",
            Self::Phys3 => "PHYS. 3",
            Self::DigLogic => "DIG. LOGIC",
            Self::PhysEd => "PHYS. ED.",
            Self::Circuits => "CIRCUITS",
            Self::DataScience => "DATA SCIENCE",
            Self::Electromag => "ELECTROMAG.",
            Self::IntroProb => "INTRO. PROB.",
            Self::EmbeddedSys => "EMBEDDED SYS.",
            Self::Microelectronics => "MICROELECTRONICS",
            Self::SigSys => "SIG. & SYS.",
            Self::Cde => "CDE",
            Self::Upper4000 => "4000+",
            Self::Upper3000 => "3000+",
            Self::Fws => "FWS",
            Self::LiberalStudies => "LS",
            Self::Ote => "OTE",
            Self::Aae => "AAE",
            Self::EngrDist => "ENGR. DIST.",
            Self::EngrInterest => "ENGR. INTEREST",
            Self::Extra => "EXTRA-C",
        }
    }

    pub fn parse(input: &str) -> Result<Self, UnknownTag> {
        let token = input.trim().to_uppercase();
        ALL_REQ_TAGS
            .iter()
            .find(|tag| tag.as_str() == token)
            .copied()
            .ok_or_else(|| UnknownTag(input.to_string()))
    }
}

const ALL_REQ_TAGS: [ReqTag; 29] = [
    ReqTag::Calc,
    ReqTag::Multi,
    ReqTag::DiffEq,
    ReqTag::LinAlg,
    ReqTag::IntroProg,
    ReqTag::GenChem,
    ReqTag::Phys1,
    ReqTag::ExpPhys,
    ReqTag::Phys2,
    ReqTag::Phys3,
    ReqTag::DigLogic,
    ReqTag::PhysEd,
    ReqTag::Circuits,
    ReqTag::DataScience,
    ReqTag::Electromag,
    ReqTag::IntroProb,
    ReqTag::EmbeddedSys,
    ReqTag::Microelectronics,
    ReqTag::SigSys,
    ReqTag::Cde,
    ReqTag::Upper4000,
    ReqTag::Upper3000,
    ReqTag::Fws,
    ReqTag::LiberalStudies,
    ReqTag::Ote,
    ReqTag::Aae,
    ReqTag::EngrDist,
    ReqTag::EngrInterest,
    ReqTag::Extra,
];

impl fmt::Display for ReqTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReqTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ReqTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReqTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(D::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Checkoff tags
// ---------------------------------------------------------------------------

/// Checkoffs: satisfied by a course already claimed under some requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoffTag {
    AdvProgramming,
    TechWriting,
}

impl CheckoffTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AdvProgramming => "ADV. PROGRAMMING",
            Self::TechWriting => "TECH. WRITING",
        }
    }

    pub fn parse(input: &str) -> Result<Self, UnknownTag> {
        match input.trim().to_uppercase().as_str() {
            "ADV. PROGRAMMING" => Ok(Self::AdvProgramming),
            "TECH. WRITING" => Ok(Self::TechWriting),
            _ => Err(UnknownTag(input.to_string())),
        }
    }
}

impl fmt::Display for CheckoffTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CheckoffTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for CheckoffTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A tag token the engine does not recognize. Raised at the extraction
/// boundary, before a roster is ever built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized requirement tag '{}'", self.0)
    }
}

impl std::error::Error for UnknownTag {}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Opaque position token carried from the source document, so the
/// annotation layer can find the cell a claim came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub String);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

/// One claimed requirement satisfaction. Unparseable source fields are
/// `None`; the checks decide what that means for validity.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementClaim {
    pub tag: ReqTag,
    pub course: Option<CourseName>,
    pub term: Option<Term>,
    pub credits: Option<u32>,
    pub grade: Option<Grade>,
    pub position: Position,
    pub validity: ValidityMap,
}

impl RequirementClaim {
    /// Build a claim from raw document fields, parsing leniently: a field
    /// that does not parse is recorded as absent, not rejected.
    pub fn from_fields(
        tag: ReqTag,
        course: &str,
        credits: &str,
        term: &str,
        grade: &str,
        position: Position,
    ) -> Self {
        Self {
            tag,
            course: CourseName::parse(course).ok(),
            term: Term::parse(term).ok(),
            credits: credits.trim().parse().ok(),
            grade: Grade::parse(grade).ok(),
            position,
            validity: ValidityMap::requirement(),
        }
    }
}

impl fmt::Display for RequirementClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.course, self.term) {
            (Some(course), Some(term)) => {
                write!(f, "{} satisfied by {course} ({term})", self.tag)
            }
            (Some(course), None) => write!(f, "{} satisfied by {course}", self.tag),
            _ => write!(f, "{} with no course", self.tag),
        }
    }
}

/// One claimed checkoff satisfaction. Reduced field set: a checkoff names
/// only the course, which must also appear under an ordinary requirement.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoffClaim {
    pub tag: CheckoffTag,
    pub course: Option<CourseName>,
    pub position: Position,
    pub validity: ValidityMap,
}

impl CheckoffClaim {
    pub fn from_fields(tag: CheckoffTag, course: &str, position: Position) -> Self {
        Self {
            tag,
            course: CourseName::parse(course).ok(),
            position,
            validity: ValidityMap::checkoff(),
        }
    }
}

impl fmt::Display for CheckoffClaim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.course {
            Some(course) => write!(f, "{} satisfied by {course}", self.tag),
            None => write!(f, "{} with no course", self.tag),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gradcheck_core::{Field, Validity};

    #[test]
    fn req_tags_round_trip() {
        for tag in ALL_REQ_TAGS {
            assert_eq!(ReqTag::parse(tag.as_str()).unwrap(), tag);
        }
    }

    #[test]
    fn tag_parse_normalizes_case_and_whitespace() {
        assert_eq!(ReqTag::parse(" calc. ").unwrap(), ReqTag::Calc);
        assert_eq!(CheckoffTag::parse("tech. writing").unwrap(), CheckoffTag::TechWriting);
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!(ReqTag::parse("BASKET WEAVING").is_err());
        assert!(CheckoffTag::parse("CALC.").is_err());
    }

    #[test]
    fn lenient_field_parsing() {
        let claim = RequirementClaim::from_fields(
            ReqTag::Calc,
            "math1910",
            "4",
            "fa23",
            "a+",
            Position("B12".into()),
        );
        assert_eq!(claim.course.as_ref().unwrap().to_string(), "MATH 1910");
        assert_eq!(claim.term.unwrap().to_string(), "FA23");
        assert_eq!(claim.credits, Some(4));
        assert_eq!(claim.grade.unwrap().as_str(), "A+");
    }

    #[test]
    fn unparseable_fields_become_absent() {
        let claim = RequirementClaim::from_fields(
            ReqTag::Fws,
            "???",
            "four",
            "Fall 2023 maybe",
            "Z",
            Position("C3".into()),
        );
        assert!(claim.course.is_none());
        assert!(claim.credits.is_none());
        assert!(claim.term.is_none());
        assert!(claim.grade.is_none());
        assert_eq!(claim.validity.overall(), Validity::Unchecked);
    }

    #[test]
    fn checkoff_claims_track_reduced_fields() {
        let claim =
            CheckoffClaim::from_fields(CheckoffTag::AdvProgramming, "ECE 2400", Position("D1".into()));
        assert_eq!(claim.validity.get(Field::Course), Validity::Unchecked);
        assert_eq!(claim.validity.get(Field::Grade), Validity::Unchecked);
    }
}
