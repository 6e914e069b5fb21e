use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Validity levels
// ---------------------------------------------------------------------------

/// Per-field claim status. Variant order is severity order, so the derived
/// `Ord` gives Unchecked < Valid < Warning < Error and escalation is a plain
/// max-merge: once a field reaches a level it never goes back down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// The engine never reached this field. Distinct from `Valid`.
    Unchecked,
    /// Checked and passed.
    Valid,
    /// Unverifiable, not necessarily wrong.
    Warning,
    /// Checked and failed.
    Error,
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchecked => write!(f, "unchecked"),
            Self::Valid => write!(f, "valid"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Claim fields
// ---------------------------------------------------------------------------

/// The claim fields a check can pass judgement on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Requirement,
    Course,
    Term,
    Credits,
    Grade,
}

// ---------------------------------------------------------------------------
// ValidityMap
// ---------------------------------------------------------------------------

/// The per-field validity of one claim. Fields start `Unchecked`;
/// `escalate` max-merges and never decreases a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidityMap {
    fields: BTreeMap<Field, Validity>,
}

impl ValidityMap {
    /// Tracker for a requirement claim (all five fields).
    pub fn requirement() -> Self {
        Self::tracking(&[
            Field::Requirement,
            Field::Course,
            Field::Term,
            Field::Credits,
            Field::Grade,
        ])
    }

    /// Tracker for a checkoff claim (reduced field set).
    pub fn checkoff() -> Self {
        Self::tracking(&[Field::Requirement, Field::Course])
    }

    fn tracking(fields: &[Field]) -> Self {
        Self {
            fields: fields.iter().map(|f| (*f, Validity::Unchecked)).collect(),
        }
    }

    /// Raise `field` to at least `level`. Never decreases.
    pub fn escalate(&mut self, field: Field, level: Validity) {
        let current = self.fields.entry(field).or_insert(Validity::Unchecked);
        *current = (*current).max(level);
    }

    pub fn mark_valid(&mut self, field: Field) {
        self.escalate(field, Validity::Valid);
    }

    pub fn mark_warning(&mut self, field: Field) {
        self.escalate(field, Validity::Warning);
    }

    pub fn mark_error(&mut self, field: Field) {
        self.escalate(field, Validity::Error);
    }

    pub fn get(&self, field: Field) -> Validity {
        self.fields.get(&field).copied().unwrap_or(Validity::Unchecked)
    }

    /// The maximum level across all tracked fields; drives the single
    /// color the annotation layer picks per claim.
    pub fn overall(&self) -> Validity {
        self.fields
            .values()
            .copied()
            .max()
            .unwrap_or(Validity::Unchecked)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, Validity)> + '_ {
        self.fields.iter().map(|(f, v)| (*f, *v))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_severity_ordered() {
        assert!(Validity::Unchecked < Validity::Valid);
        assert!(Validity::Valid < Validity::Warning);
        assert!(Validity::Warning < Validity::Error);
    }

    #[test]
    fn escalate_never_decreases() {
        let mut validity = ValidityMap::requirement();
        validity.mark_error(Field::Term);
        validity.mark_valid(Field::Term);
        assert_eq!(validity.get(Field::Term), Validity::Error);

        validity.mark_warning(Field::Term);
        assert_eq!(validity.get(Field::Term), Validity::Error);
    }

    #[test]
    fn unset_fields_read_as_unchecked() {
        let validity = ValidityMap::checkoff();
        assert_eq!(validity.get(Field::Grade), Validity::Unchecked);
        assert_eq!(validity.get(Field::Course), Validity::Unchecked);
    }

    #[test]
    fn overall_is_field_maximum() {
        let mut validity = ValidityMap::requirement();
        assert_eq!(validity.overall(), Validity::Unchecked);

        validity.mark_valid(Field::Course);
        assert_eq!(validity.overall(), Validity::Valid);

        validity.mark_warning(Field::Term);
        assert_eq!(validity.overall(), Validity::Warning);

        validity.mark_error(Field::Requirement);
        assert_eq!(validity.overall(), Validity::Error);
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let mut validity = ValidityMap::checkoff();
        validity.mark_valid(Field::Course);
        let json = serde_json::to_value(&validity).unwrap();
        assert_eq!(json["fields"]["course"], "valid");
        assert_eq!(json["fields"]["requirement"], "unchecked");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn any_level() -> impl Strategy<Value = Validity> {
            prop_oneof![
                Just(Validity::Unchecked),
                Just(Validity::Valid),
                Just(Validity::Warning),
                Just(Validity::Error),
            ]
        }

        proptest! {
            /// Final status equals the maximum level ever escalated, no
            /// matter the order of calls.
            #[test]
            fn final_status_is_running_maximum(levels in prop::collection::vec(any_level(), 1..20)) {
                let mut validity = ValidityMap::requirement();
                let mut high_water = Validity::Unchecked;

                for level in levels {
                    validity.escalate(Field::Requirement, level);
                    high_water = high_water.max(level);
                    prop_assert_eq!(validity.get(Field::Requirement), high_water);
                }
            }
        }
    }
}
