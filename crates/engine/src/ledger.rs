use std::fmt;

use serde::Serialize;

use gradcheck_core::{CourseName, Grade, Term};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No record of the student taking the course that term.
    RecordNotFound {
        student: String,
        course: CourseName,
        term: Term,
    },
    /// Applying `requested` more credits would exceed the credits taken.
    InsufficientCredits {
        student: String,
        course: CourseName,
        term: Term,
        requested: u32,
        taken: u32,
        applied: u32,
    },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecordNotFound {
                student,
                course,
                term,
            } => write!(f, "no record of {student} taking {course} in {term}"),
            Self::InsufficientCredits {
                student,
                course,
                term,
                requested,
                taken,
                applied,
            } => write!(
                f,
                "too many credits applied towards {course} in {term} for {student} \
                 (took the class for {taken}, attempted to apply {requested} with \
                 {applied} already applied)"
            ),
        }
    }
}

impl std::error::Error for LedgerError {}

// ---------------------------------------------------------------------------
// GradeRecord
// ---------------------------------------------------------------------------

/// One real academic record: a student took a course, one term, for a fixed
/// number of credit-hours. `credits_applied` tracks how much of that has
/// been consumed by requirement claims; it never exceeds `credits_taken`.
#[derive(Debug, Clone, Serialize)]
pub struct GradeRecord {
    pub course: CourseName,
    pub term: Term,
    pub credits_taken: u32,
    pub grade: Grade,
    credits_applied: u32,
}

impl GradeRecord {
    pub fn new(course: CourseName, term: Term, credits_taken: u32, grade: Grade) -> Self {
        Self {
            course,
            term,
            credits_taken,
            grade,
            credits_applied: 0,
        }
    }

    pub fn credits_applied(&self) -> u32 {
        self.credits_applied
    }

    pub fn credits_remaining(&self) -> u32 {
        self.credits_taken - self.credits_applied
    }
}

// ---------------------------------------------------------------------------
// CreditLedger
// ---------------------------------------------------------------------------

/// All of one student's records. `use_credit` is the only mutation, and it
/// is what keeps one course's credit-hours from being claimed against more
/// requirement slots than they cover.
#[derive(Debug, Clone, Serialize)]
pub struct CreditLedger {
    student_id: String,
    records: Vec<GradeRecord>,
}

impl CreditLedger {
    pub fn new(student_id: impl Into<String>, records: Vec<GradeRecord>) -> Self {
        Self {
            student_id: student_id.into(),
            records,
        }
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn records(&self) -> &[GradeRecord] {
        &self.records
    }

    /// Consume `amount` credits from the record matching (course, term).
    /// Fails without changing state if there is no such record or not
    /// enough credit remains.
    pub fn use_credit(
        &mut self,
        course: &CourseName,
        term: Term,
        amount: u32,
    ) -> Result<(), LedgerError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.course == *course && record.term == term)
            .ok_or_else(|| LedgerError::RecordNotFound {
                student: self.student_id.clone(),
                course: course.clone(),
                term,
            })?;

        if record.credits_applied + amount > record.credits_taken {
            return Err(LedgerError::InsufficientCredits {
                student: self.student_id.clone(),
                course: course.clone(),
                term,
                requested: amount,
                taken: record.credits_taken,
                applied: record.credits_applied,
            });
        }

        record.credits_applied += amount;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn course(name: &str) -> CourseName {
        CourseName::parse(name).unwrap()
    }

    fn term(token: &str) -> Term {
        Term::parse(token).unwrap()
    }

    fn ledger() -> CreditLedger {
        CreditLedger::new(
            "abc123",
            vec![
                GradeRecord::new(course("ECE 2720"), term("FA22"), 4, Grade::A),
                GradeRecord::new(course("MATH 1910"), term("SP22"), 4, Grade::BPlus),
            ],
        )
    }

    #[test]
    fn consumes_up_to_credits_taken() {
        let mut ledger = ledger();
        ledger.use_credit(&course("ECE 2720"), term("FA22"), 3).unwrap();
        ledger.use_credit(&course("ECE 2720"), term("FA22"), 1).unwrap();

        let err = ledger
            .use_credit(&course("ECE 2720"), term("FA22"), 1)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientCredits { .. }));
    }

    #[test]
    fn failed_use_leaves_state_unchanged() {
        let mut ledger = ledger();
        ledger.use_credit(&course("ECE 2720"), term("FA22"), 3).unwrap();

        let err = ledger
            .use_credit(&course("ECE 2720"), term("FA22"), 2)
            .unwrap_err();
        match err {
            LedgerError::InsufficientCredits {
                requested,
                taken,
                applied,
                ..
            } => {
                assert_eq!((requested, taken, applied), (2, 4, 3));
            }
            other => panic!("unexpected error: {other}"),
        }

        // Still exactly one credit left.
        ledger.use_credit(&course("ECE 2720"), term("FA22"), 1).unwrap();
    }

    #[test]
    fn unknown_record_is_reported() {
        let mut ledger = ledger();
        let err = ledger
            .use_credit(&course("ECE 2720"), term("SP23"), 1)
            .unwrap_err();
        assert!(matches!(err, LedgerError::RecordNotFound { .. }));

        let err = ledger
            .use_credit(&course("CHEM 2090"), term("FA22"), 1)
            .unwrap_err();
        assert!(matches!(err, LedgerError::RecordNotFound { .. }));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// No sequence of use_credit calls ever drives applied past
            /// taken, and every accepted call advances by exactly its
            /// amount.
            #[test]
            fn applied_never_exceeds_taken(amounts in prop::collection::vec(0u32..6, 0..20)) {
                let mut ledger = CreditLedger::new(
                    "abc123",
                    vec![GradeRecord::new(course("ECE 2720"), term("FA22"), 4, Grade::A)],
                );

                let mut expected = 0u32;
                for amount in amounts {
                    let result = ledger.use_credit(&course("ECE 2720"), term("FA22"), amount);
                    if expected + amount <= 4 {
                        prop_assert!(result.is_ok());
                        expected += amount;
                    } else {
                        prop_assert!(result.is_err());
                    }
                    prop_assert_eq!(ledger.records()[0].credits_applied(), expected);
                    prop_assert!(ledger.records()[0].credits_applied() <= 4);
                }
            }
        }
    }
}
