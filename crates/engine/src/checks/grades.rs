//! Grade consistency: every requirement claim's reported grade must match
//! the trusted record.

use gradcheck_catalog::CatalogError;
use gradcheck_core::Field;

use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::roster::Roster;

pub fn grade_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    let mut outcome = CheckOutcome::default();

    let Some(book) = &ctx.grade_book else {
        log.info("no grade data supplied; skipping the grade check");
        return Ok(outcome);
    };

    log.info(format!("grade check for {}:", roster.student_id));

    for claim in roster.req_claims.iter_mut() {
        let recorded = match (&claim.course, claim.term) {
            (Some(course), Some(term)) => {
                book.grade_for(&roster.student_id, term, course).ok()
            }
            _ => None,
        };

        match (claim.grade, recorded) {
            (Some(reported), Some(real)) if reported == real => {
                log.info(format!(
                    " - grade match for {}",
                    claim.course.as_ref().map(|c| c.to_string()).unwrap_or_default()
                ));
                claim.validity.mark_valid(Field::Grade);
            }
            (reported, real) => {
                log.error(format!(
                    "reported grade for the {} claim ({}) doesn't match our records ({})",
                    claim.tag,
                    reported.map(|g| g.to_string()).unwrap_or_else(|| "none".into()),
                    real.map(|g| g.to_string()).unwrap_or_else(|| "no entry".into()),
                ));
                outcome.errors += 1;
                claim.validity.mark_error(Field::Grade);
            }
        }
    }

    if outcome.errors == 0 {
        log.success("all grades match");
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{Position, ReqTag, RequirementClaim};
    use crate::gradebook::GradeBook;
    use gradcheck_catalog::CatalogCache;
    use gradcheck_core::{CourseName, Grade, Term, Validity};

    fn term(token: &str) -> Term {
        Term::parse(token).unwrap()
    }

    fn course(name: &str) -> CourseName {
        CourseName::parse(name).unwrap()
    }

    fn ctx() -> CheckContext {
        let mut book = GradeBook::new();
        book.insert("abc123", term("FA22"), course("ECE 2720"), 4, Grade::A);
        CheckContext::new(CatalogCache::offline(vec![])).with_grade_book(book)
    }

    fn claim(course: &str, grade: &str) -> RequirementClaim {
        RequirementClaim::from_fields(
            ReqTag::DataScience,
            course,
            "4",
            "FA22",
            grade,
            Position("B2".into()),
        )
    }

    #[test]
    fn matching_grade_passes() {
        let mut roster = Roster::new("abc123");
        roster.req_claims.push(claim("ECE 2720", "A"));

        let mut log = CheckLog::new();
        let outcome = grade_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 0);
        assert_eq!(
            roster.req_claims[0].validity.get(Field::Grade),
            Validity::Valid
        );
    }

    #[test]
    fn inflated_grade_is_caught() {
        let mut roster = Roster::new("abc123");
        roster.req_claims.push(claim("ECE 2720", "A+"));

        let mut log = CheckLog::new();
        let outcome = grade_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 1);
        assert_eq!(
            roster.req_claims[0].validity.get(Field::Grade),
            Validity::Error
        );
    }

    #[test]
    fn missing_record_compares_as_mismatch() {
        let mut roster = Roster::new("abc123");
        roster.req_claims.push(claim("MATH 1910", "A"));

        let mut log = CheckLog::new();
        let outcome = grade_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 1);
    }
}
