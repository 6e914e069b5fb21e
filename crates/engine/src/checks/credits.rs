//! Credit consistency: every requirement claim's applied credits are drawn
//! from the student's ledger, so one course's hours can't satisfy more
//! requirement slots than were earned.

use gradcheck_catalog::CatalogError;
use gradcheck_core::Field;

use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::roster::Roster;

pub fn credits_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    let mut outcome = CheckOutcome::default();

    let Some(book) = &ctx.grade_book else {
        log.info("no grade data supplied; skipping the credit check");
        return Ok(outcome);
    };

    log.info(format!("credit check for {}:", roster.student_id));

    let mut ledger = match book.ledger_for(&roster.student_id) {
        Ok(ledger) => ledger,
        Err(err) => {
            log.error(err.to_string());
            outcome.errors += 1;
            return Ok(outcome);
        }
    };

    for claim in roster.req_claims.iter_mut() {
        let (Some(course), Some(term), Some(credits)) =
            (claim.course.clone(), claim.term, claim.credits)
        else {
            log.error(format!(
                "claim for the {} requirement is missing the course, term, or credits",
                claim.tag
            ));
            outcome.errors += 1;
            claim.validity.mark_error(Field::Credits);
            continue;
        };

        match ledger.use_credit(&course, term, credits) {
            Ok(()) => {
                log.info(format!(" - credits match for {course}"));
                claim.validity.mark_valid(Field::Credits);
            }
            Err(err) => {
                log.error(err.to_string());
                outcome.errors += 1;
                claim.validity.mark_error(Field::Credits);
            }
        }
    }

    if outcome.errors == 0 {
        log.success("all credits match");
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

    fn claim(tag: ReqTag, course: &str, credits: &str) -> RequirementClaim {
        RequirementClaim::from_fields(tag, course, credits, "FA22", "A", Position("B2".into()))
    }

    #[test]
    fn matching_credits_pass() {
        let mut roster = Roster::new("abc123");
        roster.req_claims.push(claim(ReqTag::DataScience, "ECE 2720", "4"));

        let mut log = CheckLog::new();
        let outcome = credits_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 0);
        assert_eq!(
            roster.req_claims[0].validity.get(Field::Credits),
            Validity::Valid
        );
    }

    #[test]
    fn double_counting_across_claims_is_caught() {
        // 4 earned credits split 4 + 1 across two claims: second fails.
        let mut roster = Roster::new("abc123");
        roster.req_claims.push(claim(ReqTag::DataScience, "ECE 2720", "4"));
        roster.req_claims.push(claim(ReqTag::Upper3000, "ECE 2720", "1"));

        let mut log = CheckLog::new();
        let outcome = credits_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 1);
        assert_eq!(
            roster.req_claims[0].validity.get(Field::Credits),
            Validity::Valid
        );
        assert_eq!(
            roster.req_claims[1].validity.get(Field::Credits),
            Validity::Error
        );
    }

    #[test]
    fn unknown_record_is_an_error() {
        let mut roster = Roster::new("abc123");
        roster.req_claims.push(claim(ReqTag::Calc, "MATH 1910", "4"));

        let mut log = CheckLog::new();
        let outcome = credits_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 1);
        assert_eq!(
            roster.req_claims[0].validity.get(Field::Credits),
            Validity::Error
        );
    }

    #[test]
    fn missing_grade_book_skips_quietly() {
        let mut roster = Roster::new("abc123");
        roster.req_claims.push(claim(ReqTag::Calc, "MATH 1910", "4"));

        let mut ctx = CheckContext::new(CatalogCache::offline(vec![]));
        let mut log = CheckLog::new();
        let outcome = credits_check(&mut roster, &mut ctx, &mut log).unwrap();
        assert_eq!(outcome.errors, 0);
        assert_eq!(
            roster.req_claims[0].validity.get(Field::Credits),
            Validity::Unchecked
        );
    }
}
