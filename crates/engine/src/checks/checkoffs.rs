//! Checkoffs: satisfied by a course already claimed under some ordinary
//! requirement.

use gradcheck_catalog::CatalogError;

use crate::claim::CheckoffTag;
use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::predicate::Predicate;
use crate::roster::Roster;
use crate::rules::validate_checkoff;

/// Courses accepted for the advanced programming checkoff.
const ADV_PROG_COURSES: [&str; 7] = [
    "ECE 2400",
    "CS 2110",
    "ENGRD 3200",
    "AEP 4380",
    "ECE 4740",
    "ECE 4750",
    "ECE 4760",
];

/// Courses accepted for the technical writing checkoff, on top of anything
/// in the ENGRC department.
const TECH_WRIT_COURSES: [&str; 3] = ["ECE 4920", "COMM 3030", "COMM 3020"];

pub fn adv_prog_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    let predicate = Predicate::any_of(&ADV_PROG_COURSES);
    validate_checkoff(
        roster,
        &mut ctx.cache,
        log,
        CheckoffTag::AdvProgramming,
        &[predicate],
    )
    .map(CheckOutcome::from)
}

pub fn tech_writ_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    let named = Predicate::any_of(&TECH_WRIT_COURSES);
    let predicate = Predicate::new("class isn't a technical writing course", move |offering| {
        offering.in_department("ENGRC") || named.check(offering)
    });
    validate_checkoff(
        roster,
        &mut ctx.cache,
        log,
        CheckoffTag::TechWriting,
        &[predicate],
    )
    .map(CheckOutcome::from)
}

/// Both checkoffs.
pub fn checkoffs_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    let mut outcome = adv_prog_check(roster, ctx, log)?;
    outcome.absorb(tech_writ_check(roster, ctx, log)?);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{CheckoffClaim, Position, ReqTag, RequirementClaim};
    use gradcheck_catalog::CatalogCache;
    use gradcheck_core::Term;

    fn term(token: &str) -> Term {
        Term::parse(token).unwrap()
    }

    fn record(subject: &str, nbr: &str) -> gradcheck_catalog::RawClass {
        serde_json::from_value(serde_json::json!({
            "subject": subject,
            "catalogNbr": nbr,
            "titleShort": "Title",
            "titleLong": "Long Title",
            "enrollGroups": [{
                "unitsMinimum": 4.0,
                "unitsMaximum": 4.0,
                "simpleCombinations": []
            }]
        }))
        .unwrap()
    }

    fn ctx() -> CheckContext {
        let mut cache = CatalogCache::offline(vec![term("FA23")]);
        cache.seed(term("FA23"), "ECE", vec![record("ECE", "2400")]);
        cache.seed(term("FA23"), "ENGRC", vec![record("ENGRC", "3500")]);
        CheckContext::new(cache)
    }

    fn roster_with(course: &str, tag: CheckoffTag) -> Roster {
        let mut roster = Roster::new("abc123");
        roster.req_claims.push(RequirementClaim::from_fields(
            ReqTag::Extra,
            course,
            "4",
            "FA23",
            "A",
            Position("B2".into()),
        ));
        roster
            .checkoff_claims
            .push(CheckoffClaim::from_fields(tag, course, Position("D1".into())));
        roster
    }

    #[test]
    fn approved_programming_course_passes() {
        let mut roster = roster_with("ECE 2400", CheckoffTag::AdvProgramming);
        let mut log = CheckLog::new();
        let outcome = adv_prog_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 0);
    }

    #[test]
    fn engrc_department_satisfies_tech_writing() {
        let mut roster = roster_with("ENGRC 3500", CheckoffTag::TechWriting);
        let mut log = CheckLog::new();
        let outcome = tech_writ_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 0);
    }

    #[test]
    fn unapproved_course_fails_the_checkoff() {
        let mut roster = roster_with("ENGRC 3500", CheckoffTag::AdvProgramming);
        let mut log = CheckLog::new();
        let outcome = adv_prog_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 1);
    }
}
