//! Engineering common core requirements.

use gradcheck_catalog::CatalogError;
use gradcheck_core::{CourseName, Season, Term};

use crate::claim::ReqTag;
use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::predicate::Predicate;
use crate::roster::Roster;
use crate::rules::{basic_check, Expected};

use super::{run_all, CheckFnPtr};

pub fn calc_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Calc,
        &[Predicate::named("MATH 1910")],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn multi_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Multi,
        &[Predicate::named("MATH 1920")],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn diff_eq_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::DiffEq,
        &[Predicate::named("MATH 2930")],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn lin_alg_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::LinAlg,
        &[Predicate::named("MATH 2940")],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn intro_prog_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::IntroProg,
        &[Predicate::any_of(&["CS 1110", "CS 1112"])],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn gen_chem_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::GenChem,
        &[Predicate::named("CHEM 2090")],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

/// Experimental physics companion requirement (PHYS 1110).
pub fn exp_phys_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::ExpPhys,
        &[Predicate::named("PHYS 1110")],
        Expected::Exactly(1),
        true,
    )
    .map(CheckOutcome::from)
}

/// Mechanics. Satisfied by PHYS 1112 or PHYS 1116; a PHYS 1112 taken after
/// SU23 additionally requires the experimental physics claim.
pub fn phys_1_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    let result = basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Phys1,
        &[Predicate::any_of(&["PHYS 1112", "PHYS 1116"])],
        Expected::Exactly(1),
        true,
    )?;

    let mut outcome = CheckOutcome::from(result.clone());

    let needs_exp_phys = result.first.as_ref().is_some_and(|first| {
        first.course == CourseName::parse("PHYS 1112").ok()
            && first.term.is_some_and(|t| t > Term::new(Season::Summer, 23))
    });
    if needs_exp_phys {
        outcome.absorb(exp_phys_check(roster, ctx, log)?);
    }

    Ok(outcome)
}

pub fn phys_2_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Phys2,
        &[Predicate::any_of(&["PHYS 2213", "PHYS 2217"])],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn phys_3_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Phys3,
        &[Predicate::any_of(&["PHYS 2214", "PHYS 2218"])],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn dig_logic_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::DigLogic,
        &[Predicate::named("ECE 2300")],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn phys_ed_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::PhysEd,
        &[Predicate::in_dept("PE")],
        Expected::Exactly(2),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn engr_dist_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::EngrDist,
        &[Predicate::in_dept("ENGRD")],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

pub fn engr_interest_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::EngrInterest,
        &[Predicate::in_dept("ENGRI")],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

const CHECKS_TO_RUN: [CheckFnPtr; 13] = [
    calc_check,
    multi_check,
    diff_eq_check,
    lin_alg_check,
    intro_prog_check,
    gen_chem_check,
    phys_1_check,
    phys_2_check,
    phys_3_check,
    dig_logic_check,
    phys_ed_check,
    engr_dist_check,
    engr_interest_check,
];

/// All common core requirements.
pub fn common_core_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    run_all(&CHECKS_TO_RUN, roster, ctx, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{Position, RequirementClaim};
    use crate::orchestrator::CheckContext;
    use gradcheck_catalog::CatalogCache;

    fn term(token: &str) -> Term {
        Term::parse(token).unwrap()
    }

    fn record(subject: &str, nbr: &str, credits: f32) -> gradcheck_catalog::RawClass {
        serde_json::from_value(serde_json::json!({
            "subject": subject,
            "catalogNbr": nbr,
            "titleShort": "Title",
            "titleLong": "Long Title",
            "enrollGroups": [{
                "unitsMinimum": credits,
                "unitsMaximum": credits,
                "simpleCombinations": []
            }]
        }))
        .unwrap()
    }

    fn ctx() -> CheckContext {
        let mut cache = CatalogCache::offline(vec![term("SP23"), term("FA23")]);
        cache.seed(term("FA23"), "PHYS", vec![
            record("PHYS", "1112", 4.0),
            record("PHYS", "1116", 4.0),
            record("PHYS", "1110", 1.0),
        ]);
        cache.seed(term("SP23"), "PHYS", vec![record("PHYS", "1112", 4.0)]);
        CheckContext::new(cache)
    }

    fn claim(tag: ReqTag, course: &str, credits: &str, term_token: &str) -> RequirementClaim {
        RequirementClaim::from_fields(tag, course, credits, term_token, "A", Position("B2".into()))
    }

    #[test]
    fn phys_1112_after_su23_requires_exp_phys() {
        let mut roster = Roster::new("abc123");
        roster
            .req_claims
            .push(claim(ReqTag::Phys1, "PHYS 1112", "4", "FA23"));

        // No EXP. PHYS. claim supplied: the conditional requirement fires
        // and reports the missing claim.
        let mut log = CheckLog::new();
        let outcome = phys_1_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 1);
    }

    #[test]
    fn phys_1112_after_su23_with_exp_phys_passes() {
        let mut roster = Roster::new("abc123");
        roster
            .req_claims
            .push(claim(ReqTag::Phys1, "PHYS 1112", "4", "FA23"));
        roster
            .req_claims
            .push(claim(ReqTag::ExpPhys, "PHYS 1110", "1", "FA23"));

        let mut log = CheckLog::new();
        let outcome = phys_1_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 0);
    }

    #[test]
    fn phys_1116_does_not_require_exp_phys() {
        let mut roster = Roster::new("abc123");
        roster
            .req_claims
            .push(claim(ReqTag::Phys1, "PHYS 1116", "4", "FA23"));

        let mut log = CheckLog::new();
        let outcome = phys_1_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 0);
    }

    #[test]
    fn phys_1112_at_or_before_su23_does_not_require_exp_phys() {
        let mut roster = Roster::new("abc123");
        roster
            .req_claims
            .push(claim(ReqTag::Phys1, "PHYS 1112", "4", "SP23"));

        let mut log = CheckLog::new();
        let outcome = phys_1_check(&mut roster, &mut ctx(), &mut log).unwrap();
        assert_eq!(outcome.errors, 0);
    }
}
