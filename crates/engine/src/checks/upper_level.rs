//! Upper-level elective requirements: the 3000+/4000+ slots, the
//! culminating design experience, and the 21-credit sum across all three.

use gradcheck_catalog::{CatalogError, CourseOffering};
use gradcheck_core::{CourseName, Field};

use crate::claim::ReqTag;
use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::predicate::Predicate;
use crate::roster::Roster;
use crate::rules::{basic_check, Expected};

const UPPER_LEVEL_TAGS: [ReqTag; 3] = [ReqTag::Upper3000, ReqTag::Upper4000, ReqTag::Cde];

/// Credit-hours the upper-level electives must sum to.
const REQUIRED_CREDITS: u32 = 21;

/// ECE courses that count as a CDE without the catalog flag.
const CDE_ECE_COURSES: [&str; 5] = ["ECE 4530", "ECE 4670", "ECE 4740", "ECE 4750", "ECE 4760"];

/// CS courses that count as a CDE outright.
const CDE_CS_COURSES: [&str; 4] = ["CS 4120", "CS 4121", "CS 4410", "CS 4411"];

fn is_cde(offering: &CourseOffering) -> bool {
    let has_any = |names: &[&str]| {
        names
            .iter()
            .filter_map(|name| CourseName::parse(name).ok())
            .any(|name| offering.has_name(&name))
    };

    if has_any(&CDE_CS_COURSES) {
        return true;
    }

    offering.in_department("ECE")
        && offering.level() >= 4000
        && (has_any(&CDE_ECE_COURSES) || offering.is_cde())
}

pub fn cde_predicate() -> Predicate {
    Predicate::new("class isn't a valid culminating design experience", is_cde)
}

pub fn junior_level_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Upper3000,
        &[Predicate::in_dept("ECE"), Predicate::at_level(3000)],
        Expected::Any,
        false,
    )
    .map(CheckOutcome::from)
}

pub fn senior_level_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Upper4000,
        &[Predicate::in_dept("ECE"), Predicate::at_level(4000)],
        Expected::Any,
        false,
    )
    .map(CheckOutcome::from)
}

pub fn cde_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Cde,
        &[cde_predicate()],
        Expected::Exactly(1),
        false,
    )
    .map(CheckOutcome::from)
}

/// All upper-level elective requirements, preceded by the credit-sum rule.
pub fn upper_level_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    let mut outcome = CheckOutcome::default();

    let claimed: u32 = UPPER_LEVEL_TAGS
        .iter()
        .flat_map(|tag| roster.claims_for(*tag))
        .map(|claim| claim.credits.unwrap_or(0))
        .sum();

    if claimed < REQUIRED_CREDITS {
        log.error(format!(
            "upper-level electives sum to {claimed} (<{REQUIRED_CREDITS}) credits"
        ));
        outcome.errors += 1;
        for tag in UPPER_LEVEL_TAGS {
            for claim in roster.claims_for_mut(tag) {
                claim.validity.mark_error(Field::Requirement);
            }
        }
    }

    outcome.absorb(junior_level_check(roster, ctx, log)?);
    outcome.absorb(senior_level_check(roster, ctx, log)?);
    outcome.absorb(cde_check(roster, ctx, log)?);

    Ok(outcome)
}
