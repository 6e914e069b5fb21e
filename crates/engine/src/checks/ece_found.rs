//! ECE foundation requirements. Each is one named course claimed for its
//! full credit amount.

use gradcheck_catalog::CatalogError;

use crate::claim::ReqTag;
use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::predicate::Predicate;
use crate::roster::Roster;
use crate::rules::{basic_check, Expected};

use super::{run_all, CheckFnPtr};

fn named_foundation(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
    tag: ReqTag,
    course: &str,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        tag,
        &[Predicate::named(course)],
        Expected::Exactly(1),
        true,
    )
    .map(CheckOutcome::from)
}

pub fn electromag_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    named_foundation(roster, ctx, log, ReqTag::Electromag, "ECE 3030")
}

pub fn embedded_sys_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    named_foundation(roster, ctx, log, ReqTag::EmbeddedSys, "ECE 3140")
}

pub fn intro_prob_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    named_foundation(roster, ctx, log, ReqTag::IntroProb, "ECE 3100")
}

pub fn microelectronics_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    named_foundation(roster, ctx, log, ReqTag::Microelectronics, "ECE 3150")
}

pub fn sig_sys_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    named_foundation(roster, ctx, log, ReqTag::SigSys, "ECE 3250")
}

const CHECKS_TO_RUN: [CheckFnPtr; 5] = [
    electromag_check,
    embedded_sys_check,
    intro_prob_check,
    microelectronics_check,
    sig_sys_check,
];

/// All ECE foundation requirements.
pub fn ece_found_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    run_all(&CHECKS_TO_RUN, roster, ctx, log)
}
