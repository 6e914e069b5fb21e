//! ECE core requirements.

use gradcheck_catalog::CatalogError;

use crate::claim::ReqTag;
use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::predicate::Predicate;
use crate::roster::Roster;
use crate::rules::{basic_check, Expected};

use super::{run_all, CheckFnPtr};

pub fn circuits_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Circuits,
        &[Predicate::named("ECE 2100")],
        Expected::Exactly(1),
        true,
    )
    .map(CheckOutcome::from)
}

pub fn data_science_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::DataScience,
        &[Predicate::any_of(&["ECE 2200", "ECE 2720"])],
        Expected::Exactly(1),
        true,
    )
    .map(CheckOutcome::from)
}

const CHECKS_TO_RUN: [CheckFnPtr; 2] = [circuits_check, data_science_check];

/// All ECE core requirements.
pub fn ece_core_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    run_all(&CHECKS_TO_RUN, roster, ctx, log)
}
