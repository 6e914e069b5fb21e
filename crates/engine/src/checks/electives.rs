//! Liberal studies and elective slots. No semantic predicates: any number
//! of claims, each of which must simply have been offered as reported.

use gradcheck_catalog::CatalogError;

use crate::claim::ReqTag;
use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::roster::Roster;
use crate::rules::{basic_check, Expected};

use super::{run_all, CheckFnPtr};

fn offered_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
    tag: ReqTag,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(roster, &mut ctx.cache, log, tag, &[], Expected::Any, false)
        .map(CheckOutcome::from)
}

pub fn liberal_studies_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    offered_check(roster, ctx, log, ReqTag::LiberalStudies)
}

pub fn ote_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    offered_check(roster, ctx, log, ReqTag::Ote)
}

pub fn aae_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    offered_check(roster, ctx, log, ReqTag::Aae)
}

const CHECKS_TO_RUN: [CheckFnPtr; 3] = [liberal_studies_check, ote_check, aae_check];

/// All liberal studies and elective slots.
pub fn electives_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    run_all(&CHECKS_TO_RUN, roster, ctx, log)
}
