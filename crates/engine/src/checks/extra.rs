//! Extra courses. They satisfy nothing, so the only check is that each
//! one was actually offered as reported.

use gradcheck_catalog::CatalogError;

use crate::claim::ReqTag;
use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::roster::Roster;
use crate::rules::{basic_check, Expected};

pub fn extra_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Extra,
        &[],
        Expected::Any,
        false,
    )
    .map(CheckOutcome::from)
}
