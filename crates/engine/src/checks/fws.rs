//! First-year writing seminar requirements: two claims, both FWS-flagged.

use gradcheck_catalog::CatalogError;

use crate::claim::ReqTag;
use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::predicate::Predicate;
use crate::roster::Roster;
use crate::rules::{basic_check, Expected};

pub fn fws_check(
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    basic_check(
        roster,
        &mut ctx.cache,
        log,
        ReqTag::Fws,
        &[Predicate::fws()],
        Expected::Exactly(2),
        false,
    )
    .map(CheckOutcome::from)
}
