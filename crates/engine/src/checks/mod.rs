//! The shipped degree checks, all built on the rule engine.
//!
//! Each check function takes the roster under test, the shared context
//! (catalog cache + optional grade book), and the log it reports into, and
//! returns its error/warning counts. Group wrappers sum their members.

pub mod checkoffs;
pub mod common_core;
pub mod credits;
pub mod ece_core;
pub mod ece_found;
pub mod electives;
pub mod extra;
pub mod fws;
pub mod grades;
pub mod upper_level;

use gradcheck_catalog::CatalogError;

use crate::log::CheckLog;
use crate::orchestrator::{CheckContext, CheckOutcome};
use crate::roster::Roster;

/// Plain-function check signature, for building group wrappers.
pub type CheckFnPtr =
    fn(&mut Roster, &mut CheckContext, &mut CheckLog) -> Result<CheckOutcome, CatalogError>;

/// Run a slice of checks in order, summing their outcomes.
pub fn run_all(
    checks: &[CheckFnPtr],
    roster: &mut Roster,
    ctx: &mut CheckContext,
    log: &mut CheckLog,
) -> Result<CheckOutcome, CatalogError> {
    let mut outcome = CheckOutcome::default();
    for check in checks {
        outcome.absorb(check(roster, ctx, log)?);
    }
    Ok(outcome)
}
