//! The generic rule-evaluation algorithm.
//!
//! `basic_check` validates every claim under one requirement tag against
//! the catalog plus a set of semantic predicates; `validate_checkoff` does
//! the same for checkoffs after cross-referencing the claimed course
//! against the ordinary requirement claims.

use gradcheck_core::{CourseName, Field, Term};

use gradcheck_catalog::{CatalogCache, CatalogError, CourseOffering};

use crate::claim::{CheckoffTag, ReqTag};
use crate::log::CheckLog;
use crate::predicate::Predicate;
use crate::roster::Roster;

// ---------------------------------------------------------------------------
// Cardinality
// ---------------------------------------------------------------------------

/// How many claims a requirement tag should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Exactly(usize),
    /// Any number of claims, including zero.
    Any,
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Snapshot of the first claim collected under a tag, for callers that
/// branch on what was actually claimed.
#[derive(Debug, Clone)]
pub struct FirstClaim {
    pub course: Option<CourseName>,
    pub term: Option<Term>,
}

#[derive(Debug, Clone, Default)]
pub struct BasicOutcome {
    pub errors: u32,
    pub warnings: u32,
    pub first: Option<FirstClaim>,
}

// ---------------------------------------------------------------------------
// basic_check
// ---------------------------------------------------------------------------

/// Validate every claim under `tag`.
///
/// Per claim: the course must be present, resolvable via the catalog for
/// the claimed term, pass every predicate, and (with `full_credit`) be
/// claimed for the offering's full credit amount. An unknown term is a
/// warning (unverifiable); a provably-absent course is an error. Resolution
/// failures become claim annotations; infrastructure failures propagate.
pub fn basic_check(
    roster: &mut Roster,
    cache: &mut CatalogCache,
    log: &mut CheckLog,
    tag: ReqTag,
    predicates: &[Predicate],
    expected: Expected,
    full_credit: bool,
) -> Result<BasicOutcome, CatalogError> {
    let mut outcome = BasicOutcome {
        first: roster.claims_for(tag).next().map(|claim| FirstClaim {
            course: claim.course.clone(),
            term: claim.term,
        }),
        ..Default::default()
    };

    let count = roster.claims_for(tag).count();
    if let Expected::Exactly(n) = expected {
        if count != n {
            log.error(format!(
                "expected {n} claim(s) for the {tag} requirement, found {count}"
            ));
            outcome.errors += 1;
            for claim in roster.claims_for_mut(tag) {
                claim.validity.mark_error(Field::Requirement);
            }
        }
    }

    for claim in roster.claims_for_mut(tag) {
        // A course name must have been supplied at all.
        let Some(course) = claim.course.clone() else {
            log.error(format!("no course indicated for the {tag} requirement"));
            outcome.errors += 1;
            claim.validity.mark_error(Field::Requirement);
            claim.validity.mark_error(Field::Course);
            claim.validity.mark_error(Field::Term);
            continue;
        };
        claim.validity.mark_valid(Field::Course);

        let Some(term) = claim.term else {
            log.error(format!("no usable term for {course} ({tag} requirement)"));
            outcome.errors += 1;
            claim.validity.mark_error(Field::Term);
            claim.validity.mark_error(Field::Requirement);
            continue;
        };

        // The course must have been offered during the reported term.
        let offering = match cache.offering(&course, term) {
            Ok(offering) => {
                claim.validity.mark_valid(Field::Term);
                offering
            }
            Err(err @ CatalogError::TermNotFound(_)) => {
                log.warning(format!("{err}, so can't check {course}"));
                outcome.warnings += 1;
                claim.validity.mark_warning(Field::Term);
                claim.validity.mark_warning(Field::Requirement);
                continue;
            }
            Err(err) if err.is_resolution() => {
                log.error(err.to_string());
                outcome.errors += 1;
                claim.validity.mark_error(Field::Term);
                claim.validity.mark_error(Field::Requirement);
                continue;
            }
            Err(err) => return Err(err),
        };

        // Finally, the resolved offering must satisfy the semantics.
        let mut claim_ok = true;

        for predicate in predicates {
            if !predicate.check(&offering) {
                log.error(format!(
                    "{tag} check failed by {course}: {}",
                    predicate.reason()
                ));
                claim_ok = false;
                outcome.errors += 1;
            }
        }

        if full_credit && !full_credit_matches(claim.credits, &offering) {
            log.error(format!(
                "reported taking {course} for {} credits instead of the full {} \
                 for the {tag} requirement",
                claim
                    .credits
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "no".into()),
                offering.max_credits(),
            ));
            claim_ok = false;
            outcome.errors += 1;
        }

        if claim_ok {
            log.success(format!("{tag} requirement fully satisfied by {course}"));
            claim.validity.mark_valid(Field::Requirement);
        } else {
            claim.validity.mark_error(Field::Requirement);
        }
    }

    Ok(outcome)
}

fn full_credit_matches(claimed: Option<u32>, offering: &CourseOffering) -> bool {
    claimed.map(|credits| credits as f32) == Some(offering.max_credits())
}

// ---------------------------------------------------------------------------
// validate_checkoff
// ---------------------------------------------------------------------------

/// Validate the single claim under a checkoff tag.
///
/// The claimed course must also appear as the course of some ordinary
/// requirement claim; the referenced claim's (course, term) is then
/// resolved and run through the predicates. Cross-listing aliases are
/// deliberately not chased: checkoffs normally repeat the requirement
/// claim's exact name.
pub fn validate_checkoff(
    roster: &mut Roster,
    cache: &mut CatalogCache,
    log: &mut CheckLog,
    tag: CheckoffTag,
    predicates: &[Predicate],
) -> Result<BasicOutcome, CatalogError> {
    let mut outcome = BasicOutcome::default();

    let count = roster.checkoffs_for(tag).count();
    if count != 1 {
        log.error(format!(
            "expected 1 claim for the {tag} checkoff, found {count}"
        ));
        outcome.errors += 1;
        for claim in roster.checkoffs_for_mut(tag) {
            claim.validity.mark_error(Field::Requirement);
        }
        return Ok(outcome);
    }

    // Read side first: the claimed course and the requirement claim it
    // references.
    let course = roster
        .checkoffs_for(tag)
        .next()
        .and_then(|claim| claim.course.clone());

    let Some(course) = course else {
        log.error(format!("no course indicated for the {tag} checkoff"));
        outcome.errors += 1;
        if let Some(claim) = roster.checkoffs_for_mut(tag).next() {
            claim.validity.mark_error(Field::Course);
            claim.validity.mark_error(Field::Requirement);
        }
        return Ok(outcome);
    };

    let referenced = roster
        .req_claims
        .iter()
        .find(|claim| claim.course.as_ref() == Some(&course))
        .map(|claim| claim.term);

    outcome.first = Some(FirstClaim {
        course: Some(course.clone()),
        term: referenced.flatten(),
    });

    let Some(claim) = roster.checkoffs_for_mut(tag).next() else {
        return Ok(outcome);
    };

    // Cross-reference: the course must satisfy a requirement elsewhere.
    let Some(req_term) = referenced else {
        log.error(format!(
            "{course} not found among the requirement claims"
        ));
        outcome.errors += 1;
        claim.validity.mark_error(Field::Course);
        claim.validity.mark_error(Field::Requirement);
        return Ok(outcome);
    };
    log.info(format!("{course} found among the requirement claims"));
    claim.validity.mark_valid(Field::Course);

    let Some(term) = req_term else {
        log.error(format!(
            "the requirement claim for {course} has no usable term"
        ));
        outcome.errors += 1;
        claim.validity.mark_error(Field::Course);
        claim.validity.mark_error(Field::Requirement);
        return Ok(outcome);
    };

    let offering = match cache.offering(&course, term) {
        Ok(offering) => offering,
        Err(err) if err.is_resolution() => {
            log.error(format!("{course} wasn't offered in {term}: {err}"));
            outcome.errors += 1;
            claim.validity.mark_error(Field::Course);
            claim.validity.mark_error(Field::Requirement);
            return Ok(outcome);
        }
        Err(err) => return Err(err),
    };

    if predicates.iter().all(|predicate| predicate.check(&offering)) {
        log.success(format!("{tag} checkoff fully satisfied by {course}"));
        claim.validity.mark_valid(Field::Requirement);
    } else {
        log.error(format!("{tag} checkoff not satisfied by {course}"));
        outcome.errors += 1;
        claim.validity.mark_error(Field::Requirement);
    }

    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
