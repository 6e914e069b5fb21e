use serde::Serialize;

use gradcheck_core::ValidityMap;

use crate::claim::{CheckoffClaim, CheckoffTag, Position, ReqTag, RequirementClaim};

/// One student's full set of claims, as extracted from their checklist.
/// Checks mutate the claims' validity in place; the roster itself lives for
/// the whole run.
#[derive(Debug, Clone, Serialize)]
pub struct Roster {
    pub student_id: String,
    pub req_claims: Vec<RequirementClaim>,
    pub checkoff_claims: Vec<CheckoffClaim>,
}

impl Roster {
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            req_claims: Vec::new(),
            checkoff_claims: Vec::new(),
        }
    }

    pub fn claims_for(&self, tag: ReqTag) -> impl Iterator<Item = &RequirementClaim> {
        self.req_claims.iter().filter(move |claim| claim.tag == tag)
    }

    pub fn claims_for_mut(&mut self, tag: ReqTag) -> impl Iterator<Item = &mut RequirementClaim> {
        self.req_claims
            .iter_mut()
            .filter(move |claim| claim.tag == tag)
    }

    pub fn checkoffs_for(&self, tag: CheckoffTag) -> impl Iterator<Item = &CheckoffClaim> {
        self.checkoff_claims
            .iter()
            .filter(move |claim| claim.tag == tag)
    }

    pub fn checkoffs_for_mut(
        &mut self,
        tag: CheckoffTag,
    ) -> impl Iterator<Item = &mut CheckoffClaim> {
        self.checkoff_claims
            .iter_mut()
            .filter(move |claim| claim.tag == tag)
    }

    /// The final validity for the claim at a document position, for the
    /// annotation layer.
    pub fn validity_at(&self, position: &Position) -> Option<&ValidityMap> {
        self.req_claims
            .iter()
            .find(|claim| claim.position == *position)
            .map(|claim| &claim.validity)
            .or_else(|| {
                self.checkoff_claims
                    .iter()
                    .find(|claim| claim.position == *position)
                    .map(|claim| &claim.validity)
            })
    }
}
