use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use gradcheck_core::{CourseName, Term};

use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// Wire records
// ---------------------------------------------------------------------------

/// A class record as returned by the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawClass {
    pub subject: String,
    #[serde(rename = "catalogNbr")]
    pub catalog_nbr: String,
    #[serde(rename = "titleShort", default)]
    pub title_short: String,
    #[serde(rename = "titleLong", default)]
    pub title_long: String,
    #[serde(rename = "catalogDistr", default)]
    pub catalog_distr: String,
    #[serde(rename = "acadGroup", default)]
    pub acad_group: String,
    #[serde(rename = "acadCareer", default)]
    pub acad_career: String,
    #[serde(rename = "catalogComments", default)]
    pub catalog_comments: String,
    #[serde(rename = "catalogPrereqCoreq", default)]
    pub catalog_prereq_coreq: String,
    #[serde(rename = "enrollGroups", default)]
    pub enroll_groups: Vec<RawEnrollGroup>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawEnrollGroup {
    #[serde(rename = "unitsMinimum", default)]
    pub units_minimum: f32,
    #[serde(rename = "unitsMaximum", default)]
    pub units_maximum: f32,
    #[serde(rename = "simpleCombinations", default)]
    pub simple_combinations: Vec<RawCombination>,
}

/// One cross-listing of a class.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCombination {
    pub subject: String,
    #[serde(rename = "catalogNbr")]
    pub catalog_nbr: String,
}

// ---------------------------------------------------------------------------
// CourseOffering
// ---------------------------------------------------------------------------

/// Long-title marker for first-year writing seminars.
const FWS_TITLE_MARKER: &str = "FWS: ";

/// Catalog text marker for culminating design experiences (upper-cased for
/// case-insensitive search).
const CDE_TEXT_MARKER: &str = "CULMINATING DESIGN EXPERIENCE (CDE)";

/// One course as offered in one term. Immutable once constructed; built from
/// the raw catalog record on first lookup of its (term, department).
#[derive(Debug, Clone, Serialize)]
pub struct CourseOffering {
    primary_name: CourseName,
    all_names: BTreeSet<CourseName>,
    title: String,
    title_long: String,
    distribution: Vec<String>,
    acad_group: String,
    acad_career: String,
    min_credits: f32,
    max_credits: f32,
    is_fws: bool,
    is_cde: bool,
    term_taken: Term,
    term_sourced: Term,
}

impl CourseOffering {
    /// Build an offering from its wire record. `term_taken` is the term the
    /// claim named; `term_sourced` is the term the data came from (different
    /// only after a future-term fallback).
    pub fn from_raw(
        raw: &RawClass,
        term_taken: Term,
        term_sourced: Term,
    ) -> Result<Self, CatalogError> {
        let primary_name = CourseName::parse(&format!("{} {}", raw.subject, raw.catalog_nbr))
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;

        // When a record carries several enrollment groups the first is used.
        let group = raw
            .enroll_groups
            .first()
            .ok_or_else(|| CatalogError::Malformed(format!("{primary_name} has no enroll groups")))?;

        let mut all_names = BTreeSet::new();
        all_names.insert(primary_name.clone());
        for crosslist in &group.simple_combinations {
            let name = CourseName::parse(&format!("{} {}", crosslist.subject, crosslist.catalog_nbr))
                .map_err(|e| CatalogError::Malformed(e.to_string()))?;
            all_names.insert(name);
        }

        let distribution: Vec<String> = raw
            .catalog_distr
            .trim_matches(|c| c == '(' || c == ')')
            .split(", ")
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        // ENGL 2880/2890 carry FWS credit without the title marker.
        let is_fws = raw.title_long.contains(FWS_TITLE_MARKER)
            || all_names
                .iter()
                .any(|name| name.dept() == "ENGL" && matches!(name.number(), "2880" | "2890"));

        let is_cde = raw.catalog_comments.to_uppercase().contains(CDE_TEXT_MARKER)
            || raw.catalog_prereq_coreq.to_uppercase().contains(CDE_TEXT_MARKER);

        Ok(Self {
            primary_name,
            all_names,
            title: raw.title_short.clone(),
            title_long: raw.title_long.clone(),
            distribution,
            acad_group: raw.acad_group.clone(),
            acad_career: raw.acad_career.clone(),
            min_credits: group.units_minimum,
            max_credits: group.units_maximum,
            is_fws,
            is_cde,
            term_taken,
            term_sourced,
        })
    }

    pub fn primary_name(&self) -> &CourseName {
        &self.primary_name
    }

    /// Every name this course goes by, primary included.
    pub fn all_names(&self) -> &BTreeSet<CourseName> {
        &self.all_names
    }

    /// Every department this course is listed in, derived from its names.
    pub fn departments(&self) -> BTreeSet<&str> {
        self.all_names.iter().map(|name| name.dept()).collect()
    }

    pub fn has_name(&self, name: &CourseName) -> bool {
        self.all_names.contains(name)
    }

    pub fn in_department(&self, dept: &str) -> bool {
        self.all_names.iter().any(|name| name.dept() == dept)
    }

    /// Catalog level of the primary name ("ECE 4750" is 4750).
    pub fn level(&self) -> u32 {
        self.primary_name.level()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_long(&self) -> &str {
        &self.title_long
    }

    pub fn distribution(&self) -> &[String] {
        &self.distribution
    }

    pub fn acad_group(&self) -> &str {
        &self.acad_group
    }

    pub fn acad_career(&self) -> &str {
        &self.acad_career
    }

    pub fn min_credits(&self) -> f32 {
        self.min_credits
    }

    pub fn max_credits(&self) -> f32 {
        self.max_credits
    }

    pub fn is_fws(&self) -> bool {
        self.is_fws
    }

    pub fn is_cde(&self) -> bool {
        self.is_cde
    }

    pub fn term_taken(&self) -> Term {
        self.term_taken
    }

    pub fn term_sourced(&self) -> Term {
        self.term_sourced
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
