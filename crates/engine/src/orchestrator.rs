//! Batch driver: registers named checks, bulk-populates the catalog cache
//! from every claim in every roster, then runs each check against each
//! roster and aggregates the results.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use gradcheck_catalog::{CatalogCache, CatalogError};
use gradcheck_core::Term;

use crate::checks;
use crate::gradebook::GradeBook;
use crate::log::CheckLog;
use crate::roster::Roster;
use crate::rules::BasicOutcome;

// ---------------------------------------------------------------------------
// Context + outcome
// ---------------------------------------------------------------------------

/// Shared state every check runs against.
pub struct CheckContext {
    pub cache: CatalogCache,
    pub grade_book: Option<GradeBook>,
}

impl CheckContext {
    pub fn new(cache: CatalogCache) -> Self {
        Self {
            cache,
            grade_book: None,
        }
    }

    pub fn with_grade_book(mut self, book: GradeBook) -> Self {
        self.grade_book = Some(book);
        self
    }
}

/// Error/warning counts from one check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub errors: u32,
    pub warnings: u32,
}

impl CheckOutcome {
    pub fn absorb(&mut self, other: CheckOutcome) {
        self.errors += other.errors;
        self.warnings += other.warnings;
    }
}

impl From<BasicOutcome> for CheckOutcome {
    fn from(outcome: BasicOutcome) -> Self {
        Self {
            errors: outcome.errors,
            warnings: outcome.warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

type CheckFn =
    Box<dyn Fn(&mut Roster, &mut CheckContext, &mut CheckLog) -> Result<CheckOutcome, CatalogError>>;

/// Named checks, run in registration order.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<(String, CheckFn)>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &str, check: F)
    where
        F: Fn(&mut Roster, &mut CheckContext, &mut CheckLog) -> Result<CheckOutcome, CatalogError>
            + 'static,
    {
        self.checks.push((name.to_string(), Box::new(check)));
    }

    /// The full shipped check set. The credit and grade checks no-op when
    /// the context carries no grade book.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("common_core", checks::common_core::common_core_check);
        registry.register("ece_core", checks::ece_core::ece_core_check);
        registry.register("ece_foundations", checks::ece_found::ece_found_check);
        registry.register("upper_level", checks::upper_level::upper_level_check);
        registry.register("fws", checks::fws::fws_check);
        registry.register("electives", checks::electives::electives_check);
        registry.register("extra", checks::extra::extra_check);
        registry.register("checkoffs", checks::checkoffs::checkoffs_check);
        registry.register("credits", checks::credits::credits_check);
        registry.register("grades", checks::grades::grade_check);
        registry
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checks.iter().map(|(name, _)| name.as_str())
    }

    /// Run every registered check against every roster.
    ///
    /// The catalog cache is bulk-populated first from every claim in every
    /// roster (and the grade book, when present), so the checks observe a
    /// fully-merged cache and run strictly sequentially after the fetch
    /// barrier.
    pub fn run(
        &self,
        rosters: &mut [Roster],
        ctx: &mut CheckContext,
    ) -> Result<RunResults, CatalogError> {
        let mut pairs: BTreeSet<(Term, String)> = BTreeSet::new();
        for roster in rosters.iter() {
            for claim in &roster.req_claims {
                if let (Some(course), Some(term)) = (&claim.course, claim.term) {
                    pairs.insert((term, course.dept().to_string()));
                }
            }
        }
        if let Some(book) = &ctx.grade_book {
            pairs.extend(book.fetch_pairs());
        }
        ctx.cache.bulk_populate(&pairs)?;

        tracing::debug!(
            checks = self.checks.len(),
            students = rosters.len(),
            "running checks"
        );

        let mut results = RunResults::default();
        for (name, check) in &self.checks {
            for roster in rosters.iter_mut() {
                let mut log = CheckLog::new();
                let outcome = check(roster, ctx, &mut log)?;
                results
                    .students
                    .entry(roster.student_id.clone())
                    .or_default()
                    .push(CheckReport {
                        check: name.clone(),
                        errors: outcome.errors,
                        warnings: outcome.warnings,
                        log,
                    });
            }
        }

        Ok(results)
    }
}

// ---------------------------------------------------------------------------
// Results + summary
// ---------------------------------------------------------------------------

/// One check's result for one student.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub check: String,
    pub errors: u32,
    pub warnings: u32,
    pub log: CheckLog,
}

/// Per-student, per-check results of a full run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResults {
    pub students: BTreeMap<String, Vec<CheckReport>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_errors: u32,
    pub total_warnings: u32,
    pub student_errors: BTreeMap<String, u32>,
    pub passed: bool,
}

impl RunResults {
    pub fn summary(&self) -> Summary {
        let mut student_errors = BTreeMap::new();
        let mut total_errors = 0;
        let mut total_warnings = 0;

        for (student, reports) in &self.students {
            let errors: u32 = reports.iter().map(|r| r.errors).sum();
            total_errors += errors;
            total_warnings += reports.iter().map(|r| r.warnings).sum::<u32>();
            student_errors.insert(student.clone(), errors);
        }

        Summary {
            total_errors,
            total_warnings,
            student_errors,
            passed: total_errors == 0,
        }
    }

    /// The human-readable run summary, for the reporting collaborator.
    pub fn summary_log(&self) -> CheckLog {
        let mut log = CheckLog::new();
        if self.students.is_empty() {
            return log;
        }

        log.info("summary:");
        for (student, reports) in &self.students {
            let errors: u32 = reports.iter().map(|r| r.errors).sum();
            log.info(format!(" - {student}: {errors} errors"));
            for report in reports {
                log.info(format!("    - {}: {} errors", report.check, report.errors));
            }
        }

        let summary = self.summary();
        if summary.total_errors > 0 {
            log.error(format!("overall: {} errors", summary.total_errors));
        } else {
            log.success("all checks passed!");
        }
        log
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
