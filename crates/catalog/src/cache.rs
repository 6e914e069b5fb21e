//! Process-wide catalog cache.
//!
//! Department-level fetches are the unit of caching (the service only
//! supports term + department queries). Entries are added once per key and
//! never invalidated within a run; a pending set keeps a batch from issuing
//! the same fetch twice.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::thread;

use gradcheck_core::{CourseName, Term};

use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::offering::{CourseOffering, RawClass};

type DeptKey = (Term, String);

/// Cache over the catalog service. Owns the client (if any) and every
/// response fetched so far.
pub struct CatalogCache {
    client: Option<CatalogClient>,
    /// Terms the service has data for, in service order. Fetched once.
    terms: Option<Vec<Term>>,
    /// (term, dept) -> class records returned for that pair.
    classes: HashMap<DeptKey, Vec<RawClass>>,
    /// Pairs known to have no offerings (empty-department status, or a
    /// degraded bulk fetch).
    absent: HashSet<DeptKey>,
    /// Pairs with a fetch outstanding during bulk population.
    pending: HashSet<DeptKey>,
}

impl CatalogCache {
    /// A cache backed by the live service.
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client: Some(client),
            terms: None,
            classes: HashMap::new(),
            absent: HashSet::new(),
            pending: HashSet::new(),
        }
    }

    /// A cache with no client: only seeded data resolves, and every
    /// unseeded department reads as absent.
    pub fn offline(terms: Vec<Term>) -> Self {
        Self {
            client: None,
            terms: Some(terms),
            classes: HashMap::new(),
            absent: HashSet::new(),
            pending: HashSet::new(),
        }
    }

    /// Insert the class records for one (term, department) pair, as the
    /// bulk merge does. Existing entries are kept (entries are added once
    /// per key).
    pub fn seed(&mut self, term: Term, dept: &str, records: Vec<RawClass>) {
        self.classes
            .entry((term, dept.to_string()))
            .or_insert(records);
    }

    /// All terms the service has data for, in service order.
    pub fn known_terms(&mut self) -> Result<&[Term], CatalogError> {
        self.ensure_terms()?;
        Ok(self.terms.as_deref().unwrap_or(&[]))
    }

    fn ensure_terms(&mut self) -> Result<(), CatalogError> {
        if self.terms.is_none() {
            let terms = match &self.client {
                Some(client) => client.terms()?,
                None => Vec::new(),
            };
            self.terms = Some(terms);
        }
        Ok(())
    }

    /// Whether `term` is chronologically beyond every term the service
    /// knows about.
    pub fn in_future(&mut self, term: Term) -> Result<bool, CatalogError> {
        self.ensure_terms()?;
        let known = self.terms.as_deref().unwrap_or(&[]);
        Ok(known.iter().all(|t| *t < term))
    }

    // -----------------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------------

    /// Resolve a course for the term it was claimed in.
    pub fn resolve(
        &mut self,
        course: &CourseName,
        term: Term,
    ) -> Result<CourseOffering, CatalogError> {
        self.ensure_terms()?;
        let known = self.terms.as_deref().unwrap_or(&[]);
        if !known.contains(&term) {
            return Err(CatalogError::TermNotFound(term));
        }

        let raw = self.lookup(course, term)?;
        CourseOffering::from_raw(&raw, term, term)
    }

    /// Resolve the most recent prior offering of a course claimed for a
    /// future term. Walks known terms most-recent-first and returns the
    /// first match, with `term_sourced` naming the term the data came from.
    pub fn resolve_most_recent(
        &mut self,
        course: &CourseName,
        future_term: Term,
    ) -> Result<CourseOffering, CatalogError> {
        let mut candidates = self.known_terms()?.to_vec();
        candidates.sort();
        candidates.reverse();

        for sourced in candidates {
            match self.lookup(course, sourced) {
                Ok(raw) => return CourseOffering::from_raw(&raw, future_term, sourced),
                Err(err) if err.is_resolution() => continue,
                Err(err) => return Err(err),
            }
        }

        Err(CatalogError::NoClassInfo {
            course: course.clone(),
            term: future_term,
        })
    }

    /// The rule engine's entry point: resolve for the claimed term, falling
    /// back to the most recent prior offering only when the claimed term is
    /// beyond everything the service knows about.
    pub fn offering(
        &mut self,
        course: &CourseName,
        term: Term,
    ) -> Result<CourseOffering, CatalogError> {
        match self.resolve(course, term) {
            Err(CatalogError::TermNotFound(_)) => {
                if self.in_future(term)? {
                    self.resolve_most_recent(course, term)
                } else {
                    Err(CatalogError::TermNotFound(term))
                }
            }
            other => other,
        }
    }

    /// Find the raw record for a course, fetching the department on a cache
    /// miss (when a client is available).
    fn lookup(&mut self, course: &CourseName, term: Term) -> Result<RawClass, CatalogError> {
        let key = (term, course.dept().to_string());

        if self.absent.contains(&key) {
            return Err(CatalogError::DeptNotFound {
                dept: course.dept().to_string(),
                term,
            });
        }

        if !self.classes.contains_key(&key) {
            match &self.client {
                Some(client) => match client.search(term, course.dept())? {
                    Some(records) => {
                        self.classes.insert(key.clone(), records);
                    }
                    None => {
                        self.absent.insert(key);
                        return Err(CatalogError::DeptNotFound {
                            dept: course.dept().to_string(),
                            term,
                        });
                    }
                },
                None => {
                    return Err(CatalogError::DeptNotFound {
                        dept: course.dept().to_string(),
                        term,
                    });
                }
            }
        }

        let records = self.classes.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        records
            .iter()
            .find(|record| record.catalog_nbr == course.number())
            .cloned()
            .ok_or_else(|| CatalogError::ClassNotFound {
                course: course.clone(),
                term,
            })
    }

    // -----------------------------------------------------------------------
    // Bulk population
    // -----------------------------------------------------------------------

    /// Fetch every not-yet-cached (term, department) pair concurrently and
    /// merge the responses in one sequential pass. A pair whose fetch times
    /// out, returns a malformed body, or reports no offerings is degraded to
    /// absent rather than failing the batch.
    pub fn bulk_populate(&mut self, pairs: &BTreeSet<(Term, String)>) -> Result<(), CatalogError> {
        self.ensure_terms()?;

        // Dedup against cached, known-absent, and in-flight keys.
        let todo: Vec<DeptKey> = pairs
            .iter()
            .filter(|key| {
                !self.classes.contains_key(*key)
                    && !self.absent.contains(*key)
                    && !self.pending.contains(*key)
            })
            .cloned()
            .collect();

        let client = match &self.client {
            Some(client) => client.clone(),
            None => return Ok(()),
        };
        if todo.is_empty() {
            return Ok(());
        }

        self.pending.extend(todo.iter().cloned());
        tracing::debug!(pairs = todo.len(), "bulk catalog fetch");

        // One fetch per pair, joined as a single barrier; nothing is merged
        // until every fetch has come back.
        let results: Vec<(DeptKey, Result<Option<Vec<RawClass>>, CatalogError>)> =
            thread::scope(|scope| {
                let handles: Vec<_> = todo
                    .into_iter()
                    .map(|key| {
                        let client = &client;
                        scope.spawn(move || {
                            let result = client.search(key.0, &key.1);
                            (key, result)
                        })
                    })
                    .collect();

                handles
                    .into_iter()
                    .map(|handle| match handle.join() {
                        Ok(outcome) => outcome,
                        Err(_) => panic!("catalog fetch thread panicked"),
                    })
                    .collect()
            });

        // Single sequential merge pass.
        for (key, result) in results {
            self.pending.remove(&key);
            match result {
                Ok(Some(records)) => {
                    self.classes.insert(key, records);
                }
                Ok(None) => {
                    // No offerings that term; later resolves report DeptNotFound.
                    self.absent.insert(key);
                }
                Err(err) => {
                    tracing::warn!(term = %key.0, dept = %key.1, error = %err,
                        "bulk fetch degraded to absent");
                    self.absent.insert(key);
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offering::{RawClass, RawCombination, RawEnrollGroup};

    fn term(token: &str) -> Term {
        Term::parse(token).unwrap()
    }

    fn course(name: &str) -> CourseName {
        CourseName::parse(name).unwrap()
    }

    fn record(subject: &str, nbr: &str) -> RawClass {
        RawClass {
            subject: subject.into(),
            catalog_nbr: nbr.into(),
            title_short: "Title".into(),
            title_long: "Long Title".into(),
            catalog_distr: String::new(),
            acad_group: "EN".into(),
            acad_career: "UG".into(),
            catalog_comments: String::new(),
            catalog_prereq_coreq: String::new(),
            enroll_groups: vec![RawEnrollGroup {
                units_minimum: 3.0,
                units_maximum: 4.0,
                simple_combinations: vec![RawCombination {
                    subject: "ENGRD".into(),
                    catalog_nbr: "9999".into(),
                }],
            }],
        }
    }

    fn seeded_cache() -> CatalogCache {
        let mut cache = CatalogCache::offline(vec![term("FA22"), term("SP23")]);
        cache.seed(term("SP23"), "MATH", vec![record("MATH", "1910")]);
        cache.seed(term("FA22"), "ECE", vec![record("ECE", "2100")]);
        cache
    }

    #[test]
    fn resolve_success_sets_both_terms() {
        let mut cache = seeded_cache();
        let offering = cache.resolve(&course("MATH 1910"), term("SP23")).unwrap();
        assert_eq!(offering.term_taken(), term("SP23"));
        assert_eq!(offering.term_sourced(), term("SP23"));
        assert_eq!(offering.max_credits(), 4.0);
    }

    #[test]
    fn resolve_unknown_term() {
        let mut cache = seeded_cache();
        let err = cache.resolve(&course("MATH 1910"), term("SP19")).unwrap_err();
        assert!(matches!(err, CatalogError::TermNotFound(_)));
    }

    #[test]
    fn resolve_absent_department() {
        let mut cache = seeded_cache();
        let err = cache.resolve(&course("CHEM 2090"), term("SP23")).unwrap_err();
        assert!(matches!(err, CatalogError::DeptNotFound { .. }));
    }

    #[test]
    fn resolve_missing_catalog_number() {
        let mut cache = seeded_cache();
        let err = cache.resolve(&course("MATH 2930"), term("SP23")).unwrap_err();
        assert!(matches!(err, CatalogError::ClassNotFound { .. }));
    }

    #[test]
    fn most_recent_walks_terms_backwards() {
        // ECE 2100 exists only in FA22; SP23 is tried first and skipped.
        let mut cache = seeded_cache();
        cache.seed(term("SP23"), "ECE", vec![record("ECE", "2300")]);

        let offering = cache
            .resolve_most_recent(&course("ECE 2100"), term("FA23"))
            .unwrap();
        assert_eq!(offering.term_taken(), term("FA23"));
        assert_eq!(offering.term_sourced(), term("FA22"));
    }

    #[test]
    fn most_recent_reports_no_class_info() {
        let mut cache = seeded_cache();
        let err = cache
            .resolve_most_recent(&course("PHYS 2214"), term("FA23"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::NoClassInfo { .. }));
    }

    #[test]
    fn offering_falls_back_only_for_future_terms() {
        let mut cache = seeded_cache();

        // FA23 is beyond both known terms: fall back.
        let offering = cache.offering(&course("MATH 1910"), term("FA23")).unwrap();
        assert_eq!(offering.term_sourced(), term("SP23"));

        // WI23 is unknown but not in the future (SP23 is later): propagate.
        let err = cache.offering(&course("MATH 1910"), term("WI23")).unwrap_err();
        assert!(matches!(err, CatalogError::TermNotFound(_)));
    }

    #[test]
    fn offline_bulk_populate_is_a_no_op() {
        let mut cache = seeded_cache();
        let pairs: BTreeSet<(Term, String)> =
            [(term("SP23"), "CHEM".to_string())].into_iter().collect();
        cache.bulk_populate(&pairs).unwrap();
        assert!(cache
            .resolve(&course("CHEM 2090"), term("SP23"))
            .is_err());
    }

    #[test]
    fn seed_keeps_first_entry() {
        let mut cache = seeded_cache();
        cache.seed(term("SP23"), "MATH", vec![]);
        assert!(cache.resolve(&course("MATH 1910"), term("SP23")).is_ok());
    }
}
