//! Semantic predicates over resolved offerings.
//!
//! Each predicate pairs a pure test with the failure reason a check logs
//! when the test comes back false. The rule engine runs every predicate a
//! check supplies; predicates are how ~30 distinct degree rules share one
//! evaluation algorithm.

use gradcheck_core::CourseName;

use gradcheck_catalog::CourseOffering;

/// A named semantic test of a resolved course offering.
pub struct Predicate {
    test: Box<dyn Fn(&CourseOffering) -> bool + Send + Sync>,
    reason: String,
}

impl Predicate {
    pub fn new(
        reason: impl Into<String>,
        test: impl Fn(&CourseOffering) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            test: Box::new(test),
            reason: reason.into(),
        }
    }

    pub fn check(&self, offering: &CourseOffering) -> bool {
        (self.test)(offering)
    }

    /// Human-readable reason logged when the predicate fails.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The offering goes by exactly this name (cross-listings count).
    pub fn named(name: &str) -> Self {
        let target = CourseName::parse(name).ok();
        Self::new(format!("class isn't {name}"), move |offering| {
            target
                .as_ref()
                .map(|t| offering.has_name(t))
                .unwrap_or(false)
        })
    }

    /// The offering goes by any of these names.
    pub fn any_of(names: &[&str]) -> Self {
        let reason = format!("class isn't {}", names.join(" or "));
        let targets: Vec<CourseName> = names
            .iter()
            .filter_map(|name| CourseName::parse(name).ok())
            .collect();
        Self::new(reason, move |offering| {
            targets.iter().any(|t| offering.has_name(t))
        })
    }

    /// The offering is (cross-)listed in the department.
    pub fn in_dept(dept: &str) -> Self {
        let target = dept.to_string();
        Self::new(format!("class isn't in the {dept} department"), move |offering| {
            offering.in_department(&target)
        })
    }

    /// The offering's catalog number is at or above the level.
    pub fn at_level(level: u32) -> Self {
        Self::new(format!("class isn't at the {level} level"), move |offering| {
            offering.level() >= level
        })
    }

    /// The offering is a first-year writing seminar.
    pub fn fws() -> Self {
        Self::new("class isn't an FWS", |offering| offering.is_fws())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradcheck_catalog::RawClass;
    use gradcheck_core::Term;

    fn offering(subject: &str, nbr: &str, title_long: &str) -> CourseOffering {
        let raw: RawClass = serde_json::from_value(serde_json::json!({
            "subject": subject,
            "catalogNbr": nbr,
            "titleShort": "Title",
            "titleLong": title_long,
            "enrollGroups": [{
                "unitsMinimum": 3.0,
                "unitsMaximum": 3.0,
                "simpleCombinations": [
                    { "subject": "ENGRD", "catalogNbr": "2220" }
                ]
            }]
        }))
        .unwrap();
        let term = Term::parse("FA23").unwrap();
        CourseOffering::from_raw(&raw, term, term).unwrap()
    }

    #[test]
    fn named_matches_crosslistings() {
        let offering = offering("ECE", "2200", "Signals");
        assert!(Predicate::named("ECE 2200").check(&offering));
        assert!(Predicate::named("ENGRD 2220").check(&offering));
        assert!(!Predicate::named("ECE 2300").check(&offering));
    }

    #[test]
    fn any_of_matches_any_name() {
        let offering = offering("PHYS", "2213", "Physics II");
        let predicate = Predicate::any_of(&["PHYS 2213", "PHYS 2217"]);
        assert!(predicate.check(&offering));
        assert_eq!(predicate.reason(), "class isn't PHYS 2213 or PHYS 2217");
    }

    #[test]
    fn dept_and_level() {
        let offering = offering("ECE", "4750", "Computer Architecture");
        assert!(Predicate::in_dept("ECE").check(&offering));
        assert!(Predicate::in_dept("ENGRD").check(&offering));
        assert!(!Predicate::in_dept("CS").check(&offering));
        assert!(Predicate::at_level(4000).check(&offering));
        assert!(!Predicate::at_level(5000).check(&offering));
    }

    #[test]
    fn fws_flag() {
        assert!(Predicate::fws().check(&offering("ENGL", "1170", "FWS: Short Stories")));
        assert!(!Predicate::fws().check(&offering("MATH", "1910", "Calculus")));
    }
}
