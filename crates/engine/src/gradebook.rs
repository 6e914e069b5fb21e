//! Trusted grade data, as exported by the registrar.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use gradcheck_core::{CourseName, Grade, Season, Term};

use crate::ledger::{CreditLedger, GradeRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradeBookError {
    /// CSV-level read failure.
    Csv(String),
    /// A required column is missing from the export header.
    MissingColumn(String),
    /// A field failed domain parsing.
    InvalidField {
        row: usize,
        column: String,
        value: String,
    },
    /// No grade data for the student.
    StudentNotFound(String),
    /// No grade data for the student in the term.
    TermNotFound { student: String, term: Term },
    /// No grade data for the course in the student's term.
    ClassNotFound {
        student: String,
        term: Term,
        course: CourseName,
    },
}

impl fmt::Display for GradeBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv(msg) => write!(f, "grade data read error: {msg}"),
            Self::MissingColumn(column) => {
                write!(f, "grade data is missing the '{column}' column")
            }
            Self::InvalidField { row, column, value } => {
                write!(f, "grade data row {row}: cannot parse {column} '{value}'")
            }
            Self::StudentNotFound(student) => {
                write!(f, "no grade information for {student}")
            }
            Self::TermNotFound { student, term } => {
                write!(f, "no grade information for {student} in {term}")
            }
            Self::ClassNotFound {
                student,
                term,
                course,
            } => write!(f, "no grade information for {course} for {student} in {term}"),
        }
    }
}

impl std::error::Error for GradeBookError {}

// ---------------------------------------------------------------------------
// GradeBook
// ---------------------------------------------------------------------------

/// One (course, term) entry of a student's grade data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeEntry {
    pub credits: u32,
    pub grade: Grade,
}

/// Imported registrar grade data: student -> term -> course -> entry.
/// The trusted side of the credit and grade consistency checks.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GradeBook {
    entries: BTreeMap<String, BTreeMap<Term, BTreeMap<CourseName, GradeEntry>>>,
}

const COL_STUDENT: &str = "Netid";
const COL_TERM: &str = "Academic Term Ldescr";
const COL_SUBJECT: &str = "Subject";
const COL_NUMBER: &str = "Catalog Nbr";
const COL_CREDITS: &str = "Unt Taken";
const COL_GRADE: &str = "Official Grade";

impl GradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one registrar CSV export.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GradeBookError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| GradeBookError::Csv(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let idx = |name: &str| -> Result<usize, GradeBookError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| GradeBookError::MissingColumn(name.into()))
        };

        let student_idx = idx(COL_STUDENT)?;
        let term_idx = idx(COL_TERM)?;
        let subject_idx = idx(COL_SUBJECT)?;
        let number_idx = idx(COL_NUMBER)?;
        let credits_idx = idx(COL_CREDITS)?;
        let grade_idx = idx(COL_GRADE)?;

        let mut book = Self::new();

        for (row, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| GradeBookError::Csv(e.to_string()))?;
            let field = |i: usize| record.get(i).unwrap_or("");

            let invalid = |column: &str, value: &str| GradeBookError::InvalidField {
                row: row + 2, // 1-based, after the header
                column: column.into(),
                value: value.into(),
            };

            let student = field(student_idx).trim().to_string();
            if student.is_empty() {
                return Err(invalid(COL_STUDENT, field(student_idx)));
            }

            let term = verbose_term(field(term_idx))
                .ok_or_else(|| invalid(COL_TERM, field(term_idx)))?;

            let course_token = format!("{} {}", field(subject_idx), field(number_idx));
            let course = CourseName::parse(&course_token)
                .map_err(|_| invalid(COL_SUBJECT, &course_token))?;

            let credits = field(credits_idx)
                .trim()
                .parse::<f32>()
                .map(|units| units.round() as u32)
                .map_err(|_| invalid(COL_CREDITS, field(credits_idx)))?;

            let grade = Grade::parse(field(grade_idx))
                .map_err(|_| invalid(COL_GRADE, field(grade_idx)))?;

            book.insert(&student, term, course, credits, grade);
        }

        Ok(book)
    }

    pub fn from_path(path: &Path) -> Result<Self, GradeBookError> {
        let file = File::open(path).map_err(|e| GradeBookError::Csv(e.to_string()))?;
        Self::from_reader(file)
    }

    pub fn insert(
        &mut self,
        student: &str,
        term: Term,
        course: CourseName,
        credits: u32,
        grade: Grade,
    ) {
        self.entries
            .entry(student.to_string())
            .or_default()
            .entry(term)
            .or_default()
            .insert(course, GradeEntry { credits, grade });
    }

    /// Union of two grade books; `other` wins on duplicate entries.
    pub fn merge(mut self, other: GradeBook) -> GradeBook {
        for (student, terms) in other.entries {
            for (term, courses) in terms {
                for (course, entry) in courses {
                    self.entries
                        .entry(student.clone())
                        .or_default()
                        .entry(term)
                        .or_default()
                        .insert(course, entry);
                }
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(
        &self,
        student: &str,
        term: Term,
        course: &CourseName,
    ) -> Result<GradeEntry, GradeBookError> {
        let terms = self
            .entries
            .get(student)
            .ok_or_else(|| GradeBookError::StudentNotFound(student.to_string()))?;
        let courses = terms.get(&term).ok_or_else(|| GradeBookError::TermNotFound {
            student: student.to_string(),
            term,
        })?;
        courses
            .get(course)
            .copied()
            .ok_or_else(|| GradeBookError::ClassNotFound {
                student: student.to_string(),
                term,
                course: course.clone(),
            })
    }

    pub fn credits_for(
        &self,
        student: &str,
        term: Term,
        course: &CourseName,
    ) -> Result<u32, GradeBookError> {
        Ok(self.entry(student, term, course)?.credits)
    }

    pub fn grade_for(
        &self,
        student: &str,
        term: Term,
        course: &CourseName,
    ) -> Result<Grade, GradeBookError> {
        Ok(self.entry(student, term, course)?.grade)
    }

    /// Every term the student took the course (possibly several).
    pub fn when_taken(
        &self,
        student: &str,
        course: &CourseName,
    ) -> Result<Vec<Term>, GradeBookError> {
        let terms = self
            .entries
            .get(student)
            .ok_or_else(|| GradeBookError::StudentNotFound(student.to_string()))?;

        Ok(terms
            .iter()
            .filter(|(_, courses)| courses.contains_key(course))
            .map(|(term, _)| *term)
            .collect())
    }

    /// A credit ledger over all of the student's records.
    pub fn ledger_for(&self, student: &str) -> Result<CreditLedger, GradeBookError> {
        let terms = self
            .entries
            .get(student)
            .ok_or_else(|| GradeBookError::StudentNotFound(student.to_string()))?;

        let records = terms
            .iter()
            .flat_map(|(term, courses)| {
                courses.iter().map(|(course, entry)| {
                    GradeRecord::new(course.clone(), *term, entry.credits, entry.grade)
                })
            })
            .collect();

        Ok(CreditLedger::new(student, records))
    }

    /// The deduplicated (term, department) pairs needed to catalog-check
    /// every recorded course, for bulk population.
    pub fn fetch_pairs(&self) -> BTreeSet<(Term, String)> {
        self.entries
            .values()
            .flat_map(|terms| {
                terms.iter().flat_map(|(term, courses)| {
                    courses
                        .keys()
                        .map(|course| (*term, course.dept().to_string()))
                })
            })
            .collect()
    }
}

/// Convert a verbose term label to its token form ("Fall 2023" -> FA23).
fn verbose_term(input: &str) -> Option<Term> {
    let letters: String = input
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    let season = match letters.as_str() {
        "winter" => Season::Winter,
        "spring" => Season::Spring,
        "summer" => Season::Summer,
        "fall" => Season::Fall,
        _ => return None,
    };
    let year: u8 = digits.get(digits.len().checked_sub(2)?..)?.parse().ok()?;

    Some(Term::new(season, year))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
