//! `gradcheck-core` — Shared vocabulary for the reconciliation engine.
//!
//! Pure types crate: academic terms, course names, grades, and the
//! per-claim validity tracker. No IO or network dependencies.

pub mod course;
pub mod error;
pub mod grade;
pub mod term;
pub mod validity;

pub use course::CourseName;
pub use error::ParseError;
pub use grade::Grade;
pub use term::{Season, Term};
pub use validity::{Field, Validity, ValidityMap};
