//! `gradcheck-engine` — Requirement reconciliation engine.
//!
//! Validates one student's claimed course-to-requirement satisfactions
//! against the course catalog and (optionally) a trusted grade record.
//! Receives pre-extracted rosters, mutates each claim's validity in place,
//! and returns per-check error/warning counts plus human-readable log
//! lines. No document parsing or rendering here.

pub mod checks;
pub mod claim;
pub mod gradebook;
pub mod ledger;
pub mod log;
pub mod orchestrator;
pub mod predicate;
pub mod roster;
pub mod rules;

pub use claim::{CheckoffClaim, CheckoffTag, Position, ReqTag, RequirementClaim};
pub use gradebook::{GradeBook, GradeBookError};
pub use ledger::{CreditLedger, GradeRecord, LedgerError};
pub use log::{CheckLog, LogLevel};
pub use orchestrator::{CheckContext, CheckOutcome, CheckRegistry, RunResults, Summary};
pub use predicate::Predicate;
pub use roster::Roster;
pub use rules::{basic_check, validate_checkoff, BasicOutcome, Expected, FirstClaim};
