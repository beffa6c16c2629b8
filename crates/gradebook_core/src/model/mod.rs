//! Gradebook domain model.
//!
//! # Responsibility
//! - Define the plain records persisted by repositories: students,
//!   assignments and grades.
//! - Expose the shared `Entity` identity contract used by storage.
//!
//! # Invariants
//! - Every record is identified by a caller-provided string id.
//! - Records carry no behavior beyond construction; field rules live in
//!   `crate::validation`.

pub mod assignment;
pub mod grade;
pub mod semester;
pub mod student;

pub use assignment::{Assignment, WEEK_MAX, WEEK_MIN};
pub use grade::Grade;
pub use semester::SemesterCalendar;
pub use student::Student;

/// Identity contract shared by every persisted record.
pub trait Entity: Clone {
    /// Lowercase entity name used in logs and error messages.
    const KIND: &'static str;

    /// Stable id, unique within one repository.
    fn id(&self) -> &str;
}
