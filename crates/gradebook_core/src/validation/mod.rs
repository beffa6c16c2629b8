//! Field and reference validation for gradebook records.
//!
//! # Responsibility
//! - Check one record at a time and report the first broken rule.
//! - Resolve grade references through explicitly injected repositories.
//!
//! # Invariants
//! - Validators never write to storage.
//! - Every failure is a `ValidationError` with a human-readable message.

mod error;
mod grade;
mod submission;

pub use error::ValidationError;
pub use grade::GradeValidator;
pub use submission::{late_penalty, GRACE_WEEKS, LATE_PENALTY};

use crate::model::{Assignment, Student, WEEK_MAX, WEEK_MIN};

pub type ValidationResult = Result<(), ValidationError>;

/// Checks one record of type `E`.
pub trait Validator<E> {
    fn validate(&self, entity: &E) -> ValidationResult;
}

/// Field rules for `Student`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentValidator;

impl Validator<Student> for StudentValidator {
    fn validate(&self, student: &Student) -> ValidationResult {
        if student.id.is_empty() {
            return Err(ValidationError::EmptyStudentId);
        }
        if student.name.is_empty() {
            return Err(ValidationError::EmptyStudentName);
        }
        if student.email.is_empty() {
            return Err(ValidationError::EmptyStudentEmail);
        }
        if student.group < 0 {
            return Err(ValidationError::NegativeGroup(student.group));
        }
        Ok(())
    }
}

/// Field rules for `Assignment`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssignmentValidator;

impl Validator<Assignment> for AssignmentValidator {
    fn validate(&self, assignment: &Assignment) -> ValidationResult {
        if assignment.id.is_empty() {
            return Err(ValidationError::EmptyAssignmentId);
        }
        if assignment.description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if !is_semester_week(assignment.deadline_week) {
            return Err(ValidationError::DeadlineOutOfRange(assignment.deadline_week));
        }
        if !is_semester_week(assignment.received_week) {
            return Err(ValidationError::ReceivedOutOfRange(assignment.received_week));
        }
        Ok(())
    }
}

fn is_semester_week(week: i32) -> bool {
    (WEEK_MIN..=WEEK_MAX).contains(&week)
}
