//! Grade reference validation.

use super::{ValidationError, ValidationResult, Validator};
use crate::model::{Assignment, Grade, Student};
use crate::repo::Repository;

/// Checks that a grade points at a stored student and a stored assignment.
///
/// Both repositories are injected at construction; the validator only calls
/// `find_one` on them.
pub struct GradeValidator<'r, S, A> {
    students: &'r S,
    assignments: &'r A,
}

impl<'r, S, A> GradeValidator<'r, S, A>
where
    S: Repository<Student>,
    A: Repository<Assignment>,
{
    pub fn new(students: &'r S, assignments: &'r A) -> Self {
        Self {
            students,
            assignments,
        }
    }
}

impl<S, A> Validator<Grade> for GradeValidator<'_, S, A>
where
    S: Repository<Student>,
    A: Repository<Assignment>,
{
    fn validate(&self, grade: &Grade) -> ValidationResult {
        let student = self
            .students
            .find_one(&grade.student_id)
            .map_err(|err| ValidationError::Lookup(err.to_string()))?;
        if student.is_none() {
            return Err(ValidationError::UnknownStudent(grade.student_id.clone()));
        }

        let assignment = self
            .assignments
            .find_one(&grade.assignment_id)
            .map_err(|err| ValidationError::Lookup(err.to_string()))?;
        if assignment.is_none() {
            return Err(ValidationError::UnknownAssignment(
                grade.assignment_id.clone(),
            ));
        }

        Ok(())
    }
}
