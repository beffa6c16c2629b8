//! Catalog use-case service for students, assignments and grades.
//!
//! # Responsibility
//! - Validate every record before it reaches a repository.
//! - Enforce grade references against the student/assignment repositories.
//!
//! # Invariants
//! - Validation runs first; a rejected record causes no write.
//! - Adds are insert-only: an existing id is returned, never overwritten.
//! - A grade with a missing reference fails with `ServiceError::Validation`.
//! - With a semester calendar set, grades handed in after the grace week
//!   are rejected and one-week-late grades are stored with the penalty
//!   already subtracted.

use crate::model::{Assignment, Entity, Grade, SemesterCalendar, Student};
use crate::repo::{RepoError, Repository};
use crate::validation::{
    late_penalty, AssignmentValidator, GradeValidator, StudentValidator, ValidationError,
    Validator,
};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Record was rejected before any write.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Service facade over the three entity repositories.
///
/// Repositories are borrowed so that the grade validator can hold the same
/// student and assignment stores the service writes to.
pub struct CatalogService<'r, S, A, G> {
    students: &'r S,
    assignments: &'r A,
    grades: &'r G,
    student_validator: StudentValidator,
    assignment_validator: AssignmentValidator,
    grade_validator: GradeValidator<'r, S, A>,
    calendar: Option<SemesterCalendar>,
}

impl<'r, S, A, G> CatalogService<'r, S, A, G>
where
    S: Repository<Student>,
    A: Repository<Assignment>,
    G: Repository<Grade>,
{
    pub fn new(students: &'r S, assignments: &'r A, grades: &'r G) -> Self {
        Self {
            students,
            assignments,
            grades,
            student_validator: StudentValidator,
            assignment_validator: AssignmentValidator,
            grade_validator: GradeValidator::new(students, assignments),
            calendar: None,
        }
    }

    /// Enables the late-submission rule, measuring weeks with `calendar`.
    pub fn with_calendar(mut self, calendar: SemesterCalendar) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Validates and stores a student.
    ///
    /// Returns `Ok(None)` when stored, `Ok(Some(existing))` when the id is
    /// already taken.
    pub fn add_student(&self, student: &Student) -> ServiceResult<Option<Student>> {
        insert(self.students, &self.student_validator, student)
    }

    /// Validates and stores an assignment. Same return contract as
    /// `add_student`.
    pub fn add_assignment(&self, assignment: &Assignment) -> ServiceResult<Option<Assignment>> {
        insert(self.assignments, &self.assignment_validator, assignment)
    }

    /// Stores a grade after checking that its student and assignment exist
    /// and, with a calendar set, that it was handed in on time. Same return
    /// contract as `add_student`.
    pub fn add_grade(&self, grade: &Grade) -> ServiceResult<Option<Grade>> {
        let (_, existing) = self.insert_grade(grade)?;
        Ok(existing)
    }

    /// Grades handed-in work with grader `feedback` and returns the value
    /// that is stored.
    ///
    /// When the grade id is already taken nothing is written and the stored
    /// value is returned.
    pub fn grade_submission(&self, grade: &Grade, feedback: &str) -> ServiceResult<f64> {
        let grade = grade.clone().with_feedback(feedback);
        let (graded, existing) = self.insert_grade(&grade)?;
        Ok(existing.map_or(graded.value, |stored| stored.value))
    }

    pub fn find_student(&self, id: &str) -> ServiceResult<Option<Student>> {
        Ok(self.students.find_one(id)?)
    }

    pub fn find_assignment(&self, id: &str) -> ServiceResult<Option<Assignment>> {
        Ok(self.assignments.find_one(id)?)
    }

    pub fn find_grade(&self, id: &str) -> ServiceResult<Option<Grade>> {
        Ok(self.grades.find_one(id)?)
    }

    pub fn all_students(&self) -> ServiceResult<Vec<Student>> {
        Ok(self.students.find_all()?)
    }

    pub fn all_assignments(&self) -> ServiceResult<Vec<Assignment>> {
        Ok(self.assignments.find_all()?)
    }

    pub fn all_grades(&self) -> ServiceResult<Vec<Grade>> {
        Ok(self.grades.find_all()?)
    }

    /// Lists grades given to one student, in storage order.
    pub fn grades_for_student(&self, student_id: &str) -> ServiceResult<Vec<Grade>> {
        let mut grades = self.grades.find_all()?;
        grades.retain(|grade| grade.student_id == student_id);
        Ok(grades)
    }

    /// Validates and replaces a stored student.
    ///
    /// Returns the previous record, or `Ok(None)` when the id is unknown.
    pub fn update_student(&self, student: &Student) -> ServiceResult<Option<Student>> {
        replace(self.students, &self.student_validator, student)
    }

    /// Validates and replaces a stored assignment. Same return contract as
    /// `update_student`.
    pub fn update_assignment(&self, assignment: &Assignment) -> ServiceResult<Option<Assignment>> {
        replace(self.assignments, &self.assignment_validator, assignment)
    }

    /// Removes a student. Grades that reference it are kept as history.
    pub fn delete_student(&self, id: &str) -> ServiceResult<Option<Student>> {
        remove(self.students, id)
    }

    /// Removes an assignment. Grades that reference it are kept as history.
    pub fn delete_assignment(&self, id: &str) -> ServiceResult<Option<Assignment>> {
        remove(self.assignments, id)
    }

    pub fn delete_grade(&self, id: &str) -> ServiceResult<Option<Grade>> {
        remove(self.grades, id)
    }

    fn insert_grade(&self, grade: &Grade) -> ServiceResult<(Grade, Option<Grade>)> {
        check(&self.grade_validator, grade, "insert")?;

        let mut graded = grade.clone();
        graded.value -= self.submission_penalty(grade)?;
        let existing = persist(self.grades, &graded)?;
        Ok((graded, existing))
    }

    fn submission_penalty(&self, grade: &Grade) -> ServiceResult<f64> {
        let Some(calendar) = self.calendar else {
            return Ok(0.0);
        };
        let assignment = self
            .assignments
            .find_one(&grade.assignment_id)?
            .ok_or_else(|| ValidationError::UnknownAssignment(grade.assignment_id.clone()))?;

        let week = calendar.week_of(grade.date);
        late_penalty(week, assignment.deadline_week).map_err(|err| {
            warn!(
                "event=record_insert module=service status=rejected kind={} error={}",
                Grade::KIND,
                err
            );
            ServiceError::from(err)
        })
    }
}

fn insert<E, R, V>(repo: &R, validator: &V, entity: &E) -> ServiceResult<Option<E>>
where
    E: Entity,
    R: Repository<E>,
    V: Validator<E>,
{
    check(validator, entity, "insert")?;
    persist(repo, entity)
}

fn persist<E, R>(repo: &R, entity: &E) -> ServiceResult<Option<E>>
where
    E: Entity,
    R: Repository<E>,
{
    let existing = repo.save(entity)?;
    match existing {
        Some(_) => info!(
            "event=record_insert module=service status=skipped kind={} reason=duplicate_id",
            E::KIND
        ),
        None => info!(
            "event=record_insert module=service status=ok kind={}",
            E::KIND
        ),
    }
    Ok(existing)
}

fn replace<E, R, V>(repo: &R, validator: &V, entity: &E) -> ServiceResult<Option<E>>
where
    E: Entity,
    R: Repository<E>,
    V: Validator<E>,
{
    check(validator, entity, "update")?;

    let previous = repo.update(entity)?;
    if previous.is_none() {
        warn!(
            "event=record_update module=service status=skipped kind={} reason=not_found",
            E::KIND
        );
    }
    Ok(previous)
}

fn remove<E, R>(repo: &R, id: &str) -> ServiceResult<Option<E>>
where
    E: Entity,
    R: Repository<E>,
{
    let removed = repo.delete(id)?;
    info!(
        "event=record_delete module=service status={} kind={}",
        if removed.is_some() { "ok" } else { "skipped" },
        E::KIND
    );
    Ok(removed)
}

fn check<E, V>(validator: &V, entity: &E, action: &str) -> ServiceResult<()>
where
    E: Entity,
    V: Validator<E>,
{
    validator.validate(entity).map_err(|err| {
        warn!(
            "event=record_{} module=service status=rejected kind={} error={}",
            action,
            E::KIND,
            err
        );
        ServiceError::from(err)
    })
}
