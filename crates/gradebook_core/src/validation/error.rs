use crate::model::{WEEK_MAX, WEEK_MIN};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for a student, assignment or grade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyStudentId,
    EmptyStudentName,
    EmptyStudentEmail,
    NegativeGroup(i32),
    EmptyAssignmentId,
    EmptyDescription,
    DeadlineOutOfRange(i32),
    ReceivedOutOfRange(i32),
    /// Grade references a student id that is not stored.
    UnknownStudent(String),
    /// Grade references an assignment id that is not stored.
    UnknownAssignment(String),
    /// Work was handed in after the grace period following the deadline.
    LateSubmission { week: i32, deadline: i32 },
    /// A reference could not be checked because the lookup itself failed.
    Lookup(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStudentId => write!(f, "invalid student id: must not be empty"),
            Self::EmptyStudentName => write!(f, "invalid student name: must not be empty"),
            Self::EmptyStudentEmail => write!(f, "invalid student email: must not be empty"),
            Self::NegativeGroup(group) => {
                write!(f, "invalid group `{group}`: must be zero or greater")
            }
            Self::EmptyAssignmentId => write!(f, "invalid assignment id: must not be empty"),
            Self::EmptyDescription => {
                write!(f, "invalid assignment description: must not be empty")
            }
            Self::DeadlineOutOfRange(week) => {
                write!(f, "deadline week `{week}` must be between {WEEK_MIN} and {WEEK_MAX}")
            }
            Self::ReceivedOutOfRange(week) => {
                write!(f, "received week `{week}` must be between {WEEK_MIN} and {WEEK_MAX}")
            }
            Self::UnknownStudent(id) => write!(f, "student not found: `{id}`"),
            Self::UnknownAssignment(id) => write!(f, "assignment not found: `{id}`"),
            Self::LateSubmission { week, deadline } => write!(
                f,
                "handed in during week {week}, too late for deadline week {deadline}"
            ),
            Self::Lookup(message) => write!(f, "reference lookup failed: {message}"),
        }
    }
}

impl Error for ValidationError {}
