//! Grade record linking one student to one assignment.
//!
//! # Invariants
//! - `student_id` and `assignment_id` must reference stored records when the
//!   grade is added. This is enforced by `GradeValidator`, which needs
//!   repository access, so the record itself stays a plain value.

use super::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: String,
    pub student_id: String,
    pub assignment_id: String,
    /// Stored score, after any late-submission penalty. No range is enforced.
    pub value: f64,
    /// Calendar date the work was handed in, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    /// Free-text note from the grader. Empty when none was given.
    #[serde(default)]
    pub feedback: String,
}

impl Grade {
    pub fn new(
        id: impl Into<String>,
        student_id: impl Into<String>,
        assignment_id: impl Into<String>,
        value: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            student_id: student_id.into(),
            assignment_id: assignment_id.into(),
            value,
            date,
            feedback: String::new(),
        }
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = feedback.into();
        self
    }
}

impl Entity for Grade {
    const KIND: &'static str = "grade";

    fn id(&self) -> &str {
        &self.id
    }
}
