//! Assignment (homework) record.
//!
//! # Invariants
//! - Week numbers address a 14-week semester: `WEEK_MIN..=WEEK_MAX`.

use super::Entity;
use serde::{Deserialize, Serialize};

/// First teaching week of the semester.
pub const WEEK_MIN: i32 = 1;
/// Last teaching week of the semester.
pub const WEEK_MAX: i32 = 14;

/// Homework item handed out in `received_week` and due in `deadline_week`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub description: String,
    pub deadline_week: i32,
    pub received_week: i32,
}

impl Assignment {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        deadline_week: i32,
        received_week: i32,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            deadline_week,
            received_week,
        }
    }
}

impl Entity for Assignment {
    const KIND: &'static str = "assignment";

    fn id(&self) -> &str {
        &self.id
    }
}
