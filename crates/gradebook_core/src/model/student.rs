//! Student record.

use super::Entity;
use serde::{Deserialize, Serialize};

/// Enrolled student.
///
/// Field rules (non-empty id/name/email, non-negative group) are checked by
/// `StudentValidator`, not by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    /// Study group number, e.g. `933`.
    pub group: i32,
    pub email: String,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        group: i32,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group,
            email: email.into(),
        }
    }
}

impl Entity for Student {
    const KIND: &'static str = "student";

    fn id(&self) -> &str {
        &self.id
    }
}
