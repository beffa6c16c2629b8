//! Teaching-week calendar.
//!
//! # Invariants
//! - Week 1 is the seven days starting at the semester start date.
//! - Dates before the start map to week 0 or below; they are never clamped.

use chrono::NaiveDate;

/// Maps calendar dates to semester week numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemesterCalendar {
    start: NaiveDate,
}

impl SemesterCalendar {
    pub fn starting(start: NaiveDate) -> Self {
        Self { start }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the teaching week `date` falls in.
    pub fn week_of(&self, date: NaiveDate) -> i32 {
        let days = date.signed_duration_since(self.start).num_days();
        // NaiveDate spans roughly 500k years, so the week count fits in i32.
        (days.div_euclid(7) + 1) as i32
    }
}
