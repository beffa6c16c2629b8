//! Late-submission rule for grades.
//!
//! Work handed in up to the deadline week keeps its value. One week late
//! costs `LATE_PENALTY` points. Anything later is rejected.

use super::ValidationError;

/// Points subtracted for work handed in one week after the deadline.
pub const LATE_PENALTY: f64 = 2.5;
/// Number of weeks after the deadline during which work is still accepted.
pub const GRACE_WEEKS: i32 = 1;

/// Returns the penalty for work handed in during `handed_in_week`.
///
/// # Errors
/// - `ValidationError::LateSubmission` when the grace period has passed.
pub fn late_penalty(handed_in_week: i32, deadline_week: i32) -> Result<f64, ValidationError> {
    let overdue = handed_in_week.saturating_sub(deadline_week);
    if overdue <= 0 {
        return Ok(0.0);
    }
    if overdue > GRACE_WEEKS {
        return Err(ValidationError::LateSubmission {
            week: handed_in_week,
            deadline: deadline_week,
        });
    }
    Ok(LATE_PENALTY * f64::from(overdue))
}

#[cfg(test)]
mod tests {
    use super::{late_penalty, LATE_PENALTY};
    use crate::validation::ValidationError;

    #[test]
    fn on_time_and_early_work_keeps_full_value() {
        assert_eq!(late_penalty(3, 3), Ok(0.0));
        assert_eq!(late_penalty(-4, 3), Ok(0.0));
    }

    #[test]
    fn one_week_late_is_penalized() {
        assert_eq!(late_penalty(4, 3), Ok(LATE_PENALTY));
    }

    #[test]
    fn past_grace_period_is_rejected() {
        assert_eq!(
            late_penalty(5, 3),
            Err(ValidationError::LateSubmission {
                week: 5,
                deadline: 3
            })
        );
    }
}
