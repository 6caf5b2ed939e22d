//! Cron expression validation and next-fire evaluation.
//!
//! Expressions use the six or seven field format with seconds first
//! (`sec min hour day-of-month month day-of-week [year]`). The `?` placeholder
//! accepted in the day fields is treated as `*`.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use cron::Schedule;

/// Compiles an expression into a schedule.
pub fn parse(expression: &str) -> Result<Schedule, cron::error::Error> {
    Schedule::from_str(&normalize(expression))
}

/// Returns true when the expression compiles into a schedule.
#[must_use]
pub fn is_valid(expression: &str) -> bool {
    parse(expression).is_ok()
}

/// Next time the expression fires after now, if it ever fires again.
#[must_use]
pub fn next_execution(expression: &str) -> Option<DateTime<Utc>> {
    next_execution_after(expression, &Utc::now())
}

/// Next time the expression fires strictly after `after`.
#[must_use]
pub fn next_execution_after(expression: &str, after: &DateTime<Utc>) -> Option<DateTime<Utc>> {
    parse(expression).ok()?.after(after).next()
}

fn normalize(expression: &str) -> String {
    expression.trim().replace('?', "*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone as _};

    #[test]
    fn test_valid_expressions() {
        assert!(is_valid("0/5 * * * * ?"));
        assert!(is_valid("0 0 2 * * ?"));
        assert!(is_valid("0 30 9 ? * MON-FRI"));
        assert!(is_valid("0 0 0 1 1 ? 2099"));
    }

    #[test]
    fn test_invalid_expressions() {
        assert!(!is_valid(""));
        assert!(!is_valid("not a cron"));
        assert!(!is_valid("61 * * * * ?"));
        assert!(!is_valid("0 0 25 * * ?"));
    }

    #[test]
    fn test_next_execution_is_strictly_in_the_future() {
        let now = Utc::now();
        let next = next_execution("0/5 * * * * ?").expect("expression fires every 5 seconds");

        assert!(next > now);
        assert!(next - now <= Duration::seconds(6));
    }

    #[test]
    fn test_next_execution_after_reference_time() {
        let reference = Utc.with_ymd_and_hms(2030, 6, 15, 1, 59, 59).unwrap();
        let next = next_execution_after("0 0 2 * * ?", &reference).unwrap();

        assert_eq!(next, Utc.with_ymd_and_hms(2030, 6, 15, 2, 0, 0).unwrap());
    }

    #[test]
    fn test_next_execution_skips_reference_instant() {
        let reference = Utc.with_ymd_and_hms(2030, 6, 15, 2, 0, 0).unwrap();
        let next = next_execution_after("0 0 2 * * ?", &reference).unwrap();

        assert_eq!(next, Utc.with_ymd_and_hms(2030, 6, 16, 2, 0, 0).unwrap());
    }

    #[test]
    fn test_exhausted_expression_has_no_next_execution() {
        assert!(is_valid("0 0 0 1 1 ? 2020"));
        assert_eq!(next_execution("0 0 0 1 1 ? 2020"), None);
    }

    #[test]
    fn test_invalid_expression_has_no_next_execution() {
        assert_eq!(next_execution("every day"), None);
    }
}
