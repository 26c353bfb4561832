use crate::deadline::{DayAccess, DeadlineTime};
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Why a toggle was refused before reaching the server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleRejection {
    #[error("Impossible de modifier une réservation pour une date passée.")]
    PastDate,
    #[error("Les réservations pour aujourd'hui sont fermées après {0}.")]
    DeadlinePassed(String),
}

/// Client-side guard run before any toggle request.
///
/// Cancelling today's reservation after the cutoff is left to the server,
/// only new reservations are refused here.
pub fn check_toggle(
    date: NaiveDate,
    reserve: bool,
    now: NaiveDateTime,
    deadline: &DeadlineTime,
) -> Result<(), ToggleRejection> {
    match DayAccess::for_day(date, now, deadline) {
        DayAccess::Past => Err(ToggleRejection::PastDate),
        DayAccess::DeadlinePassed if reserve => Err(ToggleRejection::DeadlinePassed(deadline.label())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn now(h: u32, m: u32) -> NaiveDateTime {
        day("2026-10-14").and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_past_date_never_toggles() {
        let deadline = DeadlineTime::default();
        assert_eq!(check_toggle(day("2026-10-13"), true, now(8, 0), &deadline), Err(ToggleRejection::PastDate));
        assert_eq!(check_toggle(day("2026-10-13"), false, now(8, 0), &deadline), Err(ToggleRejection::PastDate));
    }

    #[test]
    fn test_today_after_deadline_rejects_reservation() {
        let deadline = DeadlineTime::new(11, 0).unwrap();
        let rejection = check_toggle(day("2026-10-14"), true, now(11, 0), &deadline).unwrap_err();

        assert_eq!(rejection, ToggleRejection::DeadlinePassed("11h".to_string()));
        assert_eq!(
            rejection.to_string(),
            "Les réservations pour aujourd'hui sont fermées après 11h."
        );
    }

    #[test]
    fn test_today_before_deadline_and_future_allowed() {
        let deadline = DeadlineTime::new(11, 0).unwrap();
        assert!(check_toggle(day("2026-10-14"), true, now(10, 59), &deadline).is_ok());
        assert!(check_toggle(day("2026-10-15"), true, now(23, 0), &deadline).is_ok());
        // cancelling after the cutoff goes through to the server
        assert!(check_toggle(day("2026-10-14"), false, now(12, 0), &deadline).is_ok());
    }
}
