//! Same-day reservation cutoff.
//!
//! Only the current calendar day is subject to the deadline: earlier dates
//! are always locked and later dates are never locked.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Daily cutoff time, parsed from the "HH:MM" settings value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineTime {
    hour: u32,
    minute: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeadlineParseError {
    #[error("expected HH:MM, got {0:?}")]
    InvalidFormat(String),
    #[error("hour out of range: {0}")]
    HourOutOfRange(u32),
    #[error("minute out of range: {0}")]
    MinuteOutOfRange(u32),
}

impl DeadlineTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, DeadlineParseError> {
        if hour > 23 {
            return Err(DeadlineParseError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(DeadlineParseError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// True once the clock reaches the cutoff minute. Hours are compared
    /// first, minutes break the tie.
    pub fn is_past(&self, now: NaiveTime) -> bool {
        now.hour() > self.hour || (now.hour() == self.hour && now.minute() >= self.minute)
    }

    /// Time left before the cutoff, `None` once it has passed
    pub fn remaining(&self, now: NaiveTime) -> Option<Duration> {
        if self.is_past(now) {
            return None;
        }
        let cutoff = NaiveTime::from_hms_opt(self.hour, self.minute, 0)?;
        Some(cutoff - now)
    }

    /// "2h 5m restantes", or "5m restantes" when under an hour
    pub fn format_remaining(&self, now: NaiveTime) -> Option<String> {
        self.remaining(now).map(format_remaining)
    }

    /// Short French label: "11h" or "11h30"
    pub fn label(&self) -> String {
        if self.minute > 0 {
            format!("{}h{:02}", self.hour, self.minute)
        } else {
            format!("{}h", self.hour)
        }
    }

    /// Wire form "HH:MM"
    pub fn to_setting(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl Default for DeadlineTime {
    fn default() -> Self {
        Self { hour: 11, minute: 0 }
    }
}

impl FromStr for DeadlineTime {
    type Err = DeadlineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DeadlineParseError::InvalidFormat(s.to_string());
        // "HH:MM", or "HH:MM:SS" as the server stores it; seconds are ignored
        let mut parts = s.trim().splitn(3, ':');
        let hour = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(invalid)?;
        let minute = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(invalid)?;
        if let Some(seconds) = parts.next() {
            seconds.parse::<u32>().map_err(|_| invalid())?;
        }
        Self::new(hour, minute)
    }
}

impl fmt::Display for DeadlineTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Floor a positive duration to whole hours and minutes
pub fn format_remaining(remaining: Duration) -> String {
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;
    if hours > 0 {
        format!("{}h {}m restantes", hours, minutes)
    } else {
        format!("{}m restantes", minutes)
    }
}

/// Whether a calendar day can still be toggled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAccess {
    /// Strictly before today
    Past,
    /// Today, at or after the cutoff
    DeadlinePassed,
    /// Today before the cutoff (with the time left), or any later day
    Open { remaining: Option<Duration> },
}

impl DayAccess {
    pub fn for_day(date: NaiveDate, now: NaiveDateTime, deadline: &DeadlineTime) -> Self {
        let today = now.date();
        if date < today {
            DayAccess::Past
        } else if date == today {
            match deadline.remaining(now.time()) {
                Some(remaining) => DayAccess::Open { remaining: Some(remaining) },
                None => DayAccess::DeadlinePassed,
            }
        } else {
            DayAccess::Open { remaining: None }
        }
    }

    pub fn is_locked(&self) -> bool {
        !matches!(self, DayAccess::Open { .. })
    }

    /// Reason shown in place of the toggle for a locked day
    pub fn lock_reason(&self, deadline: &DeadlineTime) -> Option<String> {
        match self {
            DayAccess::Past => Some("Date passée".to_string()),
            DayAccess::DeadlinePassed => Some(format!("Délai dépassé ({})", deadline.label())),
            DayAccess::Open { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn at(date: &str, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn day(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_deadline() {
        let deadline: DeadlineTime = "11:30".parse().unwrap();
        assert_eq!(deadline.hour(), 11);
        assert_eq!(deadline.minute(), 30);

        assert_eq!(" 9:05 ".parse::<DeadlineTime>().unwrap(), DeadlineTime::new(9, 5).unwrap());
        assert!(matches!("1130".parse::<DeadlineTime>(), Err(DeadlineParseError::InvalidFormat(_))));
        assert!(matches!("ab:cd".parse::<DeadlineTime>(), Err(DeadlineParseError::InvalidFormat(_))));
        assert_eq!("24:00".parse::<DeadlineTime>(), Err(DeadlineParseError::HourOutOfRange(24)));
        assert_eq!("10:60".parse::<DeadlineTime>(), Err(DeadlineParseError::MinuteOutOfRange(60)));
    }

    #[test]
    fn test_parse_deadline_with_seconds() {
        assert_eq!("11:30:00".parse::<DeadlineTime>(), Ok(DeadlineTime::new(11, 30).unwrap()));
        assert_eq!("08:05:59".parse::<DeadlineTime>(), Ok(DeadlineTime::new(8, 5).unwrap()));
        assert!(matches!("11:30:xx".parse::<DeadlineTime>(), Err(DeadlineParseError::InvalidFormat(_))));
        assert!(matches!("11:30:00:00".parse::<DeadlineTime>(), Err(DeadlineParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_is_past_boundaries() {
        let deadline = DeadlineTime::new(11, 30).unwrap();

        assert!(!deadline.is_past(time(10, 59, 59)));
        assert!(!deadline.is_past(time(11, 29, 59)));
        // exactly on the minute counts as past
        assert!(deadline.is_past(time(11, 30, 0)));
        assert!(deadline.is_past(time(11, 31, 0)));
        // later hour with a smaller minute is still past
        assert!(deadline.is_past(time(12, 0, 0)));
        assert!(!deadline.is_past(time(0, 0, 0)));
    }

    #[test]
    fn test_is_past_for_every_cutoff() {
        for hour in 0..24 {
            for minute in [0, 1, 30, 59] {
                let deadline = DeadlineTime::new(hour, minute).unwrap();
                let cutoff = time(hour, minute, 0);
                assert!(deadline.is_past(cutoff));
                if cutoff != time(0, 0, 0) {
                    let before = cutoff - Duration::seconds(1);
                    assert!(!deadline.is_past(before));
                }
            }
        }
    }

    #[test]
    fn test_format_remaining() {
        let deadline = DeadlineTime::new(11, 0).unwrap();

        assert_eq!(deadline.format_remaining(time(10, 55, 0)).as_deref(), Some("5m restantes"));
        assert_eq!(deadline.format_remaining(time(8, 55, 0)).as_deref(), Some("2h 5m restantes"));
        // partial minutes are floored
        assert_eq!(deadline.format_remaining(time(10, 54, 30)).as_deref(), Some("5m restantes"));
        assert_eq!(deadline.format_remaining(time(10, 59, 59)).as_deref(), Some("0m restantes"));
        assert_eq!(deadline.format_remaining(time(11, 0, 0)), None);
    }

    #[test]
    fn test_label_and_setting() {
        assert_eq!(DeadlineTime::new(11, 0).unwrap().label(), "11h");
        assert_eq!(DeadlineTime::new(11, 30).unwrap().label(), "11h30");
        assert_eq!(DeadlineTime::new(9, 5).unwrap().label(), "9h05");
        assert_eq!(DeadlineTime::new(9, 5).unwrap().to_setting(), "09:05");
        assert_eq!(DeadlineTime::default().to_setting(), "11:00");
    }

    #[test]
    fn test_day_access() {
        let deadline = DeadlineTime::new(11, 0).unwrap();
        let morning = at("2026-10-14", 9, 0);
        let afternoon = at("2026-10-14", 14, 0);

        assert_eq!(DayAccess::for_day(day("2026-10-13"), morning, &deadline), DayAccess::Past);
        assert_eq!(
            DayAccess::for_day(day("2026-10-14"), morning, &deadline),
            DayAccess::Open { remaining: Some(Duration::hours(2)) }
        );
        assert_eq!(DayAccess::for_day(day("2026-10-14"), afternoon, &deadline), DayAccess::DeadlinePassed);
        // future days are never locked, even after today's cutoff
        assert_eq!(
            DayAccess::for_day(day("2026-10-15"), afternoon, &deadline),
            DayAccess::Open { remaining: None }
        );
    }

    #[test]
    fn test_lock_reason() {
        let deadline = DeadlineTime::new(11, 30).unwrap();
        assert_eq!(DayAccess::Past.lock_reason(&deadline).as_deref(), Some("Date passée"));
        assert_eq!(
            DayAccess::DeadlinePassed.lock_reason(&deadline).as_deref(),
            Some("Délai dépassé (11h30)")
        );
        assert!(DayAccess::Open { remaining: None }.lock_reason(&deadline).is_none());
        assert!(DayAccess::Past.is_locked());
        assert!(!DayAccess::Open { remaining: None }.is_locked());
    }
}
