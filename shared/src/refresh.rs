//! Bookkeeping for fetch/redraw cycles of the weekly views.
//!
//! Every request is tagged with a ticket. Navigation starts a new generation,
//! so responses that resolve after the view moved on are dropped instead of
//! overwriting the visible week. Poll responses only trigger a redraw when
//! the payload changed since the last one applied.

use crate::week::Week;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    /// Initial load, week change or explicit reload: always redraws
    Navigation,
    /// Timer-driven refresh: redraws only on change
    Poll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    sequence: u64,
    week: Week,
    origin: FetchOrigin,
}

impl FetchTicket {
    pub fn week(&self) -> Week {
        self.week
    }

    pub fn origin(&self) -> FetchOrigin {
        self.origin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Apply the payload to the view
    Redraw,
    /// Same data as already displayed
    Unchanged,
    /// Response for a superseded request
    Stale,
}

#[derive(Debug, Clone)]
pub struct RefreshTracker<T> {
    generation: u64,
    next_sequence: u64,
    applied_sequence: Option<u64>,
    week: Option<Week>,
    last: Option<T>,
}

impl<T> Default for RefreshTracker<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            next_sequence: 0,
            applied_sequence: None,
            week: None,
            last: None,
        }
    }
}

impl<T: Clone + PartialEq> RefreshTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn week(&self) -> Option<Week> {
        self.week
    }

    /// Last payload applied to the view
    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }

    /// Start showing `week`; in-flight requests for the previous view become stale
    pub fn navigate(&mut self, week: Week) -> FetchTicket {
        self.generation += 1;
        self.applied_sequence = None;
        self.week = Some(week);
        self.last = None;
        self.issue(week, FetchOrigin::Navigation)
    }

    /// Forced redraw of the current week, e.g. after a mutation
    pub fn reload(&mut self) -> Option<FetchTicket> {
        let week = self.week?;
        self.generation += 1;
        self.applied_sequence = None;
        Some(self.issue(week, FetchOrigin::Navigation))
    }

    /// Ticket for a timer-driven refresh of the current week
    pub fn poll(&mut self) -> Option<FetchTicket> {
        let week = self.week?;
        Some(self.issue(week, FetchOrigin::Poll))
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
            && Some(ticket.week) == self.week
            && self.applied_sequence.map_or(true, |applied| ticket.sequence > applied)
    }

    /// Decide what a successful response does to the view
    pub fn accept(&mut self, ticket: FetchTicket, payload: &T) -> RefreshOutcome {
        if !self.is_current(&ticket) {
            return RefreshOutcome::Stale;
        }
        self.applied_sequence = Some(ticket.sequence);

        if ticket.origin == FetchOrigin::Poll && self.last.as_ref() == Some(payload) {
            return RefreshOutcome::Unchanged;
        }
        self.last = Some(payload.clone());
        RefreshOutcome::Redraw
    }

    /// Whether a failed response should blank the view. Only a current
    /// navigation falls back to an empty calendar; failed polls keep what is shown.
    pub fn fail(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(&ticket) || ticket.origin == FetchOrigin::Poll {
            return false;
        }
        self.applied_sequence = Some(ticket.sequence);
        self.last = None;
        true
    }

    fn issue(&mut self, week: Week, origin: FetchOrigin) -> FetchTicket {
        self.next_sequence += 1;
        FetchTicket {
            generation: self.generation,
            sequence: self.next_sequence,
            week,
            origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    type Payload = BTreeMap<String, Vec<String>>;

    fn week() -> Week {
        Week::containing(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap())
    }

    fn payload(names: &[&str]) -> Payload {
        let mut map = BTreeMap::new();
        map.insert(
            "2026-10-14".to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        );
        map
    }

    #[test]
    fn test_navigation_always_redraws() {
        let mut tracker = RefreshTracker::new();
        let first = tracker.navigate(week());
        assert_eq!(tracker.accept(first, &payload(&["Alice"])), RefreshOutcome::Redraw);

        // same data again after an explicit reload still redraws
        let reload = tracker.reload().unwrap();
        assert_eq!(tracker.accept(reload, &payload(&["Alice"])), RefreshOutcome::Redraw);
    }

    #[test]
    fn test_identical_poll_does_not_redraw() {
        let mut tracker = RefreshTracker::new();
        let first = tracker.navigate(week());
        tracker.accept(first, &payload(&["Alice"]));

        let poll = tracker.poll().unwrap();
        assert_eq!(tracker.accept(poll, &payload(&["Alice"])), RefreshOutcome::Unchanged);

        let poll = tracker.poll().unwrap();
        assert_eq!(tracker.accept(poll, &payload(&["Alice", "Bruno"])), RefreshOutcome::Redraw);
        assert_eq!(tracker.last(), Some(&payload(&["Alice", "Bruno"])));
    }

    #[test]
    fn test_stale_response_after_navigation_is_dropped() {
        let mut tracker = RefreshTracker::new();
        let old = tracker.navigate(week());
        let new = tracker.navigate(week().next());

        assert_eq!(tracker.accept(new, &payload(&["Bruno"])), RefreshOutcome::Redraw);
        assert_eq!(tracker.accept(old, &payload(&["Alice"])), RefreshOutcome::Stale);
        assert_eq!(tracker.last(), Some(&payload(&["Bruno"])));
    }

    #[test]
    fn test_out_of_order_polls_keep_latest() {
        let mut tracker = RefreshTracker::new();
        let first = tracker.navigate(week());
        tracker.accept(first, &payload(&["Alice"]));

        let earlier = tracker.poll().unwrap();
        let later = tracker.poll().unwrap();
        assert_eq!(tracker.accept(later, &payload(&["Alice", "Bruno"])), RefreshOutcome::Redraw);
        assert_eq!(tracker.accept(earlier, &payload(&["Alice"])), RefreshOutcome::Stale);
    }

    #[test]
    fn test_poll_before_navigation_has_no_ticket() {
        let mut tracker: RefreshTracker<Payload> = RefreshTracker::new();
        assert!(tracker.poll().is_none());
        assert!(tracker.reload().is_none());
    }

    #[test]
    fn test_failures() {
        let mut tracker: RefreshTracker<Payload> = RefreshTracker::new();
        let nav = tracker.navigate(week());
        let poll = tracker.poll().unwrap();

        assert!(!tracker.fail(poll));
        assert!(tracker.fail(nav));

        let stale = tracker.navigate(week().prev());
        tracker.navigate(week());
        assert!(!tracker.fail(stale));
    }
}
