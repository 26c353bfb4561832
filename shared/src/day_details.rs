//! Per-day statistics and filtering for the manager's day detail view.
//!
//! Filters always run over the original slice; nothing here mutates it.

use crate::{Extras, WeekReservation, VOLUNTEER_LABEL};

pub const TOTAL_LABEL: &str = "Total";

/// Label a reservation is counted and filtered under
pub fn display_status(reservation: &WeekReservation) -> &str {
    if reservation.benevole {
        VOLUNTEER_LABEL
    } else {
        &reservation.status
    }
}

/// Distinct display statuses, in first-seen order
pub fn unique_statuses(reservations: &[WeekReservation]) -> Vec<String> {
    let mut statuses: Vec<String> = Vec::new();
    for reservation in reservations {
        let status = display_status(reservation);
        if !statuses.iter().any(|s| s == status) {
            statuses.push(status.to_string());
        }
    }
    statuses
}

/// Counts per display status, then the extras categories, then the total
/// headcount (registered people plus extras).
pub fn status_stats(reservations: &[WeekReservation], extras: &Extras) -> Vec<(String, u32)> {
    let mut stats: Vec<(String, u32)> = Vec::new();
    for reservation in reservations {
        let status = display_status(reservation);
        match stats.iter_mut().find(|(label, _)| label == status) {
            Some((_, count)) => *count += 1,
            None => stats.push((status.to_string(), 1)),
        }
    }

    stats.push((Extras::EDS_LABEL.to_string(), extras.eds));
    stats.push((Extras::AUTRE_LABEL.to_string(), extras.autre));

    let registered = u32::try_from(reservations.len()).unwrap_or(u32::MAX);
    let total = registered.saturating_add(extras.total());
    stats.push((TOTAL_LABEL.to_string(), total));
    stats
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub const ALL_VALUE: &'static str = "all";

    /// From a `<select>` value
    pub fn from_value(value: &str) -> Self {
        if value == Self::ALL_VALUE {
            StatusFilter::All
        } else {
            StatusFilter::Only(value.to_string())
        }
    }

    pub fn value(&self) -> &str {
        match self {
            StatusFilter::All => Self::ALL_VALUE,
            StatusFilter::Only(status) => status,
        }
    }

    pub fn matches(&self, reservation: &WeekReservation) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => display_status(reservation) == status,
        }
    }
}

/// Name search plus status filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl DayFilter {
    pub fn matches(&self, reservation: &WeekReservation) -> bool {
        let needle = self.search.to_lowercase();
        let name_ok = needle.is_empty() || reservation.user_name.to_lowercase().contains(&needle);
        name_ok && self.status.matches(reservation)
    }

    pub fn apply<'a>(&self, reservations: &'a [WeekReservation]) -> Vec<&'a WeekReservation> {
        reservations.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(id: i64, name: &str, status: &str, benevole: bool) -> WeekReservation {
        WeekReservation {
            id,
            user_id: Some(id),
            user_user_id: None,
            user_name: name.to_string(),
            status: status.to_string(),
            benevole,
        }
    }

    fn sample() -> Vec<WeekReservation> {
        vec![
            reservation(1, "Alice Martin", "Moniteur", false),
            reservation(2, "Bruno Petit", "Bar", true),
            reservation(3, "Chloé Durand", "Moniteur", true),
            reservation(4, "Damien Roux", "Aide Moniteur", false),
            reservation(5, "Élise Martin", "Moniteur", false),
        ]
    }

    #[test]
    fn test_volunteer_normalizes_status() {
        let data = sample();
        assert_eq!(display_status(&data[0]), "Moniteur");
        assert_eq!(display_status(&data[1]), "Bénévole");
        assert_eq!(display_status(&data[2]), "Bénévole");
    }

    #[test]
    fn test_status_stats_with_extras() {
        let stats = status_stats(&sample(), &Extras { eds: 4, autre: 1 });
        assert_eq!(
            stats,
            vec![
                ("Moniteur".to_string(), 2),
                ("Bénévole".to_string(), 2),
                ("Aide Moniteur".to_string(), 1),
                ("EDS".to_string(), 4),
                ("Autre".to_string(), 1),
                ("Total".to_string(), 10),
            ]
        );
    }

    #[test]
    fn test_status_stats_empty_day() {
        let stats = status_stats(&[], &Extras::default());
        assert_eq!(stats.last(), Some(&("Total".to_string(), 0)));
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn test_unique_statuses_first_seen_order() {
        assert_eq!(unique_statuses(&sample()), vec!["Moniteur", "Bénévole", "Aide Moniteur"]);
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let data = sample();
        let filter = DayFilter::default();
        assert_eq!(filter.apply(&data).len(), data.len());
    }

    #[test]
    fn test_filter_specific_status_uses_display_status() {
        let data = sample();
        let filter = DayFilter {
            search: String::new(),
            status: StatusFilter::from_value("Bénévole"),
        };
        let ids: Vec<i64> = filter.apply(&data).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 3]);

        let moniteurs = DayFilter {
            search: String::new(),
            status: StatusFilter::Only("Moniteur".to_string()),
        };
        let ids: Vec<i64> = moniteurs.apply(&data).iter().map(|r| r.id).collect();
        // Chloé is a Moniteur serving as volunteer, so she is not listed here
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let data = sample();
        let filter = DayFilter {
            search: "MARTIN".to_string(),
            status: StatusFilter::All,
        };
        let ids: Vec<i64> = filter.apply(&data).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 5]);

        let combined = DayFilter {
            search: "martin".to_string(),
            status: StatusFilter::Only("Moniteur".to_string()),
        };
        assert_eq!(combined.apply(&data).len(), 2);
    }

    #[test]
    fn test_total_saturates_with_huge_extras() {
        let extras = Extras { eds: u32::MAX, autre: 5 };
        let stats = status_stats(&sample(), &extras);
        assert_eq!(stats.last(), Some(&(TOTAL_LABEL.to_string(), u32::MAX)));
    }

    #[test]
    fn test_search_matches_raw_text_with_spaces() {
        let data = sample();
        // "Alice Martin" contains "e m", "Élise Martin" too; surrounding spaces are significant
        let inner = DayFilter {
            search: "e m".to_string(),
            status: StatusFilter::All,
        };
        let ids: Vec<i64> = inner.apply(&data).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 5]);

        let padded = DayFilter {
            search: " martin".to_string(),
            status: StatusFilter::All,
        };
        let ids: Vec<i64> = padded.apply(&data).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 5]);

        let trailing = DayFilter {
            search: "martin ".to_string(),
            status: StatusFilter::All,
        };
        assert!(trailing.apply(&data).is_empty());
    }

    #[test]
    fn test_filters_do_not_mutate_source() {
        let data = sample();
        let narrow = DayFilter {
            search: "zzz".to_string(),
            status: StatusFilter::All,
        };
        assert!(narrow.apply(&data).is_empty());
        // widening again starts from the original list
        assert_eq!(DayFilter::default().apply(&data).len(), 5);
        assert_eq!(data, sample());
    }

    #[test]
    fn test_status_filter_value_round_trip() {
        assert_eq!(StatusFilter::from_value("all"), StatusFilter::All);
        assert_eq!(StatusFilter::All.value(), "all");
        assert_eq!(StatusFilter::from_value("Bar").value(), "Bar");
    }
}
