use chrono::{Datelike, Duration, NaiveDate};

/// Wire format for dates, e.g. "2026-10-12"
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// French display format, e.g. "12/10/2026"
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

const DAY_NAMES: [&str; 7] = ["Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche"];

/// A Monday-anchored 7-day window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    monday: NaiveDate,
}

impl Week {
    /// The week that contains `date` (Sunday belongs to the week that started six days earlier)
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_monday() as i64;
        Self {
            monday: date - Duration::days(offset),
        }
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    /// Sunday closing the window
    pub fn end(&self) -> NaiveDate {
        self.monday + Duration::days(6)
    }

    pub fn next(&self) -> Self {
        Self {
            monday: self.monday + Duration::days(7),
        }
    }

    pub fn prev(&self) -> Self {
        Self {
            monday: self.monday - Duration::days(7),
        }
    }

    /// The seven consecutive days starting at the anchor
    pub fn days(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| self.monday + Duration::days(i as i64))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.monday && date <= self.end()
    }

    /// `start_date` query parameter
    pub fn start_param(&self) -> String {
        format_api_date(self.monday)
    }
}

pub fn format_api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

pub fn parse_api_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, API_DATE_FORMAT).ok()
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// "2026-10-12" -> "12/10/2026"; anything unparsable is returned as is
pub fn format_display_key(key: &str) -> String {
    parse_api_date(key)
        .map(format_display_date)
        .unwrap_or_else(|| key.to_string())
}

/// French weekday name for `date`
pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_monday() as usize]
}

/// Column header, e.g. "Lundi 12"
pub fn day_header(date: NaiveDate) -> String {
    format!("{} {}", day_name(date), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> NaiveDate {
        parse_api_date(value).unwrap()
    }

    #[test]
    fn test_anchor_is_monday_for_every_weekday() {
        // 2026-10-12 is a Monday
        for offset in 0..7 {
            let date = day("2026-10-12") + Duration::days(offset);
            let week = Week::containing(date);
            assert_eq!(week.monday(), day("2026-10-12"), "loaded on {}", date);
            assert_eq!(week.monday().weekday(), chrono::Weekday::Mon);
        }
    }

    #[test]
    fn test_sunday_maps_to_previous_monday() {
        let week = Week::containing(day("2026-10-18"));
        assert_eq!(week.monday(), day("2026-10-12"));
        assert_eq!(week.end(), day("2026-10-18"));
    }

    #[test]
    fn test_navigation_round_trip() {
        let week = Week::containing(day("2026-10-16"));
        assert_eq!(week.next().prev(), week);
        assert_eq!(week.prev().next(), week);
        assert_eq!(week.next().monday(), day("2026-10-19"));
        assert_eq!(week.prev().monday(), day("2026-10-05"));
    }

    #[test]
    fn test_navigation_across_year_boundary() {
        let week = Week::containing(day("2026-12-31"));
        assert_eq!(week.monday(), day("2026-12-28"));
        assert_eq!(week.next().monday(), day("2027-01-04"));
        assert_eq!(week.start_param(), "2026-12-28");
    }

    #[test]
    fn test_days_are_seven_consecutive() {
        let week = Week::containing(day("2026-10-14"));
        let days = week.days();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], week.monday());
        assert_eq!(days[6], week.end());
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        assert!(week.contains(day("2026-10-18")));
        assert!(!week.contains(day("2026-10-19")));
    }

    #[test]
    fn test_display_helpers() {
        assert_eq!(format_display_date(day("2026-10-05")), "05/10/2026");
        assert_eq!(format_display_key("2026-10-05"), "05/10/2026");
        assert_eq!(format_display_key("not-a-date"), "not-a-date");
        assert_eq!(day_name(day("2026-10-18")), "Dimanche");
        assert_eq!(day_header(day("2026-10-12")), "Lundi 12");
    }
}
