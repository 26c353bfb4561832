use chrono::{NaiveDate, NaiveDateTime};
use js_sys::Date;
use shared::week::format_display_date;
use shared::Week;

/// Current local date and time as seen by the browser
pub fn now() -> NaiveDateTime {
    let js_now = Date::new_0();
    NaiveDate::from_ymd_opt(js_now.get_full_year() as i32, js_now.get_month() + 1, js_now.get_date())
        .and_then(|date| date.and_hms_opt(js_now.get_hours(), js_now.get_minutes(), js_now.get_seconds()))
        .unwrap_or_else(|| chrono::Local::now().naive_local())
}

pub fn today() -> NaiveDate {
    now().date()
}

/// Displayed week bounds, e.g. ("12/10/2026", "18/10/2026")
pub fn week_bounds_display(week: &Week) -> (String, String) {
    (format_display_date(week.monday()), format_display_date(week.end()))
}
