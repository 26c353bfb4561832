use chrono::{NaiveDate, NaiveDateTime};
use shared::deadline::format_remaining;
use shared::week::{day_header, format_api_date};
use shared::{DayAccess, DeadlineTime, UserDayReservation, Week};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_user_reservations::{
    CheckboxChange, UseUserReservationsActions, UserReservationsState,
};

/// Everything needed to render one day, computed once for both layouts
#[derive(Clone, Debug, PartialEq)]
pub struct DayView {
    pub date: NaiveDate,
    pub key: String,
    pub header: String,
    pub is_today: bool,
    pub access: DayAccess,
    pub reservation: UserDayReservation,
    pub pending: bool,
    pub lock_reason: Option<String>,
    /// "Délai: 11h (2h 5m restantes)" for today before the cutoff
    pub deadline_info: Option<String>,
    pub show_volunteer: bool,
}

impl DayView {
    pub fn new(
        date: NaiveDate,
        now: NaiveDateTime,
        deadline: &DeadlineTime,
        reservation: UserDayReservation,
        pending: bool,
        volunteer_eligible: bool,
    ) -> Self {
        let access = DayAccess::for_day(date, now, deadline);
        let deadline_info = match access {
            DayAccess::Open { remaining: Some(remaining) } => Some(format!(
                "Délai: {} ({})",
                deadline.label(),
                format_remaining(remaining)
            )),
            _ => None,
        };

        Self {
            date,
            key: format_api_date(date),
            header: day_header(date),
            is_today: date == now.date(),
            access,
            show_volunteer: reservation.reserved && !access.is_locked() && volunteer_eligible,
            reservation,
            pending,
            lock_reason: access.lock_reason(deadline),
            deadline_info,
        }
    }

    pub fn status_text(&self) -> &'static str {
        if self.reservation.reserved {
            "Réservé"
        } else {
            "Non réservé"
        }
    }
}

fn checkbox_callback(date: NaiveDate, target: Callback<CheckboxChange>) -> Callback<Event> {
    Callback::from(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        target.emit(CheckboxChange {
            date,
            checked: input.checked(),
            input,
        });
    })
}

#[derive(Properties, PartialEq)]
pub struct UserCalendarProps {
    pub week: Week,
    pub now: NaiveDateTime,
    pub deadline: DeadlineTime,
    pub state: UserReservationsState,
    pub volunteer_eligible: bool,
    pub actions: UseUserReservationsActions,
}

/// The logged-in user's week: a card grid on wide screens, a list on narrow ones
#[function_component(UserCalendar)]
pub fn user_calendar(props: &UserCalendarProps) -> Html {
    let days: Vec<DayView> = props
        .week
        .days()
        .into_iter()
        .map(|date| {
            DayView::new(
                date,
                props.now,
                &props.deadline,
                props.state.day(date),
                props.state.is_pending(date),
                props.volunteer_eligible,
            )
        })
        .collect();

    html! {
        <div class={classes!("user-calendar", props.state.loading.then_some("loading"))}>
            <div class="row row-cols-1 row-cols-md-7 calendar-grid d-none d-md-flex" id="calendarDays">
                {for days.iter().map(|day| grid_day(day, &props.actions))}
            </div>
            <ul class="list-group calendar-list d-md-none" id="calendarList">
                {for days.iter().map(|day| list_day(day, &props.actions))}
            </ul>
        </div>
    }
}

fn volunteer_toggle(day: &DayView, actions: &UseUserReservationsActions, id_prefix: &str) -> Html {
    if !day.show_volunteer {
        return html! {};
    }
    let id = format!("{}benevole-{}", id_prefix, day.key);
    html! {
        <div class="form-check volunteer-toggle">
            <input
                class="form-check-input"
                type="checkbox"
                id={id.clone()}
                checked={day.reservation.benevole}
                disabled={day.pending}
                onchange={checkbox_callback(day.date, actions.toggle_volunteer.clone())}
            />
            <label class="form-check-label" for={id}>{"Bénévole"}</label>
        </div>
    }
}

fn grid_day(day: &DayView, actions: &UseUserReservationsActions) -> Html {
    let id = format!("reservation-{}", day.key);
    let status_class = if day.reservation.reserved {
        "status-reserved"
    } else {
        "status-not-reserved"
    };

    html! {
        <div class="col mb-3" key={day.key.clone()}>
            <div class={classes!("calendar-day", day.is_today.then_some("today"))}>
                <h5>
                    {day.header.clone()}
                    if day.is_today {
                        <span class="badge bg-primary ms-2">{"Aujourd'hui"}</span>
                    }
                </h5>
                if let Some(reason) = &day.lock_reason {
                    <div class="reservation-status">
                        <div class={classes!("mb-2", if day.access == DayAccess::DeadlinePassed { "text-warning" } else { "text-secondary" })}>
                            {reason.clone()}
                        </div>
                        <div class={if day.reservation.reserved { "text-success" } else { "text-danger" }}>
                            <strong>{day.status_text()}</strong>
                        </div>
                    </div>
                } else {
                    <div class="reservation-toggle">
                        <div class="form-check form-switch">
                            <input
                                class="form-check-input reservation-toggle-large"
                                type="checkbox"
                                role="switch"
                                id={id.clone()}
                                checked={day.reservation.reserved}
                                disabled={day.pending}
                                onchange={checkbox_callback(day.date, actions.toggle_reservation.clone())}
                            />
                            <label class="form-check-label" for={id}>{"Réserver"}</label>
                        </div>
                    </div>
                    <div class={classes!("reservation-status", status_class)}>
                        <strong>{day.status_text()}</strong>
                    </div>
                    {volunteer_toggle(day, actions, "")}
                }
                if let Some(info) = &day.deadline_info {
                    <div class="deadline-info text-warning mt-2"><small>{info.clone()}</small></div>
                }
            </div>
        </div>
    }
}

fn list_day(day: &DayView, actions: &UseUserReservationsActions) -> Html {
    let pill_class = if day.reservation.reserved {
        "status-reserved-pill"
    } else {
        "status-not-reserved-pill"
    };

    html! {
        <li
            key={day.key.clone()}
            class={classes!(
                "list-group-item", "d-flex", "justify-content-between", "align-items-center",
                "calendar-list-item", day.is_today.then_some("today")
            )}
        >
            <div class="day-info">
                <h5>{day.header.clone()}</h5>
                if day.is_today {
                    <span class="badge bg-primary">{"Aujourd'hui"}</span>
                }
                if let Some(info) = &day.deadline_info {
                    <div class="text-warning small">{info.clone()}</div>
                }
                <span class={classes!("status-indicator", pill_class)}>{day.status_text()}</span>
            </div>
            <div class="toggle-container">
                if let Some(reason) = &day.lock_reason {
                    <small class="text-muted">{reason.clone()}</small>
                } else {
                    <div class="form-check form-switch">
                        <input
                            class="form-check-input"
                            type="checkbox"
                            role="switch"
                            id={format!("list-reservation-{}", day.key)}
                            checked={day.reservation.reserved}
                            disabled={day.pending}
                            onchange={checkbox_callback(day.date, actions.toggle_reservation.clone())}
                        />
                    </div>
                    {volunteer_toggle(day, actions, "list-")}
                }
            </div>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn at(date: &str, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn day(date: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
    }

    fn reserved() -> UserDayReservation {
        UserDayReservation { reserved: true, benevole: false }
    }

    #[wasm_bindgen_test]
    fn test_today_before_deadline_shows_countdown() {
        let view = DayView::new(
            day("2026-10-14"),
            at("2026-10-14", 8, 55),
            &DeadlineTime::default(),
            reserved(),
            false,
            true,
        );
        assert!(view.is_today);
        assert_eq!(view.header, "Mercredi 14");
        assert_eq!(view.lock_reason, None);
        assert_eq!(view.deadline_info.as_deref(), Some("Délai: 11h (2h 5m restantes)"));
        assert!(view.show_volunteer);
    }

    #[wasm_bindgen_test]
    fn test_today_after_deadline_is_locked() {
        let view = DayView::new(
            day("2026-10-14"),
            at("2026-10-14", 11, 0),
            &DeadlineTime::default(),
            reserved(),
            false,
            true,
        );
        assert_eq!(view.lock_reason.as_deref(), Some("Délai dépassé (11h)"));
        assert_eq!(view.deadline_info, None);
        assert!(!view.show_volunteer);
        assert_eq!(view.status_text(), "Réservé");
    }

    #[wasm_bindgen_test]
    fn test_past_day_has_no_toggle() {
        let view = DayView::new(
            day("2026-10-12"),
            at("2026-10-14", 8, 0),
            &DeadlineTime::default(),
            UserDayReservation::default(),
            false,
            true,
        );
        assert_eq!(view.lock_reason.as_deref(), Some("Date passée"));
        assert_eq!(view.status_text(), "Non réservé");
    }

    #[wasm_bindgen_test]
    fn test_volunteer_needs_reservation_and_role() {
        let now = at("2026-10-14", 8, 0);
        let future = day("2026-10-16");
        let deadline = DeadlineTime::default();

        assert!(!DayView::new(future, now, &deadline, UserDayReservation::default(), false, true).show_volunteer);
        assert!(!DayView::new(future, now, &deadline, reserved(), false, false).show_volunteer);
        let view = DayView::new(future, now, &deadline, reserved(), false, true);
        assert!(view.show_volunteer);
        assert_eq!(view.deadline_info, None);
    }
}
