use chrono::NaiveDate;
use shared::week::{day_header, format_api_date};
use shared::{display_status, Week, WeekReservation, WeekReservations};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ManagerCalendarProps {
    pub week: Week,
    pub reservations: WeekReservations,
    pub loading: bool,
    pub on_open_day: Callback<NaiveDate>,
    pub on_add: Callback<NaiveDate>,
}

/// Line shown in a day column, e.g. "Alice Martin (Moniteur)" or "Bruno Petit (Bénévole)"
pub fn registration_line(reservation: &WeekReservation) -> String {
    format!("{} ({})", reservation.user_name, display_status(reservation))
}

/// Everybody's reservations for the week, one clickable column per day
#[function_component(ManagerCalendar)]
pub fn manager_calendar(props: &ManagerCalendarProps) -> Html {
    html! {
        <div class={classes!("row", "manager-calendar", props.loading.then_some("loading"))} id="calendarDays">
            {for props.week.days().into_iter().map(|date| {
                let key = format_api_date(date);
                let day = props.reservations.get(&key).map(Vec::as_slice).unwrap_or_default();

                let on_open = {
                    let on_open_day = props.on_open_day.clone();
                    Callback::from(move |_: MouseEvent| on_open_day.emit(date))
                };
                let on_add = {
                    let on_add = props.on_add.clone();
                    Callback::from(move |e: MouseEvent| {
                        // Keep the column from opening the day details
                        e.stop_propagation();
                        on_add.emit(date);
                    })
                };

                html! {
                    <div class="col-md calendar-day" key={key} onclick={on_open}>
                        <h5>{day_header(date)}</h5>
                        <div class="user-registrations">
                            if day.is_empty() {
                                <p class="text-muted">{"Aucune réservation"}</p>
                            } else {
                                {for day.iter().map(|reservation| html! {
                                    <p class="user-registration" key={reservation.id}>{registration_line(reservation)}</p>
                                })}
                            }
                        </div>
                        <button type="button" class="btn btn-primary btn-sm add-reservation" onclick={on_add}>{"+"}</button>
                    </div>
                }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_registration_line_uses_display_status() {
        let mut reservation = WeekReservation {
            id: 3,
            user_id: Some(12),
            user_user_id: None,
            user_name: "Alice Martin".to_string(),
            status: "Moniteur".to_string(),
            benevole: false,
        };
        assert_eq!(registration_line(&reservation), "Alice Martin (Moniteur)");

        reservation.benevole = true;
        assert_eq!(registration_line(&reservation), "Alice Martin (Bénévole)");
    }
}
