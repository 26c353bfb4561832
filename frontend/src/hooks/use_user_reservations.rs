use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::NaiveDate;
use shared::week::format_api_date;
use shared::{
    check_toggle, DeadlineTime, RefreshOutcome, RefreshTracker, ToggleReservationRequest,
    UpdateReservationStatusRequest, UserDayReservation, UserReservations, Week,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;

const TOGGLE_ERROR: &str = "Erreur lors de la modification de la réservation. Veuillez réessayer.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserReservationsState {
    pub reservations: UserReservations,
    pub user_status: Option<String>,
    pub loading: bool,
    /// Days with a request in flight; their controls are disabled
    pub pending: BTreeSet<NaiveDate>,
}

impl UserReservationsState {
    /// A day missing from the map counts as not reserved
    pub fn day(&self, date: NaiveDate) -> UserDayReservation {
        self.reservations
            .get(&format_api_date(date))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_pending(&self, date: NaiveDate) -> bool {
        self.pending.contains(&date)
    }
}

pub enum UserReservationsAction {
    Loading,
    Loaded {
        reservations: UserReservations,
        user_status: Option<String>,
    },
    Failed,
    Pending(NaiveDate, bool),
    Reserved(NaiveDate, bool),
    Volunteer(NaiveDate, bool),
}

impl Reducible for UserReservationsState {
    type Action = UserReservationsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            UserReservationsAction::Loading => next.loading = true,
            UserReservationsAction::Loaded { reservations, user_status } => {
                next.reservations = reservations;
                next.user_status = user_status;
                next.loading = false;
            }
            UserReservationsAction::Failed => {
                next.reservations = UserReservations::new();
                next.loading = false;
            }
            UserReservationsAction::Pending(date, true) => {
                next.pending.insert(date);
            }
            UserReservationsAction::Pending(date, false) => {
                next.pending.remove(&date);
            }
            UserReservationsAction::Reserved(date, reserved) => {
                let entry = next.reservations.entry(format_api_date(date)).or_default();
                entry.reserved = reserved;
                if !reserved {
                    entry.benevole = false;
                }
            }
            UserReservationsAction::Volunteer(date, benevole) => {
                next.reservations.entry(format_api_date(date)).or_default().benevole = benevole;
            }
        }
        next.into()
    }
}

/// A checkbox change, carrying the element so a refused change can be reverted
#[derive(Clone)]
pub struct CheckboxChange {
    pub date: NaiveDate,
    pub checked: bool,
    pub input: HtmlInputElement,
}

pub struct UseUserReservationsResult {
    pub state: UserReservationsState,
    pub actions: UseUserReservationsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseUserReservationsActions {
    pub toggle_reservation: Callback<CheckboxChange>,
    pub toggle_volunteer: Callback<CheckboxChange>,
}

#[hook]
pub fn use_user_reservations(
    api_client: &ApiClient,
    week: Week,
    deadline: DeadlineTime,
) -> UseUserReservationsResult {
    let state = use_reducer(UserReservationsState::default);
    let tracker = use_mut_ref(RefreshTracker::<UserReservations>::new);

    // Full re-fetch whenever the visible week changes
    use_effect_with(week, {
        let api_client = api_client.clone();
        let state = state.clone();
        let tracker = tracker.clone();
        move |week| {
            let week = *week;
            let ticket = tracker.borrow_mut().navigate(week);
            state.dispatch(UserReservationsAction::Loading);

            spawn_local(async move {
                match api_client.get_user_reservations(week).await {
                    Ok(reply) => {
                        let outcome = tracker.borrow_mut().accept(ticket, &reply.reservations);
                        if outcome == RefreshOutcome::Redraw {
                            state.dispatch(UserReservationsAction::Loaded {
                                reservations: reply.reservations,
                                user_status: reply.user_status,
                            });
                        } else {
                            Logger::debug_with_component(
                                "user-reservations",
                                &format!("Dropped response for week {}", week.start_param()),
                            );
                        }
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "user-reservations",
                            &format!("Error fetching reservations: {}", e),
                        );
                        if tracker.borrow_mut().fail(ticket) {
                            state.dispatch(UserReservationsAction::Failed);
                        }
                    }
                }
            });
            || ()
        }
    });

    let toggle_reservation = {
        let api_client = api_client.clone();
        let state = state.clone();
        use_callback(deadline, move |change: CheckboxChange, deadline| {
            let CheckboxChange { date, checked, input } = change;

            if let Err(rejection) = check_toggle(date, checked, date_utils::now(), deadline) {
                Logger::info_with_component(
                    "reservation-toggle",
                    &format!("Refused toggle for {}: {}", date, rejection),
                );
                input.set_checked(!checked);
                gloo::dialogs::alert(&rejection.to_string());
                return;
            }

            let api_client = api_client.clone();
            let state = state.clone();
            state.dispatch(UserReservationsAction::Pending(date, true));

            spawn_local(async move {
                let request = ToggleReservationRequest {
                    date: format_api_date(date),
                    reserved: checked,
                    benevole: false,
                };
                match api_client.toggle_reservation(&request).await {
                    Ok(()) => state.dispatch(UserReservationsAction::Reserved(date, checked)),
                    Err(e) => {
                        Logger::error_with_component(
                            "reservation-toggle",
                            &format!("Error toggling reservation: {}", e),
                        );
                        input.set_checked(!checked);
                        gloo::dialogs::alert(TOGGLE_ERROR);
                    }
                }
                state.dispatch(UserReservationsAction::Pending(date, false));
            });
        })
    };

    let toggle_volunteer = {
        let api_client = api_client.clone();
        let state = state.clone();
        use_callback((), move |change: CheckboxChange, _| {
            let CheckboxChange { date, checked, input } = change;
            let api_client = api_client.clone();
            let state = state.clone();
            state.dispatch(UserReservationsAction::Pending(date, true));

            spawn_local(async move {
                let request = UpdateReservationStatusRequest {
                    date: format_api_date(date),
                    benevole: checked,
                };
                match api_client.update_reservation_status(&request).await {
                    Ok(()) => state.dispatch(UserReservationsAction::Volunteer(date, checked)),
                    Err(e) => {
                        Logger::error_with_component(
                            "reservation-toggle",
                            &format!("Error updating volunteer status: {}", e),
                        );
                        input.set_checked(!checked);
                        gloo::dialogs::alert(TOGGLE_ERROR);
                    }
                }
                state.dispatch(UserReservationsAction::Pending(date, false));
            });
        })
    };

    UseUserReservationsResult {
        state: (*state).clone(),
        actions: UseUserReservationsActions {
            toggle_reservation,
            toggle_volunteer,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn day(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[wasm_bindgen_test]
    fn test_missing_day_is_not_reserved() {
        let state = UserReservationsState::default();
        assert_eq!(state.day(day("2026-10-14")), UserDayReservation::default());
    }

    #[wasm_bindgen_test]
    fn test_cancel_clears_volunteer_flag() {
        let state = Rc::new(UserReservationsState::default());
        let state = state.reduce(UserReservationsAction::Reserved(day("2026-10-14"), true));
        let state = state.reduce(UserReservationsAction::Volunteer(day("2026-10-14"), true));
        assert!(state.day(day("2026-10-14")).benevole);

        let state = state.reduce(UserReservationsAction::Reserved(day("2026-10-14"), false));
        let entry = state.day(day("2026-10-14"));
        assert!(!entry.reserved);
        assert!(!entry.benevole);
    }

    #[wasm_bindgen_test]
    fn test_failed_load_empties_calendar_but_keeps_status() {
        let mut reservations = UserReservations::new();
        reservations.insert(
            "2026-10-14".to_string(),
            UserDayReservation { reserved: true, benevole: false },
        );
        let state = Rc::new(UserReservationsState::default()).reduce(UserReservationsAction::Loaded {
            reservations,
            user_status: Some("Moniteur".to_string()),
        });
        let state = state.reduce(UserReservationsAction::Failed);

        assert!(state.reservations.is_empty());
        assert_eq!(state.user_status.as_deref(), Some("Moniteur"));
        assert!(!state.loading);
    }

    #[wasm_bindgen_test]
    fn test_pending_tracking() {
        let state = Rc::new(UserReservationsState::default())
            .reduce(UserReservationsAction::Pending(day("2026-10-15"), true));
        assert!(state.is_pending(day("2026-10-15")));
        let state = state.reduce(UserReservationsAction::Pending(day("2026-10-15"), false));
        assert!(!state.is_pending(day("2026-10-15")));
    }
}
