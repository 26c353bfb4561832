use std::rc::Rc;

use shared::{FetchTicket, RefreshOutcome, RefreshTracker, Week, WeekReservations};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::use_periodic_refresh::{use_periodic_refresh, PeriodicRefreshConfig};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeekReservationsState {
    pub reservations: WeekReservations,
    pub loading: bool,
}

pub struct UseWeekReservationsResult {
    pub state: WeekReservationsState,
    /// Forced re-fetch of the visible week, used after every manager mutation
    pub reload: Callback<()>,
}

type Tracker = Rc<std::cell::RefCell<RefreshTracker<WeekReservations>>>;

fn run_fetch(
    api_client: ApiClient,
    tracker: Tracker,
    state: UseStateHandle<WeekReservationsState>,
    ticket: FetchTicket,
) {
    spawn_local(async move {
        let week = ticket.week();
        match api_client.get_week_reservations(week).await {
            Ok(reservations) => match tracker.borrow_mut().accept(ticket, &reservations) {
                RefreshOutcome::Redraw => state.set(WeekReservationsState {
                    reservations,
                    loading: false,
                }),
                RefreshOutcome::Unchanged => {}
                RefreshOutcome::Stale => Logger::debug_with_component(
                    "week-reservations",
                    &format!("Dropped stale response for week {}", week.start_param()),
                ),
            },
            Err(e) => {
                Logger::error_with_component(
                    "week-reservations",
                    &format!("Error fetching week {}: {}", week.start_param(), e),
                );
                if tracker.borrow_mut().fail(ticket) {
                    state.set(WeekReservationsState::default());
                }
            }
        }
    });
}

/// Everybody's reservations for `week`, kept fresh by polling every `poll_interval_ms`
#[hook]
pub fn use_week_reservations(
    api_client: &ApiClient,
    week: Week,
    poll_interval_ms: u32,
) -> UseWeekReservationsResult {
    let state = use_state(WeekReservationsState::default);
    let tracker = use_mut_ref(RefreshTracker::<WeekReservations>::new);

    use_effect_with(week, {
        let api_client = api_client.clone();
        let state = state.clone();
        let tracker = tracker.clone();
        move |week| {
            let ticket = tracker.borrow_mut().navigate(*week);
            state.set(WeekReservationsState {
                reservations: WeekReservations::new(),
                loading: true,
            });
            run_fetch(api_client, tracker, state, ticket);
            || ()
        }
    });

    let poll = {
        let api_client = api_client.clone();
        let state = state.clone();
        let tracker = tracker.clone();
        use_callback((), move |_: (), _| {
            let ticket = tracker.borrow_mut().poll();
            if let Some(ticket) = ticket {
                run_fetch(api_client.clone(), tracker.clone(), state.clone(), ticket);
            }
        })
    };

    // The timer restarts with the week, so a poll never lands right after navigation
    use_periodic_refresh(PeriodicRefreshConfig::every(poll_interval_ms), poll, week);

    let reload = {
        let api_client = api_client.clone();
        let state = state.clone();
        let tracker = tracker.clone();
        use_callback((), move |_: (), _| {
            let ticket = tracker.borrow_mut().reload();
            if let Some(ticket) = ticket {
                run_fetch(api_client.clone(), tracker.clone(), state.clone(), ticket);
            }
        })
    };

    UseWeekReservationsResult {
        state: (*state).clone(),
        reload,
    }
}
