use std::rc::Rc;

use chrono::NaiveDate;
use shared::week::{day_header, format_api_date, format_display_date};
use shared::{
    display_status, status_stats, unique_statuses, DayFilter, Extras, StatusFilter,
    UpdateExtrasRequest, WeekReservation,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use super::modal::{Modal, ModalMessages};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct DayDetailsModalProps {
    pub is_open: bool,
    pub date: Option<NaiveDate>,
    /// Snapshot of the day taken when the modal opened; polling does not touch it
    pub reservations: Vec<WeekReservation>,
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
    /// A reservation changed; the week must be reloaded
    pub on_changed: Callback<()>,
}

fn parse_count(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        Some(0)
    } else {
        value.parse().ok()
    }
}

/// Rows shown in the modal. Updates go through `reduce` so that replies
/// finishing out of order each apply to the latest rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DayRows {
    pub rows: Vec<WeekReservation>,
}

pub enum DayRowsAction {
    Reset(Vec<WeekReservation>),
    Volunteer { id: i64, benevole: bool },
}

impl Reducible for DayRows {
    type Action = DayRowsAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            DayRowsAction::Reset(rows) => Rc::new(DayRows { rows }),
            DayRowsAction::Volunteer { id, benevole } => {
                let mut next = (*self).clone();
                if let Some(row) = next.rows.iter_mut().find(|row| row.id == id) {
                    row.benevole = benevole;
                }
                Rc::new(next)
            }
        }
    }
}

#[function_component(DayDetailsModal)]
pub fn day_details_modal(props: &DayDetailsModalProps) -> Html {
    let rows = use_reducer(DayRows::default);
    let filter = use_state(DayFilter::default);
    let extras = use_state(Extras::default);
    let eds_input = use_state(String::new);
    let autre_input = use_state(String::new);
    let saving_extras = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let success_message = use_state(|| Option::<String>::None);

    // Reset state and load extras when modal opens
    use_effect_with((props.is_open, props.date), {
        let rows = rows.clone();
        let filter = filter.clone();
        let extras = extras.clone();
        let eds_input = eds_input.clone();
        let autre_input = autre_input.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        let snapshot = props.reservations.clone();
        let api_client = props.api_client.clone();

        move |(is_open, date)| {
            if let (true, Some(date)) = (*is_open, *date) {
                rows.dispatch(DayRowsAction::Reset(snapshot));
                filter.set(DayFilter::default());
                extras.set(Extras::default());
                eds_input.set("0".to_string());
                autre_input.set("0".to_string());
                error_message.set(None);
                success_message.set(None);

                spawn_local(async move {
                    match api_client.get_extras(date).await {
                        Ok(loaded) => {
                            eds_input.set(loaded.eds.to_string());
                            autre_input.set(loaded.autre.to_string());
                            extras.set(loaded);
                        }
                        Err(e) => {
                            Logger::error_with_component(
                                "day-details",
                                &format!("Failed to load extras for {}: {}", date, e),
                            );
                        }
                    }
                });
            }
            || ()
        }
    });

    let on_search = {
        let filter = filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            filter.set(DayFilter {
                search: input.value(),
                ..(*filter).clone()
            });
        })
    };

    let on_status = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            filter.set(DayFilter {
                status: StatusFilter::from_value(&select.value()),
                ..(*filter).clone()
            });
        })
    };

    let on_eds = {
        let eds_input = eds_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            eds_input.set(input.value());
        })
    };

    let on_autre = {
        let autre_input = autre_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            autre_input.set(input.value());
        })
    };

    let on_save_extras = {
        let api_client = props.api_client.clone();
        let date = props.date;
        let extras = extras.clone();
        let eds_input = eds_input.clone();
        let autre_input = autre_input.clone();
        let saving_extras = saving_extras.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(date) = date else {
                return;
            };
            let (Some(eds), Some(autre)) = (parse_count(&eds_input), parse_count(&autre_input)) else {
                error_message.set(Some("Les nombres doivent être des entiers positifs.".to_string()));
                return;
            };

            saving_extras.set(true);
            error_message.set(None);
            success_message.set(None);

            let api_client = api_client.clone();
            let extras = extras.clone();
            let saving_extras = saving_extras.clone();
            let error_message = error_message.clone();
            let success_message = success_message.clone();
            spawn_local(async move {
                let request = UpdateExtrasRequest {
                    date: format_api_date(date),
                    eds,
                    autre,
                };
                match api_client.update_extras(&request).await {
                    Ok(()) => {
                        extras.set(Extras { eds, autre });
                        success_message.set(Some("Réservations supplémentaires enregistrées.".to_string()));
                    }
                    Err(e) => {
                        Logger::error_with_component("day-details", &format!("Failed to save extras: {}", e));
                        error_message.set(Some(format!("Erreur lors de l'enregistrement: {}", e)));
                    }
                }
                saving_extras.set(false);
            });
        })
    };

    let toggle_volunteer = {
        let api_client = props.api_client.clone();
        let rows = rows.clone();
        let on_changed = props.on_changed.clone();

        Callback::from(move |(id, input): (i64, HtmlInputElement)| {
            let benevole = input.checked();
            let api_client = api_client.clone();
            let rows = rows.clone();
            let on_changed = on_changed.clone();

            spawn_local(async move {
                match api_client.update_reservation_status_by_id(id, benevole).await {
                    Ok(()) => {
                        rows.dispatch(DayRowsAction::Volunteer { id, benevole });
                        on_changed.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "day-details",
                            &format!("Failed to update reservation {}: {}", id, e),
                        );
                        input.set_checked(!benevole);
                        gloo::dialogs::alert("Erreur lors de la mise à jour du statut.");
                    }
                }
            });
        })
    };

    let delete_reservation = {
        let api_client = props.api_client.clone();
        let on_changed = props.on_changed.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |reservation: WeekReservation| {
            let question = format!("Supprimer la réservation de {} ?", reservation.user_name);
            if !gloo::dialogs::confirm(&question) {
                return;
            }
            let api_client = api_client.clone();
            let on_changed = on_changed.clone();
            let on_close = on_close.clone();

            spawn_local(async move {
                match api_client.delete_reservation(reservation.id).await {
                    Ok(()) => {
                        Logger::info_with_component(
                            "day-details",
                            &format!("Deleted reservation {}", reservation.id),
                        );
                        on_close.emit(());
                        on_changed.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "day-details",
                            &format!("Failed to delete reservation {}: {}", reservation.id, e),
                        );
                        gloo::dialogs::alert("Erreur lors de la suppression de la réservation.");
                    }
                }
            });
        })
    };

    let title = props
        .date
        .map(|date| format!("{} - {}", day_header(date), format_display_date(date)))
        .unwrap_or_default();

    let stats = status_stats(&rows.rows, &extras);
    let statuses = unique_statuses(&rows.rows);
    let visible = filter.apply(&rows.rows);

    html! {
        <Modal is_open={props.is_open} title={title} on_close={props.on_close.clone()} class={classes!("repas-modal-wide")}>
            <ModalMessages error={(*error_message).clone()} success={(*success_message).clone()} />

            <div class="d-flex flex-wrap justify-content-around mb-3" id="statusStats">
                {for stats.iter().map(|(label, count)| html! {
                    <div class="stat-item text-center mb-3">
                        <h3>{*count}</h3>
                        <p>{label.clone()}</p>
                    </div>
                })}
            </div>

            <form class="row g-2 align-items-end mb-3 extras-form" onsubmit={on_save_extras}>
                <div class="col">
                    <label class="form-label" for="extrasEds">{Extras::EDS_LABEL}</label>
                    <input id="extrasEds" type="number" min="0" class="form-control"
                        value={(*eds_input).clone()} oninput={on_eds} disabled={*saving_extras} />
                </div>
                <div class="col">
                    <label class="form-label" for="extrasAutre">{Extras::AUTRE_LABEL}</label>
                    <input id="extrasAutre" type="number" min="0" class="form-control"
                        value={(*autre_input).clone()} oninput={on_autre} disabled={*saving_extras} />
                </div>
                <div class="col-auto">
                    <button type="submit" class="btn btn-outline-primary" disabled={*saving_extras}>
                        {if *saving_extras { "Enregistrement..." } else { "Enregistrer" }}
                    </button>
                </div>
            </form>

            <div class="row g-2 mb-3">
                <div class="col">
                    <input id="searchPeople" type="search" class="form-control" placeholder="Rechercher un nom..."
                        value={filter.search.clone()} oninput={on_search} />
                </div>
                <div class="col">
                    <select id="statusFilter" class="form-select" onchange={on_status}>
                        <option value={StatusFilter::ALL_VALUE} selected={filter.status == StatusFilter::All}>
                            {"Tous les statuts"}
                        </option>
                        {for statuses.iter().map(|status| html! {
                            <option value={status.clone()} selected={filter.status.value() == status.as_str()}>
                                {status.clone()}
                            </option>
                        })}
                    </select>
                </div>
            </div>

            <div id="peopleList">
                if visible.is_empty() {
                    <p class="text-muted">{"Aucune réservation pour ce jour."}</p>
                } else {
                    <table class="table table-striped">
                        <thead>
                            <tr><th>{"Nom"}</th><th>{"Status"}</th><th>{"Actions"}</th></tr>
                        </thead>
                        <tbody>
                            {for visible.into_iter().map(|reservation| {
                                let id = reservation.id;
                                let on_volunteer = {
                                    let toggle_volunteer = toggle_volunteer.clone();
                                    Callback::from(move |e: Event| {
                                        let input: HtmlInputElement = e.target_unchecked_into();
                                        toggle_volunteer.emit((id, input));
                                    })
                                };
                                let on_delete = {
                                    let delete_reservation = delete_reservation.clone();
                                    let reservation = reservation.clone();
                                    Callback::from(move |_: MouseEvent| delete_reservation.emit(reservation.clone()))
                                };
                                html! {
                                    <tr key={id}>
                                        <td>{reservation.user_name.clone()}</td>
                                        <td>{display_status(reservation).to_string()}</td>
                                        <td class="d-flex align-items-center gap-2">
                                            <div class="form-check form-switch mb-0">
                                                <input class="form-check-input" type="checkbox" role="switch"
                                                    id={format!("detail-benevole-{}", id)}
                                                    checked={reservation.benevole} onchange={on_volunteer} />
                                                <label class="form-check-label" for={format!("detail-benevole-{}", id)}>
                                                    {"Bénévole"}
                                                </label>
                                            </div>
                                            <button type="button" class="btn btn-sm btn-outline-danger" onclick={on_delete}>
                                                {"Supprimer"}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                }
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_parse_count() {
        assert_eq!(parse_count(""), Some(0));
        assert_eq!(parse_count(" 4 "), Some(4));
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count("deux"), None);
    }

    fn row(id: i64, name: &str) -> WeekReservation {
        WeekReservation {
            id,
            user_id: Some(id),
            user_user_id: None,
            user_name: name.to_string(),
            status: "Moniteur".to_string(),
            benevole: false,
        }
    }

    #[wasm_bindgen_test]
    fn test_interleaved_volunteer_updates_both_apply() {
        let state = Rc::new(DayRows::default())
            .reduce(DayRowsAction::Reset(vec![row(1, "Alice Martin"), row(2, "Bruno Petit")]));

        // Both toggles were issued against the same rows; their replies land one after the other
        let state = state.reduce(DayRowsAction::Volunteer { id: 1, benevole: true });
        let state = state.reduce(DayRowsAction::Volunteer { id: 2, benevole: true });

        let flags: Vec<(i64, bool)> = state.rows.iter().map(|r| (r.id, r.benevole)).collect();
        assert_eq!(flags, vec![(1, true), (2, true)]);
    }

    #[wasm_bindgen_test]
    fn test_volunteer_update_for_unknown_id_keeps_rows() {
        let state = Rc::new(DayRows::default()).reduce(DayRowsAction::Reset(vec![row(1, "Alice Martin")]));
        let state = state.reduce(DayRowsAction::Volunteer { id: 9, benevole: true });
        assert_eq!(state.rows, vec![row(1, "Alice Martin")]);
    }

    #[wasm_bindgen_test]
    fn test_reset_replaces_rows() {
        let state = Rc::new(DayRows::default())
            .reduce(DayRowsAction::Reset(vec![row(1, "Alice Martin")]))
            .reduce(DayRowsAction::Volunteer { id: 1, benevole: true })
            .reduce(DayRowsAction::Reset(vec![row(2, "Bruno Petit")]));
        assert_eq!(state.rows, vec![row(2, "Bruno Petit")]);
    }
}
