use chrono::NaiveDate;
use shared::week::{format_api_date, parse_api_date};
use shared::{CreateReservationRequest, User};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use super::modal::{Modal, ModalMessages};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ReservationModalProps {
    pub is_open: bool,
    /// Day whose "+" was clicked
    pub date: Option<NaiveDate>,
    pub users: Vec<User>,
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
    pub on_created: Callback<()>,
}

/// Manager form adding a reservation on behalf of a user
#[function_component(ReservationModal)]
pub fn reservation_modal(props: &ReservationModalProps) -> Html {
    let date = use_state(String::new);
    let user_id = use_state(String::new);
    let benevole = use_state(|| false);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    // Reset state when modal opens
    use_effect_with((props.is_open, props.date), {
        let date = date.clone();
        let user_id = user_id.clone();
        let benevole = benevole.clone();
        let error_message = error_message.clone();
        move |(is_open, preset)| {
            if *is_open {
                date.set(preset.map(format_api_date).unwrap_or_default());
                user_id.set(String::new());
                benevole.set(false);
                error_message.set(None);
            }
            || ()
        }
    });

    let on_date_change = {
        let date = date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            date.set(input.value());
        })
    };

    let on_user_change = {
        let user_id = user_id.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            user_id.set(select.value());
        })
    };

    let on_benevole_change = {
        let benevole = benevole.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            benevole.set(input.checked());
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let date = date.clone();
        let user_id = user_id.clone();
        let benevole = benevole.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(day) = parse_api_date(&date) else {
                error_message.set(Some("Veuillez choisir une date.".to_string()));
                return;
            };
            let Ok(id) = user_id.parse::<i64>() else {
                error_message.set(Some("Veuillez choisir un utilisateur.".to_string()));
                return;
            };

            is_submitting.set(true);
            error_message.set(None);

            let request = CreateReservationRequest {
                date: format_api_date(day),
                user_id: id,
                benevole: *benevole,
            };
            let api_client = api_client.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let on_created = on_created.clone();

            spawn_local(async move {
                match api_client.create_reservation(&request).await {
                    Ok(()) => {
                        Logger::info_with_component(
                            "reservation-modal",
                            &format!("Created reservation for user {} on {}", request.user_id, request.date),
                        );
                        on_created.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "reservation-modal",
                            &format!("Error creating reservation: {}", e),
                        );
                        error_message.set(Some(format!("Erreur lors de la création de la réservation: {}", e)));
                    }
                }
                is_submitting.set(false);
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <Modal is_open={props.is_open} title="Ajouter une réservation" on_close={props.on_close.clone()}>
            <ModalMessages error={(*error_message).clone()} />
            <form onsubmit={on_submit}>
                <div class="mb-3">
                    <label for="reservationDate" class="form-label">{"Date"}</label>
                    <input id="reservationDate" type="date" class="form-control"
                        value={(*date).clone()} onchange={on_date_change} disabled={*is_submitting} />
                </div>
                <div class="mb-3">
                    <label for="userDropdown" class="form-label">{"Utilisateur"}</label>
                    <select id="userDropdown" class="form-select" onchange={on_user_change} disabled={*is_submitting}>
                        <option value="" selected={user_id.is_empty()}>{"Choisir un utilisateur..."}</option>
                        {for props.users.iter().map(|user| {
                            let value = user.id.to_string();
                            let selected = *user_id == value;
                            html! {
                                <option {value} {selected}>{format!("{} ({})", user.name, user.status)}</option>
                            }
                        })}
                    </select>
                </div>
                <div class="form-check mb-3">
                    <input id="reservationBenevole" type="checkbox" class="form-check-input"
                        checked={*benevole} onchange={on_benevole_change} disabled={*is_submitting} />
                    <label for="reservationBenevole" class="form-check-label">{"Bénévole"}</label>
                </div>
                <div class="repas-modal-buttons">
                    <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                        {if *is_submitting { "Enregistrement..." } else { "Valider" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_submitting}>
                        {"Annuler"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
