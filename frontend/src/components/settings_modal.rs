use shared::{DeadlineTime, UpdateSettingsRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use super::modal::{Modal, ModalMessages};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct SettingsModalProps {
    pub is_open: bool,
    pub deadline: DeadlineTime,
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
    pub on_saved: Callback<DeadlineTime>,
}

#[function_component(SettingsModal)]
pub fn settings_modal(props: &SettingsModalProps) -> Html {
    let deadline_text = use_state(String::new);
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let success_message = use_state(|| Option::<String>::None);

    use_effect_with((props.is_open, props.deadline), {
        let deadline_text = deadline_text.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        move |(is_open, deadline)| {
            if *is_open {
                deadline_text.set(deadline.to_setting());
                error_message.set(None);
                success_message.set(None);
            }
            || ()
        }
    });

    let on_deadline_change = {
        let deadline_text = deadline_text.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            deadline_text.set(input.value());
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let deadline_text = deadline_text.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();
        let success_message = success_message.clone();
        let on_saved = props.on_saved.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let deadline = match deadline_text.parse::<DeadlineTime>() {
                Ok(deadline) => deadline,
                Err(e) => {
                    error_message.set(Some(format!("Heure limite invalide ({})", e)));
                    return;
                }
            };

            is_submitting.set(true);
            error_message.set(None);
            success_message.set(None);

            let api_client = api_client.clone();
            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let success_message = success_message.clone();
            let on_saved = on_saved.clone();

            spawn_local(async move {
                let request = UpdateSettingsRequest {
                    deadline_time: deadline.to_setting(),
                };
                match api_client.update_settings(&request).await {
                    Ok(()) => {
                        Logger::info_with_component(
                            "settings-modal",
                            &format!("Deadline updated to {}", request.deadline_time),
                        );
                        success_message.set(Some(format!("Heure limite enregistrée : {}", deadline.label())));
                        on_saved.emit(deadline);
                    }
                    Err(e) => {
                        Logger::error_with_component("settings-modal", &format!("Failed to save settings: {}", e));
                        error_message.set(Some(format!("Erreur lors de l'enregistrement: {}", e)));
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
        <Modal is_open={props.is_open} title="Paramètres" on_close={props.on_close.clone()}>
            <ModalMessages error={(*error_message).clone()} success={(*success_message).clone()} />
            <form onsubmit={on_submit}>
                <div class="mb-3">
                    <label for="deadlineTime" class="form-label">{"Heure limite de réservation du jour"}</label>
                    <input id="deadlineTime" type="time" class="form-control"
                        value={(*deadline_text).clone()} onchange={on_deadline_change} disabled={*is_submitting} />
                    <small class="form-text">{"Après cette heure, les utilisateurs ne peuvent plus réserver pour le jour même."}</small>
                </div>
                <div class="repas-modal-buttons">
                    <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                        {if *is_submitting { "Enregistrement..." } else { "Enregistrer" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={*is_submitting}>
                        {"Fermer"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
