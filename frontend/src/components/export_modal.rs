use shared::week::{format_api_date, format_display_key};
use shared::{ExportFormat, ExportRange, ReservationStatsResponse, StatsRequests, Week};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use super::modal::{Modal, ModalMessages};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ExportModalProps {
    pub is_open: bool,
    /// Range preset when the modal opens
    pub week: Week,
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
}

#[function_component(ExportModal)]
pub fn export_modal(props: &ExportModalProps) -> Html {
    let format = use_state(ExportFormat::default);
    let start = use_state(String::new);
    let end = use_state(String::new);
    let stats = use_state(|| Option::<ReservationStatsResponse>::None);
    let stats_loading = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);
    let stats_requests = use_mut_ref(StatsRequests::default);

    // Reset state when modal opens
    use_effect_with((props.is_open, props.week), {
        let format = format.clone();
        let start = start.clone();
        let end = end.clone();
        let error_message = error_message.clone();
        move |(is_open, week)| {
            if *is_open {
                let range = ExportRange::for_week(*week);
                format.set(ExportFormat::default());
                start.set(format_api_date(range.start()));
                end.set(format_api_date(range.end()));
                error_message.set(None);
            }
            || ()
        }
    });

    // Preview counts whenever the range changes
    use_effect_with((props.is_open, (*start).clone(), (*end).clone()), {
        let api_client = props.api_client.clone();
        let stats = stats.clone();
        let stats_loading = stats_loading.clone();
        let error_message = error_message.clone();
        let stats_requests = stats_requests.clone();
        move |(is_open, start, end)| {
            if *is_open && !start.is_empty() {
                match ExportRange::parse(start, end) {
                    Ok(range) => {
                        stats_requests.borrow_mut().start(range);
                        stats_loading.set(true);
                        error_message.set(None);
                        spawn_local(async move {
                            let result = api_client.reservation_stats(&range).await;
                            if !stats_requests.borrow().is_current(range) {
                                Logger::debug_with_component(
                                    "export-modal",
                                    &format!("Dropping stats for superseded range {}", range.query()),
                                );
                                return;
                            }
                            match result {
                                Ok(reply) => stats.set(Some(reply)),
                                Err(e) => {
                                    Logger::error_with_component(
                                        "export-modal",
                                        &format!("Failed to load stats: {}", e),
                                    );
                                    stats.set(None);
                                }
                            }
                            stats_loading.set(false);
                        });
                    }
                    Err(e) => {
                        stats_requests.borrow_mut().clear();
                        stats_loading.set(false);
                        stats.set(None);
                        error_message.set(Some(e.to_string()));
                    }
                }
            }
            || ()
        }
    });

    let on_format_change = {
        let format = format.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(value) = ExportFormat::from_value(&select.value()) {
                format.set(value);
            }
        })
    };

    let on_start_change = {
        let start = start.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            start.set(input.value());
        })
    };

    let on_end_change = {
        let end = end.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            end.set(input.value());
        })
    };

    let on_export = {
        let api_client = props.api_client.clone();
        let format = format.clone();
        let start = start.clone();
        let end = end.clone();
        let error_message = error_message.clone();
        let on_close = props.on_close.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let range = match ExportRange::parse(&start, &end) {
                Ok(range) => range,
                Err(e) => {
                    error_message.set(Some(e.to_string()));
                    return;
                }
            };

            let url = api_client.export_url(&range, *format);
            Logger::debug_with_component("export-modal", &format!("Starting export: {}", url));
            match gloo::utils::window().location().set_href(&url) {
                Ok(()) => on_close.emit(()),
                Err(e) => {
                    Logger::error_with_component("export-modal", &format!("Export navigation failed: {:?}", e));
                    error_message.set(Some("Impossible de lancer l'export.".to_string()));
                }
            }
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let preview = if *stats_loading {
        html! { <p class="text-muted">{"Chargement des statistiques..."}</p> }
    } else if let Some(stats) = (*stats).clone() {
        html! {
            <div class="export-preview">
                <p><strong>{format!("{} réservation(s) sur la période", stats.total)}</strong></p>
                if !stats.by_status.is_empty() {
                    <ul class="list-inline">
                        {for stats.by_status.iter().map(|(status, count)| html! {
                            <li class="list-inline-item badge bg-secondary">{format!("{}: {}", status, count)}</li>
                        })}
                    </ul>
                }
                if !stats.by_date.is_empty() {
                    <table class="table table-sm">
                        <tbody>
                            {for stats.by_date.iter().map(|(date, count)| html! {
                                <tr><td>{format_display_key(date)}</td><td>{*count}</td></tr>
                            })}
                        </tbody>
                    </table>
                }
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <Modal is_open={props.is_open} title="Exporter les réservations" on_close={props.on_close.clone()}>
            <ModalMessages error={(*error_message).clone()} />
            <form onsubmit={on_export}>
                <div class="mb-3">
                    <label for="exportFormat" class="form-label">{"Format"}</label>
                    <select id="exportFormat" class="form-select" onchange={on_format_change}>
                        {for ExportFormat::ALL.iter().map(|option| html! {
                            <option value={option.as_str()} selected={*option == *format}>{option.label()}</option>
                        })}
                    </select>
                </div>
                <div class="row g-2 mb-3">
                    <div class="col">
                        <label for="exportStart" class="form-label">{"Du"}</label>
                        <input id="exportStart" type="date" class="form-control" value={(*start).clone()} onchange={on_start_change} />
                    </div>
                    <div class="col">
                        <label for="exportEnd" class="form-label">{"Au"}</label>
                        <input id="exportEnd" type="date" class="form-control" value={(*end).clone()} onchange={on_end_change} />
                    </div>
                </div>
                {preview}
                <div class="repas-modal-buttons">
                    <button type="submit" class="btn btn-primary">{"Exporter"}</button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel}>{"Annuler"}</button>
                </div>
            </form>
        </Modal>
    }
}
