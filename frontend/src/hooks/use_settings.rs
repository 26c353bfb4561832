use shared::DeadlineTime;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct SettingsState {
    pub deadline: DeadlineTime,
    pub loaded: bool,
}

pub struct UseSettingsResult {
    pub state: SettingsState,
    /// Apply a deadline saved by the manager without refetching
    pub set_deadline: Callback<DeadlineTime>,
}

/// Fetch the deadline once per page load; `fallback` applies until then or on failure
#[hook]
pub fn use_settings(api_client: &ApiClient, fallback: DeadlineTime) -> UseSettingsResult {
    let state = use_state(|| SettingsState {
        deadline: fallback,
        loaded: false,
    });

    use_effect_with((), {
        let api_client = api_client.clone();
        let state = state.clone();
        move |_| {
            spawn_local(async move {
                match api_client.get_settings().await {
                    Ok(settings) => match settings.deadline_time.parse::<DeadlineTime>() {
                        Ok(deadline) => {
                            Logger::debug_with_component(
                                "settings",
                                &format!("Deadline set to {}", deadline.label()),
                            );
                            state.set(SettingsState { deadline, loaded: true });
                        }
                        Err(e) => {
                            Logger::error_with_component(
                                "settings",
                                &format!("Invalid deadline_time {:?}: {}", settings.deadline_time, e),
                            );
                            state.set(SettingsState { deadline: fallback, loaded: true });
                        }
                    },
                    Err(e) => {
                        Logger::error_with_component("settings", &format!("Failed to load settings: {}", e));
                        state.set(SettingsState { deadline: fallback, loaded: true });
                    }
                }
            });
            || ()
        }
    });

    let set_deadline = {
        let state = state.clone();
        use_callback((), move |deadline: DeadlineTime, _| {
            state.set(SettingsState { deadline, loaded: true });
        })
    };

    UseSettingsResult {
        state: (*state).clone(),
        set_deadline,
    }
}
