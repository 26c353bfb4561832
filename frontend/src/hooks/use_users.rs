use shared::users::sorted_by_name;
use shared::{User, UserForm};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
}

/// Create when `id` is None, otherwise update that user
#[derive(Clone, Debug, PartialEq)]
pub struct SaveUser {
    pub id: Option<i64>,
    pub form: UserForm,
    /// Emitted once the server accepted the change
    pub on_saved: Callback<()>,
}

pub struct UseUsersResult {
    pub state: UsersState,
    pub actions: UseUsersActions,
}

#[derive(Clone, PartialEq)]
pub struct UseUsersActions {
    pub refresh: Callback<()>,
    pub save: Callback<SaveUser>,
    pub delete: Callback<User>,
}

fn load_users(api_client: ApiClient, state: UseStateHandle<UsersState>) {
    let mut loading = (*state).clone();
    loading.loading = true;
    state.set(loading);

    spawn_local(async move {
        match api_client.list_users().await {
            Ok(users) => state.set(UsersState {
                users: sorted_by_name(&users),
                ..UsersState::default()
            }),
            Err(e) => {
                Logger::error_with_component("users", &format!("Failed to load users: {}", e));
                state.set(UsersState {
                    error: Some(format!("Erreur lors du chargement des utilisateurs: {}", e)),
                    ..UsersState::default()
                });
            }
        }
    });
}

/// User directory for the manager; loads when `active` turns true
#[hook]
pub fn use_users(api_client: &ApiClient, active: bool) -> UseUsersResult {
    let state = use_state(UsersState::default);

    use_effect_with(active, {
        let api_client = api_client.clone();
        let state = state.clone();
        move |active| {
            if *active {
                load_users(api_client, state);
            }
            || ()
        }
    });

    let refresh = {
        let api_client = api_client.clone();
        let state = state.clone();
        use_callback((), move |_: (), _| {
            load_users(api_client.clone(), state.clone());
        })
    };

    let save = {
        let api_client = api_client.clone();
        let state = state.clone();
        use_callback((*state).clone(), move |request: SaveUser, current| {
            let payload = match request.form.to_payload(request.id.is_none()) {
                Ok(payload) => payload,
                Err(e) => {
                    state.set(UsersState {
                        error: Some(e.to_string()),
                        ..current.clone()
                    });
                    return;
                }
            };

            state.set(UsersState {
                saving: true,
                error: None,
                ..current.clone()
            });

            let api_client = api_client.clone();
            let state = state.clone();
            let current = current.clone();
            spawn_local(async move {
                let result = match request.id {
                    Some(id) => api_client.update_user(id, &payload).await,
                    None => api_client.add_user(&payload).await,
                };
                match result {
                    Ok(_) => {
                        Logger::info_with_component(
                            "users",
                            &format!("Saved user {}", payload.username),
                        );
                        request.on_saved.emit(());
                        load_users(api_client, state);
                    }
                    Err(e) => {
                        Logger::error_with_component("users", &format!("Failed to save user: {}", e));
                        state.set(UsersState {
                            saving: false,
                            error: Some(format!("Erreur lors de l'enregistrement: {}", e)),
                            ..current
                        });
                    }
                }
            });
        })
    };

    let delete = {
        let api_client = api_client.clone();
        let state = state.clone();
        use_callback((*state).clone(), move |user: User, current| {
            let question = format!("Supprimer l'utilisateur {} ?", user.name);
            if !gloo::dialogs::confirm(&question) {
                return;
            }

            let api_client = api_client.clone();
            let state = state.clone();
            let current = current.clone();
            spawn_local(async move {
                match api_client.delete_user(user.id).await {
                    Ok(()) => load_users(api_client, state),
                    Err(e) => {
                        Logger::error_with_component("users", &format!("Failed to delete user: {}", e));
                        state.set(UsersState {
                            error: Some(format!("Erreur lors de la suppression: {}", e)),
                            ..current
                        });
                    }
                }
            });
        })
    };

    UseUsersResult {
        state: (*state).clone(),
        actions: UseUsersActions {
            refresh,
            save,
            delete,
        },
    }
}
