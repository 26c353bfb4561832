use shared::{User, UserForm, KNOWN_STATUSES};
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use super::modal::{Modal, ModalMessages};
use crate::hooks::use_users::{use_users, SaveUser};
use crate::services::api::ApiClient;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Editing {
    New,
    Existing(i64),
}

#[derive(Properties, PartialEq)]
pub struct UsersModalProps {
    pub is_open: bool,
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
    /// The user list changed; the add-reservation dropdown must refresh
    pub on_changed: Callback<()>,
}

fn text_field(form: &UseStateHandle<UserForm>, update: fn(&mut UserForm, String)) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let mut next = (*form).clone();
        update(&mut next, input.value());
        form.set(next);
    })
}

#[function_component(UsersModal)]
pub fn users_modal(props: &UsersModalProps) -> Html {
    let users = use_users(&props.api_client, props.is_open);
    let editing = use_state(|| Option::<Editing>::None);
    let form = use_state(UserForm::blank);

    use_effect_with(props.is_open, {
        let editing = editing.clone();
        move |is_open| {
            if *is_open {
                editing.set(None);
            }
            || ()
        }
    });

    let on_new = {
        let editing = editing.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(UserForm::blank());
            editing.set(Some(Editing::New));
        })
    };

    let on_edit = {
        let editing = editing.clone();
        let form = form.clone();
        Callback::from(move |user: User| {
            form.set(UserForm::from_user(&user));
            editing.set(Some(Editing::Existing(user.id)));
        })
    };

    let on_back = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(None))
    };

    let on_status_change = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.set(UserForm {
                status: select.value(),
                ..(*form).clone()
            });
        })
    };

    let on_submit = {
        let save = users.actions.save.clone();
        let editing = editing.clone();
        let form = form.clone();
        let on_changed = props.on_changed.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(mode) = *editing else {
                return;
            };
            let on_saved = {
                let editing = editing.clone();
                let on_changed = on_changed.clone();
                Callback::from(move |_| {
                    editing.set(None);
                    on_changed.emit(());
                })
            };
            save.emit(SaveUser {
                id: match mode {
                    Editing::New => None,
                    Editing::Existing(id) => Some(id),
                },
                form: (*form).clone(),
                on_saved,
            });
        })
    };

    let state = &users.state;

    let body = match *editing {
        None => html! {
            <>
                <div class="d-flex justify-content-end mb-3">
                    <button type="button" class="btn btn-primary btn-sm" onclick={on_new}>{"Nouvel utilisateur"}</button>
                </div>
                if state.loading {
                    <p class="text-muted">{"Chargement..."}</p>
                } else if state.users.is_empty() {
                    <p class="text-muted">{"Aucun utilisateur."}</p>
                } else {
                    <table class="table table-striped">
                        <thead>
                            <tr><th>{"ID"}</th><th>{"Nom"}</th><th>{"Identifiant"}</th><th>{"Status"}</th><th>{"Actions"}</th></tr>
                        </thead>
                        <tbody>
                            {for state.users.iter().map(|user| {
                                let on_edit_click = {
                                    let on_edit = on_edit.clone();
                                    let user = user.clone();
                                    Callback::from(move |_: MouseEvent| on_edit.emit(user.clone()))
                                };
                                let on_delete_click = {
                                    let delete = users.actions.delete.clone();
                                    let user = user.clone();
                                    Callback::from(move |_: MouseEvent| delete.emit(user.clone()))
                                };
                                html! {
                                    <tr key={user.id}>
                                        <td>{user.user_id.clone().unwrap_or_default()}</td>
                                        <td>{user.name.clone()}</td>
                                        <td>{user.username.clone()}</td>
                                        <td>{user.status.clone()}</td>
                                        <td>
                                            <button type="button" class="btn btn-sm btn-outline-primary me-2" onclick={on_edit_click}>{"Modifier"}</button>
                                            <button type="button" class="btn btn-sm btn-outline-danger" onclick={on_delete_click}>{"Supprimer"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                }
            </>
        },
        Some(mode) => {
            let creating = mode == Editing::New;
            html! {
                <form onsubmit={on_submit}>
                    <div class="mb-3">
                        <label for="userName" class="form-label">{"Nom"}</label>
                        <input id="userName" type="text" class="form-control" value={form.name.clone()}
                            oninput={text_field(&form, |f, v| f.name = v)} />
                    </div>
                    <div class="mb-3">
                        <label for="userUsername" class="form-label">{"Nom d'utilisateur"}</label>
                        <input id="userUsername" type="text" class="form-control" value={form.username.clone()}
                            oninput={text_field(&form, |f, v| f.username = v)} />
                    </div>
                    <div class="mb-3">
                        <label for="userEmail" class="form-label">{"Email"}</label>
                        <input id="userEmail" type="email" class="form-control" value={form.email.clone()}
                            oninput={text_field(&form, |f, v| f.email = v)} />
                    </div>
                    <div class="mb-3">
                        <label for="userCode" class="form-label">{"ID"}</label>
                        <input id="userCode" type="text" class="form-control" value={form.user_id.clone()}
                            oninput={text_field(&form, |f, v| f.user_id = v)} />
                    </div>
                    <div class="mb-3">
                        <label for="userStatus" class="form-label">{"Status"}</label>
                        <select id="userStatus" class="form-select" onchange={on_status_change}>
                            {for KNOWN_STATUSES.iter().map(|status| html! {
                                <option value={*status} selected={form.status == *status}>{*status}</option>
                            })}
                        </select>
                    </div>
                    <div class="mb-3">
                        <label for="userPassword" class="form-label">
                            {if creating { "Mot de passe" } else { "Nouveau mot de passe (laisser vide pour ne pas changer)" }}
                        </label>
                        <input id="userPassword" type="password" class="form-control" value={form.password.clone()}
                            oninput={text_field(&form, |f, v| f.password = v)} />
                    </div>
                    <div class="repas-modal-buttons">
                        <button type="submit" class="btn btn-primary" disabled={state.saving}>
                            {if state.saving { "Enregistrement..." } else { "Enregistrer" }}
                        </button>
                        <button type="button" class="btn btn-secondary" onclick={on_back} disabled={state.saving}>
                            {"Retour"}
                        </button>
                    </div>
                </form>
            }
        }
    };

    let title = match *editing {
        None => "Utilisateurs",
        Some(Editing::New) => "Nouvel utilisateur",
        Some(Editing::Existing(_)) => "Modifier l'utilisateur",
    };

    html! {
        <Modal is_open={props.is_open} {title} on_close={props.on_close.clone()} class={classes!("repas-modal-wide")}>
            <ModalMessages error={state.error.clone()} />
            {body}
        </Modal>
    }
}
