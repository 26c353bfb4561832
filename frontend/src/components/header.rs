use web_sys::MouseEvent;
use yew::prelude::*;

/// Buttons offered in the manager header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderAction {
    Users,
    Export,
    Settings,
}

impl HeaderAction {
    pub const ALL: [HeaderAction; 3] = [HeaderAction::Users, HeaderAction::Export, HeaderAction::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            HeaderAction::Users => "Utilisateurs",
            HeaderAction::Export => "Exporter",
            HeaderAction::Settings => "Paramètres",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub title: AttrValue,
    #[prop_or_default]
    pub user_name: Option<String>,
    /// Manager pages pass the buttons they handle; the user page passes none
    #[prop_or_default]
    pub actions: Vec<HeaderAction>,
    #[prop_or_default]
    pub on_action: Callback<HeaderAction>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container d-flex justify-content-between align-items-center">
                <h1>{props.title.clone()}</h1>
                <div class="header-right">
                    if let Some(name) = &props.user_name {
                        <span class="header-user">{name.clone()}</span>
                    }
                    {for props.actions.iter().map(|action| {
                        let action = *action;
                        let on_action = props.on_action.clone();
                        let onclick = Callback::from(move |_: MouseEvent| on_action.emit(action));
                        html! {
                            <button type="button" class="btn btn-outline-light btn-sm ms-2" {onclick}>
                                {action.label()}
                            </button>
                        }
                    })}
                    <a class="btn btn-outline-light btn-sm ms-2" href="/user-profile">{"Profil"}</a>
                    <a class="btn btn-outline-light btn-sm ms-2" href="/user-logout">{"Déconnexion"}</a>
                </div>
            </div>
        </header>
    }
}
