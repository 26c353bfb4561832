use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::manager_dashboard::ManagerDashboard;
use components::user_dashboard::UserDashboard;
use services::api::ApiClient;
use services::config::{AppConfig, Page};
use services::logging::Logger;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: AppConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let api_client = use_memo(props.config.clone(), |config| ApiClient::from_config(config));
    let api_client = (*api_client).clone();

    match props.config.page() {
        Page::Manager => html! { <ManagerDashboard config={props.config.clone()} {api_client} /> },
        Page::User => html! { <UserDashboard config={props.config.clone()} {api_client} /> },
    }
}

fn main() {
    let config = AppConfig::load();
    Logger::init(config.log_level);
    Logger::info_with_component("app", &format!("Starting {:?} page", config.page()));

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
