use yew::prelude::*;

use super::header::Header;
use super::user_calendar::UserCalendar;
use super::week_navigator::WeekNavigator;
use crate::hooks::use_clock::use_clock;
use crate::hooks::use_settings::use_settings;
use crate::hooks::use_user_reservations::use_user_reservations;
use crate::hooks::use_week::use_week;
use crate::services::api::ApiClient;
use crate::services::config::AppConfig;

#[derive(Properties, PartialEq)]
pub struct UserDashboardProps {
    pub config: AppConfig,
    pub api_client: ApiClient,
}

/// Page for regular users: their own reservations, one week at a time
#[function_component(UserDashboard)]
pub fn user_dashboard(props: &UserDashboardProps) -> Html {
    let settings = use_settings(&props.api_client, props.config.fallback_deadline());
    let week = use_week();
    let now = use_clock(props.config.clock_tick_ms);
    let reservations = use_user_reservations(&props.api_client, week.week, settings.state.deadline);

    let volunteer_eligible = props
        .config
        .volunteer_policy()
        .is_eligible(reservations.state.user_status.as_deref());

    html! {
        <>
            <Header title="Mes réservations de repas" user_name={props.config.user_name.clone()} />
            <main class="container mt-4">
                <WeekNavigator week={week.week} actions={week.actions.clone()} />
                if settings.state.loaded {
                    <p class="text-muted small deadline-hint">
                        {format!("Réservations pour le jour même jusqu'à {}.", settings.state.deadline.label())}
                    </p>
                }
                <UserCalendar
                    week={week.week}
                    {now}
                    deadline={settings.state.deadline}
                    state={reservations.state.clone()}
                    {volunteer_eligible}
                    actions={reservations.actions.clone()}
                />
            </main>
        </>
    }
}
