use chrono::NaiveDate;
use shared::week::format_api_date;
use shared::{DeadlineTime, WeekReservation};
use yew::prelude::*;

use super::day_details_modal::DayDetailsModal;
use super::export_modal::ExportModal;
use super::header::{Header, HeaderAction};
use super::manager_calendar::ManagerCalendar;
use super::reservation_modal::ReservationModal;
use super::settings_modal::SettingsModal;
use super::users_modal::UsersModal;
use super::week_navigator::WeekNavigator;
use crate::hooks::use_settings::use_settings;
use crate::hooks::use_users::use_users;
use crate::hooks::use_week::use_week;
use crate::hooks::use_week_reservations::use_week_reservations;
use crate::services::api::ApiClient;
use crate::services::config::AppConfig;
use crate::services::logging::Logger;

/// At most one modal is open at a time
#[derive(Clone, Debug, PartialEq)]
pub enum OpenModal {
    None,
    /// The day's reservations are copied when the modal opens
    DayDetails {
        date: NaiveDate,
        reservations: Vec<WeekReservation>,
    },
    AddReservation(NaiveDate),
    Users,
    Export,
    Settings,
}

#[derive(Properties, PartialEq)]
pub struct ManagerDashboardProps {
    pub config: AppConfig,
    pub api_client: ApiClient,
}

#[function_component(ManagerDashboard)]
pub fn manager_dashboard(props: &ManagerDashboardProps) -> Html {
    let api_client = &props.api_client;
    let settings = use_settings(api_client, props.config.fallback_deadline());
    let week = use_week();
    let reservations = use_week_reservations(api_client, week.week, props.config.poll_interval_ms);
    let directory = use_users(api_client, true);
    let modal = use_state(|| OpenModal::None);

    let close_modal = {
        let modal = modal.clone();
        Callback::from(move |_: ()| modal.set(OpenModal::None))
    };

    let on_open_day = {
        let modal = modal.clone();
        let current = reservations.state.reservations.clone();
        Callback::from(move |date: NaiveDate| {
            let day = current.get(&format_api_date(date)).cloned().unwrap_or_default();
            modal.set(OpenModal::DayDetails {
                date,
                reservations: day,
            });
        })
    };

    let on_add = {
        let modal = modal.clone();
        Callback::from(move |date: NaiveDate| modal.set(OpenModal::AddReservation(date)))
    };

    let on_header_action = {
        let modal = modal.clone();
        Callback::from(move |action: HeaderAction| {
            modal.set(match action {
                HeaderAction::Users => OpenModal::Users,
                HeaderAction::Export => OpenModal::Export,
                HeaderAction::Settings => OpenModal::Settings,
            })
        })
    };

    let on_created = {
        let modal = modal.clone();
        let reload = reservations.reload.clone();
        Callback::from(move |_: ()| {
            modal.set(OpenModal::None);
            reload.emit(());
        })
    };

    // Deletions inside the users modal also change the dropdown
    let close_users = {
        let modal = modal.clone();
        let refresh = directory.actions.refresh.clone();
        Callback::from(move |_: ()| {
            modal.set(OpenModal::None);
            refresh.emit(());
        })
    };

    let on_saved_deadline = {
        let set_deadline = settings.set_deadline.clone();
        Callback::from(move |deadline: DeadlineTime| {
            Logger::debug_with_component("manager", &format!("Deadline now {}", deadline.label()));
            set_deadline.emit(deadline);
        })
    };

    let (day_open, day_date, day_reservations) = match &*modal {
        OpenModal::DayDetails { date, reservations } => (true, Some(*date), reservations.clone()),
        _ => (false, None, Vec::new()),
    };
    let add_date = match &*modal {
        OpenModal::AddReservation(date) => Some(*date),
        _ => None,
    };

    html! {
        <>
            <Header
                title="Gestion des repas"
                user_name={props.config.user_name.clone()}
                actions={HeaderAction::ALL.to_vec()}
                on_action={on_header_action}
            />
            <main class="container-fluid mt-4">
                <WeekNavigator week={week.week} actions={week.actions.clone()} />
                <ManagerCalendar
                    week={week.week}
                    reservations={reservations.state.reservations.clone()}
                    loading={reservations.state.loading}
                    {on_open_day}
                    {on_add}
                />
            </main>

            <DayDetailsModal
                is_open={day_open}
                date={day_date}
                reservations={day_reservations}
                api_client={api_client.clone()}
                on_close={close_modal.clone()}
                on_changed={reservations.reload.clone()}
            />
            <ReservationModal
                is_open={add_date.is_some()}
                date={add_date}
                users={directory.state.users.clone()}
                api_client={api_client.clone()}
                on_close={close_modal.clone()}
                {on_created}
            />
            <UsersModal
                is_open={*modal == OpenModal::Users}
                api_client={api_client.clone()}
                on_close={close_users}
                on_changed={directory.actions.refresh.clone()}
            />
            <ExportModal
                is_open={*modal == OpenModal::Export}
                week={week.week}
                api_client={api_client.clone()}
                on_close={close_modal.clone()}
            />
            <SettingsModal
                is_open={*modal == OpenModal::Settings}
                deadline={settings.state.deadline}
                api_client={api_client.clone()}
                on_close={close_modal}
                on_saved={on_saved_deadline}
            />
        </>
    }
}
