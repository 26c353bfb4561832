pub mod day_details_modal;
pub mod export_modal;
pub mod header;
pub mod manager_calendar;
pub mod manager_dashboard;
pub mod modal;
pub mod reservation_modal;
pub mod settings_modal;
pub mod user_calendar;
pub mod user_dashboard;
pub mod users_modal;
pub mod week_navigator;
