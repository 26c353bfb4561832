pub mod use_clock;
pub mod use_periodic_refresh;
pub mod use_settings;
pub mod use_user_reservations;
pub mod use_users;
pub mod use_week;
pub mod use_week_reservations;
