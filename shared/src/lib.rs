use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod day_details;
pub mod deadline;
pub mod export;
pub mod refresh;
pub mod toggle;
pub mod users;
pub mod volunteer;
pub mod week;

pub use day_details::{display_status, status_stats, unique_statuses, DayFilter, StatusFilter};
pub use deadline::{DayAccess, DeadlineParseError, DeadlineTime};
pub use export::{ExportFormat, ExportRange, ExportRangeError, StatsRequests};
pub use refresh::{FetchOrigin, FetchTicket, RefreshOutcome, RefreshTracker};
pub use toggle::{check_toggle, ToggleRejection};
pub use users::{UserForm, UserFormError};
pub use volunteer::VolunteerPolicy;
pub use week::Week;

/// Display label used for a reservation flagged as volunteer, whatever the user's role
pub const VOLUNTEER_LABEL: &str = "Bénévole";

/// Role choices offered when creating or editing a user
pub const KNOWN_STATUSES: [&str; 4] = ["Moniteur", "Bénévole", "Aide Moniteur", "Bar"];

/// Common shape of every JSON reply: `{success, error?}` plus a payload.
///
/// Implemented by each response type so the client can turn a
/// `{success: false}` reply into a server-reported error at the boundary.
pub trait ApiReply {
    fn success(&self) -> bool;
    fn error(&self) -> Option<&str>;
}

macro_rules! api_reply {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ApiReply for $ty {
                fn success(&self) -> bool {
                    self.success
                }

                fn error(&self) -> Option<&str> {
                    self.error.as_deref()
                }
            }
        )*
    };
}

/// Application settings singleton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Daily cutoff, "HH:MM"
    pub deadline_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSettingsResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSettingsRequest {
    pub deadline_time: String,
}

/// The current user's reservation for one day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDayReservation {
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub benevole: bool,
}

/// Reservations of the logged-in user, keyed by "YYYY-MM-DD"
pub type UserReservations = BTreeMap<String, UserDayReservation>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReservationsResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub reservations: UserReservations,
    /// Role of the logged-in user, used for volunteer eligibility
    #[serde(default)]
    pub user_status: Option<String>,
}

/// One person's reservation as seen by a manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekReservation {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Display code of the user, not the database id
    #[serde(default)]
    pub user_user_id: Option<String>,
    pub user_name: String,
    pub status: String,
    #[serde(default)]
    pub benevole: bool,
}

/// Whole-week reservations, one list per "YYYY-MM-DD" key
pub type WeekReservations = BTreeMap<String, Vec<WeekReservation>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekReservationsResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub reservations: WeekReservations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleReservationRequest {
    pub date: String,
    pub reserved: bool,
    pub benevole: bool,
}

/// Volunteer flag change for the logged-in user's own reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReservationStatusRequest {
    pub date: String,
    pub benevole: bool,
}

/// Volunteer flag change for a reservation addressed by id (manager)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReservationByIdRequest {
    pub benevole: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub date: String,
    pub user_id: i64,
    pub benevole: bool,
}

/// Reply carrying no payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// A registered user as returned by the manager API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub status: String,
}

/// Create/update body; the password is write-only and omitted when unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub username: String,
    pub email: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Headcounts for guests not tied to a registered user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    #[serde(default)]
    pub eds: u32,
    #[serde(default)]
    pub autre: u32,
}

impl Extras {
    pub const EDS_LABEL: &'static str = "EDS";
    pub const AUTRE_LABEL: &'static str = "Autre";

    pub fn total(&self) -> u32 {
        self.eds.saturating_add(self.autre)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtrasResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub extras: Extras,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExtrasRequest {
    pub date: String,
    pub eds: u32,
    pub autre: u32,
}

/// Aggregated counts over a date range, shown before exporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationStatsResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub by_status: BTreeMap<String, u32>,
    #[serde(default)]
    pub by_date: BTreeMap<String, u32>,
}

api_reply!(
    GetSettingsResponse,
    UserReservationsResponse,
    WeekReservationsResponse,
    BasicResponse,
    UsersResponse,
    UserResponse,
    ExtrasResponse,
    ReservationStatsResponse,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_reservations_default_missing_fields() {
        let body = r#"{"success": true, "reservations": {"2026-10-12": {"reserved": true}}}"#;
        let parsed: UserReservationsResponse = serde_json::from_str(body).unwrap();

        assert!(parsed.success());
        assert_eq!(parsed.user_status, None);
        let day = &parsed.reservations["2026-10-12"];
        assert!(day.reserved);
        assert!(!day.benevole);
    }

    #[test]
    fn test_failure_reply_exposes_error() {
        let body = r#"{"success": false, "error": "Cannot modify reservations for past dates"}"#;
        let parsed: BasicResponse = serde_json::from_str(body).unwrap();

        assert!(!parsed.success());
        assert_eq!(parsed.error(), Some("Cannot modify reservations for past dates"));
    }

    #[test]
    fn test_week_reservations_parse() {
        let body = r#"{
            "success": true,
            "reservations": {
                "2026-10-13": [
                    {"id": 7, "user_name": "Alice", "status": "Moniteur", "benevole": true, "user_user_id": "M-01"},
                    {"id": 8, "user_name": "Bob", "status": "Bar"}
                ]
            }
        }"#;
        let parsed: WeekReservationsResponse = serde_json::from_str(body).unwrap();

        let day = &parsed.reservations["2026-10-13"];
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].user_user_id.as_deref(), Some("M-01"));
        assert!(day[0].benevole);
        assert!(!day[1].benevole);
    }

    #[test]
    fn test_user_payload_skips_empty_password() {
        let payload = UserPayload {
            name: "Alice Martin".to_string(),
            username: "alice".to_string(),
            email: String::new(),
            status: "Moniteur".to_string(),
            user_id: None,
            password: None,
        };
        let json = serde_json::to_value(&payload).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("user_id").is_none());
        assert_eq!(json["status"], "Moniteur");
    }

    #[test]
    fn test_extras_total() {
        let extras = Extras { eds: 3, autre: 2 };
        assert_eq!(extras.total(), 5);
        assert_eq!(Extras::default().total(), 0);
    }

    #[test]
    fn test_extras_total_saturates() {
        let extras = Extras { eds: u32::MAX, autre: 1 };
        assert_eq!(extras.total(), u32::MAX);
    }
}
