use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::export::{ExportFormat, ExportRange};
use shared::week::format_api_date;
use shared::{
    ApiReply, BasicResponse, CreateReservationRequest, Extras, ExtrasResponse, GetSettingsResponse,
    ReservationStatsResponse, Settings, ToggleReservationRequest, UpdateExtrasRequest,
    UpdateReservationByIdRequest, UpdateReservationStatusRequest, UpdateSettingsRequest, User,
    UserPayload, UserReservationsResponse, UserResponse, UsersResponse, Week, WeekReservations,
    WeekReservationsResponse,
};
use chrono::NaiveDate;
use thiserror::Error;

use super::config::AppConfig;

const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Server error {status}: {body}")]
    Http { status: u16, body: String },
    /// `{success: false}` with the server's message
    #[error("{0}")]
    Server(String),
}

/// API client for the reservation server
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Same-origin client without CSRF token
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
            csrf_token: None,
        }
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            csrf_token: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            csrf_token: config.csrf_token(),
            ..Self::with_base_url(config.api_base_url.clone())
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_settings(&self) -> Result<Settings, ApiError> {
        let reply: GetSettingsResponse = self.get("/api/get-settings").await?;
        reply
            .settings
            .ok_or_else(|| ApiError::Parse("missing settings".to_string()))
    }

    pub async fn update_settings(&self, request: &UpdateSettingsRequest) -> Result<(), ApiError> {
        let _: BasicResponse = self.post("/manager/api/settings/update", request).await?;
        Ok(())
    }

    /// Reservations of the logged-in user for `week`
    pub async fn get_user_reservations(&self, week: Week) -> Result<UserReservationsResponse, ApiError> {
        self.get(&format!("/api/user-reservations?start_date={}", week.start_param()))
            .await
    }

    /// Everybody's reservations for `week` (manager)
    pub async fn get_week_reservations(&self, week: Week) -> Result<WeekReservations, ApiError> {
        let reply: WeekReservationsResponse = self
            .get(&format!("/api/week-reservations?start_date={}", week.start_param()))
            .await?;
        Ok(reply.reservations)
    }

    pub async fn toggle_reservation(&self, request: &ToggleReservationRequest) -> Result<(), ApiError> {
        let _: BasicResponse = self.post("/api/toggle-reservation", request).await?;
        Ok(())
    }

    pub async fn update_reservation_status(
        &self,
        request: &UpdateReservationStatusRequest,
    ) -> Result<(), ApiError> {
        let _: BasicResponse = self.post("/api/update-reservation-status", request).await?;
        Ok(())
    }

    pub async fn update_reservation_status_by_id(&self, id: i64, benevole: bool) -> Result<(), ApiError> {
        let request = UpdateReservationByIdRequest { benevole };
        let _: BasicResponse = self
            .post(&format!("/api/update_reservation_status/{}", id), &request)
            .await?;
        Ok(())
    }

    pub async fn delete_reservation(&self, id: i64) -> Result<(), ApiError> {
        let _: BasicResponse = self.delete(&format!("/api/delete_reservation/{}", id)).await?;
        Ok(())
    }

    pub async fn create_reservation(&self, request: &CreateReservationRequest) -> Result<(), ApiError> {
        let _: BasicResponse = self.post("/manager/api/create_reservation", request).await?;
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let reply: UsersResponse = self.get("/manager/api/users").await?;
        Ok(reply.users)
    }

    pub async fn add_user(&self, payload: &UserPayload) -> Result<Option<User>, ApiError> {
        let reply: UserResponse = self.post("/manager/api/users/add", payload).await?;
        Ok(reply.user)
    }

    pub async fn update_user(&self, id: i64, payload: &UserPayload) -> Result<Option<User>, ApiError> {
        let reply: UserResponse = self
            .post(&format!("/manager/api/users/update/{}", id), payload)
            .await?;
        Ok(reply.user)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        let _: BasicResponse = self.delete(&format!("/manager/api/users/delete/{}", id)).await?;
        Ok(())
    }

    pub async fn reservation_stats(&self, range: &ExportRange) -> Result<ReservationStatsResponse, ApiError> {
        self.get(&format!("/manager/api/reservation-stats?{}", range.query()))
            .await
    }

    /// Download location; the browser handles the file response
    pub fn export_url(&self, range: &ExportRange, format: ExportFormat) -> String {
        self.url(&format!(
            "/manager/api/export_reservations?{}",
            range.export_query(format)
        ))
    }

    pub async fn get_extras(&self, date: NaiveDate) -> Result<Extras, ApiError> {
        let reply: ExtrasResponse = self
            .get(&format!("/manager/api/extra_reservations?date={}", format_api_date(date)))
            .await?;
        Ok(reply.extras)
    }

    pub async fn update_extras(&self, request: &UpdateExtrasRequest) -> Result<(), ApiError> {
        let _: BasicResponse = self.post("/manager/api/extra_reservations/update", request).await?;
        Ok(())
    }

    async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + ApiReply,
    {
        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read_reply(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned + ApiReply,
    {
        let request = self
            .with_csrf(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Serialize(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read_reply(response).await
    }

    async fn delete<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + ApiReply,
    {
        let response = self
            .with_csrf(Request::delete(&self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::read_reply(response).await
    }

    fn with_csrf(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.csrf_token {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    async fn read_reply<T>(response: Response) -> Result<T, ApiError>
    where
        T: DeserializeOwned + ApiReply,
    {
        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Http { status, body });
        }

        let reply = response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        check_reply(reply)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn `{success: false}` into a server-reported error
pub fn check_reply<T: ApiReply>(reply: T) -> Result<T, ApiError> {
    if reply.success() {
        Ok(reply)
    } else {
        let message = reply.error().unwrap_or("Erreur inconnue").to_string();
        Err(ApiError::Server(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_url_building() {
        let client = ApiClient::with_base_url("https://repas.example.org/".to_string());
        assert_eq!(
            client.url("/api/get-settings"),
            "https://repas.example.org/api/get-settings"
        );
        assert_eq!(ApiClient::new().url("/api/get-settings"), "/api/get-settings");
    }

    #[wasm_bindgen_test]
    fn test_export_url() {
        let range = ExportRange::parse("2026-10-12", "2026-10-18").unwrap();
        assert_eq!(
            ApiClient::new().export_url(&range, ExportFormat::Csv),
            "/manager/api/export_reservations?format=csv&start_date=2026-10-12&end_date=2026-10-18"
        );
    }

    #[wasm_bindgen_test]
    fn test_check_reply_maps_server_failure() {
        let ok = BasicResponse { success: true, error: None };
        assert!(check_reply(ok).is_ok());

        let failed = BasicResponse {
            success: false,
            error: Some("Reservation not found".to_string()),
        };
        assert_eq!(
            check_reply(failed),
            Err(ApiError::Server("Reservation not found".to_string()))
        );

        let silent = BasicResponse { success: false, error: None };
        assert_eq!(check_reply(silent), Err(ApiError::Server("Erreur inconnue".to_string())));
    }
}
