use gloo::net::http::{Request, Response};
use shared::{
    ApiError, CreateBookingRequest, ErrorDetail, LoginResponse, MySlotsResponse,
    PublicSlotsResponse, SyncResponse, UserSettings,
};

use crate::services::auth::AuthSession;

/// API client for the scheduling backend. One async method per endpoint;
/// every authenticated call takes the injected [`AuthSession`] rather than
/// reading the token from a global.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL
    pub fn new() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// `GET /api/auth/login` — fetch the authorization URL to redirect to
    pub async fn initiate_login(&self) -> Result<LoginResponse, ApiError> {
        let url = format!("{}/api/auth/login", self.base_url);
        let response = Request::get(&url).send().await.map_err(connectivity)?;
        parse_ok(response).await
    }

    /// `GET /api/slots/public/{token}` — the anonymous booking page's data.
    /// 404 means the page does not exist, terminal for that view.
    pub async fn fetch_public_slots(&self, token: &str) -> Result<PublicSlotsResponse, ApiError> {
        let url = format!("{}/api/slots/public/{}", self.base_url, token);
        let response = Request::get(&url).send().await.map_err(connectivity)?;
        if response.status() == 404 {
            return Err(ApiError::NotFound);
        }
        parse_ok(response).await
    }

    /// `POST /api/bookings` — submit a booking for a public slot. The
    /// confirmation text is composed client-side from the selected slot.
    pub async fn create_booking(&self, request: &CreateBookingRequest) -> Result<(), ApiError> {
        let url = format!("{}/api/bookings", self.base_url);
        let response = Request::post(&url)
            .json(request)
            .map_err(connectivity)?
            .send()
            .await
            .map_err(connectivity)?;
        if response.ok() {
            Ok(())
        } else {
            Err(rejection(response).await)
        }
    }

    /// `GET /api/user/me/slots` — the owner's own slots, booked included
    pub async fn fetch_my_slots(&self, auth: &AuthSession) -> Result<MySlotsResponse, ApiError> {
        let url = format!("{}/api/user/me/slots", self.base_url);
        let response = Request::get(&url)
            .header("Authorization", &bearer(auth)?)
            .send()
            .await
            .map_err(connectivity)?;
        parse_ok(response).await
    }

    /// `POST /api/user/me/slots/generate` — ask the backend to resync the
    /// calendar and regenerate slots
    pub async fn trigger_sync(&self, auth: &AuthSession) -> Result<SyncResponse, ApiError> {
        let url = format!("{}/api/user/me/slots/generate", self.base_url);
        let response = Request::post(&url)
            .header("Authorization", &bearer(auth)?)
            .send()
            .await
            .map_err(connectivity)?;
        parse_ok(response).await
    }

    /// `GET /api/user/me/settings`
    pub async fn fetch_settings(&self, auth: &AuthSession) -> Result<UserSettings, ApiError> {
        let url = format!("{}/api/user/me/settings", self.base_url);
        let response = Request::get(&url)
            .header("Authorization", &bearer(auth)?)
            .send()
            .await
            .map_err(connectivity)?;
        parse_ok(response).await
    }

    /// `PUT /api/user/me/settings` — returns the server's echo, which
    /// replaces the local editable copy
    pub async fn save_settings(
        &self,
        auth: &AuthSession,
        settings: &UserSettings,
    ) -> Result<UserSettings, ApiError> {
        let url = format!("{}/api/user/me/settings", self.base_url);
        let response = Request::put(&url)
            .header("Authorization", &bearer(auth)?)
            .json(settings)
            .map_err(connectivity)?
            .send()
            .await
            .map_err(connectivity)?;
        parse_ok(response).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn bearer(auth: &AuthSession) -> Result<String, ApiError> {
    auth.get()
        .map(|token| format!("Bearer {}", token))
        .ok_or_else(|| ApiError::Rejected("You are signed out. Please log in again.".to_string()))
}

fn connectivity(err: impl std::fmt::Display) -> ApiError {
    ApiError::Connectivity(err.to_string())
}

async fn parse_ok<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(rejection(response).await);
    }
    response.json::<T>().await.map_err(connectivity)
}

/// Non-2xx body: surface the backend's structured `detail` verbatim when
/// present, else a generic connectivity error.
async fn rejection(response: Response) -> ApiError {
    let status = response.status();
    match response.json::<ErrorDetail>().await {
        Ok(body) => ApiError::Rejected(body.detail),
        Err(_) => ApiError::Connectivity(format!("Unexpected server response ({})", status)),
    }
}
