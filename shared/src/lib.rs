use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod grid;
pub mod session;
pub mod settings;

/// One bookable (or already booked) interval, as served by the backend.
///
/// `start_time`/`end_time` are absolute instants; the backend guarantees
/// `start_time < end_time`. Slot status is owned by the backend — the client
/// never mutates it locally, it refetches after a booking instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// Opaque backend-assigned identifier
    pub slot_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
}

/// Working-hours window and slot length, owned by the backend.
///
/// The client keeps a local editable copy while a save is in flight and
/// discards it in favour of the server's echo on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub working_hours: WorkingHours,
    /// Minutes per slot; one of [`SLOT_DURATION_CHOICES`]
    pub slot_duration: u32,
}

/// Time-of-day strings in "HH:MM" 24-hour form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: String,
    pub end: String,
}

/// Slot lengths the settings form offers
pub const SLOT_DURATION_CHOICES: [u32; 4] = [15, 30, 45, 60];

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours {
                start: "09:00".to_string(),
                end: "18:00".to_string(),
            },
            slot_duration: 30,
        }
    }
}

/// Response of `GET /api/slots/public/{token}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSlotsResponse {
    pub user_name: String,
    pub slots: Vec<Slot>,
}

/// Response of `GET /api/user/me/slots`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MySlotsResponse {
    pub slots: Vec<Slot>,
}

/// Body of `POST /api/bookings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub public_url_token: String,
    pub slot_id: String,
    pub booker_name: String,
    pub booker_email: String,
}

/// Response of `GET /api/auth/login`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub authorization_url: String,
}

/// Response of `POST /api/user/me/slots/generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub message: String,
}

/// Structured error body the backend attaches to non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// What went wrong talking to the backend.
///
/// Validation problems (missing name/email, no slot selected) never reach
/// this type — they are caught in [`session::BookingSession`] before any
/// request is issued.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The booking page token resolves to nothing; terminal for that view
    #[error("This booking page does not exist.")]
    NotFound,
    /// Transport failure or an unexpected status with no structured body
    #[error("Could not connect to the server.")]
    Connectivity(String),
    /// The backend rejected the request with a human-readable detail,
    /// surfaced verbatim (e.g. "slot no longer available")
    #[error("{0}")]
    Rejected(String),
}
