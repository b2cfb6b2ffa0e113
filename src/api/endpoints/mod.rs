//! API endpoint handlers.
//!
//! Each module corresponds to one screen or feature. Handlers stay thin:
//! parse the request, call `HealthService`, map the result.

pub mod assistant;
pub mod auth;
pub mod chat;
pub mod consultations;
pub mod health;
pub mod notifications;
pub mod reports;

use uuid::Uuid;

use crate::api::error::ApiError;

/// Parse a `:id` path segment.
pub(crate) fn parse_report_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid report ID".into()))
}
