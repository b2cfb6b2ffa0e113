//! Doctor-side consultation endpoints.

use axum::extract::{Path, State};
use axum::{Extension, Json};

use super::parse_report_id;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::models::Report;
use crate::service::Meeting;

/// `GET /api/consultations`: requested reports, oldest first.
pub async fn queue(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
) -> Result<Json<Vec<Report>>, ApiError> {
    Ok(Json(ctx.service.consultation_queue(&caller.user)?))
}

/// `POST /api/consultations/:id/open`: mark reviewed and open the chat.
pub async fn open(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    let id = parse_report_id(&id)?;
    Ok(Json(ctx.service.open_chat(&caller.user, id)?))
}

/// `POST /api/consultations/:id/meeting`: create a video-call link.
pub async fn meeting(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<Json<Meeting>, ApiError> {
    let id = parse_report_id(&id)?;
    Ok(Json(ctx.service.create_meeting(&caller.user, id)?))
}
