//! Doctor/patient chat endpoints.
//!
//! - `GET /api/reports/:id/messages`: transcript, oldest first
//! - `POST /api/reports/:id/messages`: post a message

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use super::parse_report_id;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, UserContext};
use crate::models::ChatMessage;

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let id = parse_report_id(&id)?;
    Ok(Json(ctx.service.messages(&caller.user, id)?))
}

pub async fn send(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), ApiError> {
    let id = parse_report_id(&id)?;
    let message = ctx.service.send_message(&caller.user, id, &req.text)?;
    Ok((StatusCode::CREATED, Json(message)))
}
