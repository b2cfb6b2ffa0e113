//! AI assistant endpoints.
//!
//! The assistant always answers: oracle failures come back as the fallback
//! text with a 200, never as an error status.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use super::parse_report_id;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, UserContext};
use crate::models::AssistantTurn;

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub reply: AssistantTurn,
}

/// `GET /api/reports/:id/assistant`: conversation so far, greeting first.
pub async fn history(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AssistantTurn>>, ApiError> {
    let id = parse_report_id(&id)?;
    Ok(Json(ctx.service.assistant_history(&caller.user, id)?))
}

/// `POST /api/reports/:id/assistant`: ask a follow-up question.
pub async fn ask(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let id = parse_report_id(&id)?;
    let reply = ctx
        .service
        .ask_assistant(&caller.user, id, &req.question)
        .await?;
    Ok(Json(AskResponse { reply }))
}
