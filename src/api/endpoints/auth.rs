//! Login, logout and the current user.
//!
//! `POST /api/auth/login`: Unprotected: exchange role credentials for a token
//! `POST /api/auth/logout`: Protected: revoke the calling token
//! `GET /api/me`: Protected: who am I, plus unread notification count

use axum::extract::State;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, UserContext};
use crate::auth;
use crate::models::{Role, User};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub logged_out: bool,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user: User,
    pub unread_notifications: usize,
}

pub async fn login(
    State(ctx): State<ApiContext>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = auth::authenticate(&req.username, &req.password, req.role)?;
    let token = ctx.sessions.issue(user.clone())?;
    Ok(Json(LoginResponse { token, user }))
}

pub async fn logout(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
) -> Result<Json<LogoutResponse>, ApiError> {
    let logged_out = ctx.sessions.revoke(&caller.token)?;
    Ok(Json(LogoutResponse { logged_out }))
}

pub async fn me(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
) -> Result<Json<MeResponse>, ApiError> {
    let unread_notifications = ctx.service.unread_count(&caller.user)?;
    Ok(Json(MeResponse {
        user: caller.user,
        unread_notifications,
    }))
}
