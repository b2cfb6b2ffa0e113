//! Notification bell endpoints.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, UserContext};
use crate::models::Notification;

#[derive(Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
    pub unread: usize,
}

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub marked: usize,
}

/// `GET /api/notifications`: newest first.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let notifications = ctx.service.notifications(&caller.user)?;
    let unread = notifications.iter().filter(|n| !n.read).count();
    Ok(Json(NotificationsResponse {
        notifications,
        unread,
    }))
}

/// `POST /api/notifications/read`: mark all of the caller's as read.
pub async fn mark_read(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let marked = ctx.service.mark_notifications_read(&caller.user)?;
    Ok(Json(MarkReadResponse { marked }))
}
