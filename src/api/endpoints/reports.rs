//! Patient assessment endpoints.
//!
//! - `POST /api/reports`: submit the health form, get the scored report
//! - `GET /api/reports`: own reports, newest first
//! - `GET /api/reports/latest`: most recent own report, or `null`
//! - `GET /api/reports/:id`: one report (owner, or a doctor once requested)
//! - `POST /api/reports/:id/consultation`: ask for a doctor

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::parse_report_id;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::types::{ApiContext, UserContext};
use crate::models::{HealthForm, Report};

pub async fn submit(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
    ApiJson(form): ApiJson<HealthForm>,
) -> Result<(StatusCode, Json<Report>), ApiError> {
    let report = ctx.service.submit_assessment(&caller.user, &form).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
) -> Result<Json<Vec<Report>>, ApiError> {
    Ok(Json(ctx.service.patient_reports(&caller.user)?))
}

pub async fn latest(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
) -> Result<Json<Option<Report>>, ApiError> {
    Ok(Json(ctx.service.latest_report(&caller.user)?))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    let id = parse_report_id(&id)?;
    Ok(Json(ctx.service.report_for(&caller.user, id)?))
}

pub async fn request_consultation(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<UserContext>,
    Path(id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    let id = parse_report_id(&id)?;
    Ok(Json(ctx.service.request_consultation(&caller.user, id)?))
}
