//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack on protected routes (outermost → innermost):
//! 1. Auth validator → 2. Access logger

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::service::HealthService;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer).
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn api_router(service: Arc<HealthService>) -> Router {
    build_router(ApiContext::new(service))
}

/// Build router from pre-constructed `ApiContext`.
///
/// Used by tests that need direct access to the session registry.
#[cfg(test)]
pub(crate) fn api_router_with_ctx(ctx: ApiContext) -> Router {
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    // Layers are applied from bottom (innermost) to top (outermost):
    //   Extension (outermost) → Auth → Access log (innermost) → Handler
    //
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let protected = Router::new()
        .route("/auth/logout", post(endpoints::auth::logout))
        .route("/me", get(endpoints::auth::me))
        .route(
            "/reports",
            get(endpoints::reports::list).post(endpoints::reports::submit),
        )
        .route("/reports/latest", get(endpoints::reports::latest))
        .route("/reports/:id", get(endpoints::reports::detail))
        .route(
            "/reports/:id/consultation",
            post(endpoints::reports::request_consultation),
        )
        .route(
            "/reports/:id/messages",
            get(endpoints::chat::list).post(endpoints::chat::send),
        )
        .route(
            "/reports/:id/assistant",
            get(endpoints::assistant::history).post(endpoints::assistant::ask),
        )
        .route("/consultations", get(endpoints::consultations::queue))
        .route(
            "/consultations/:id/open",
            post(endpoints::consultations::open),
        )
        .route(
            "/consultations/:id/meeting",
            post(endpoints::consultations::meeting),
        )
        .route("/notifications", get(endpoints::notifications::list))
        .route(
            "/notifications/read",
            post(endpoints::notifications::mark_read),
        )
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx.clone()));

    let unprotected = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/auth/login", post(endpoints::auth::login))
        .with_state(ctx);

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::assistant::{MockOracle, OracleError, ASSISTANT_DISCLAIMER, FALLBACK_RESPONSE};
    use crate::scoring::{MockPredictor, PredictionEstimator};
    use crate::store::DataStore;

    fn test_ctx_with_oracle(oracle: MockOracle) -> ApiContext {
        let service = HealthService::new(
            Arc::new(DataStore::new()),
            Box::new(PredictionEstimator::new(
                MockPredictor,
                std::time::Duration::ZERO,
            )),
            Arc::new(oracle),
        );
        ApiContext::new(Arc::new(service))
    }

    fn test_ctx() -> ApiContext {
        test_ctx_with_oracle(MockOracle::replying("Your readings suggest elevated risk."))
    }

    fn make_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn login(app: &Router, role: &str) -> String {
        let name = role.to_lowercase();
        let (status, json) = send(
            app,
            make_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "username": name, "password": name, "role": role })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        json["token"].as_str().unwrap().to_string()
    }

    fn high_risk_form() -> Value {
        json!({
            "age": "58",
            "gender": "Male",
            "bmi": "29",
            "systolic": "140",
            "diastolic": "90",
            "cholesterol": "250",
            "glucose": "110",
            "smoking": "Yes",
            "alcohol": "No",
            "activity": "1",
            "family_history": "Yes"
        })
    }

    async fn submit_report(app: &Router, token: &str) -> String {
        let (status, json) = send(
            app,
            make_request("POST", "/api/reports", Some(token), Some(high_risk_form())),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = api_router_with_ctx(test_ctx());
        let (status, json) = send(&app, make_request("GET", "/api/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn protected_route_requires_token() {
        let app = api_router_with_ctx(test_ctx());
        let (status, json) = send(&app, make_request("GET", "/api/me", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "AUTH_REQUIRED");

        let (status, _) = send(&app, make_request("GET", "/api/me", Some("bogus"), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_credentials_rejected() {
        let app = api_router_with_ctx(test_ctx());
        let (status, json) = send(
            &app,
            make_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "username": "patient", "password": "nope", "role": "Patient" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
        assert_eq!(json["error"]["message"], "Invalid credentials. Please try again.");
    }

    #[tokio::test]
    async fn me_and_logout() {
        let app = api_router_with_ctx(test_ctx());
        let token = login(&app, "Patient").await;

        let response = app
            .clone()
            .oneshot(make_request("GET", "/api/me", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");

        let (status, json) =
            send(&app, make_request("POST", "/api/auth/logout", Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["logged_out"], true);

        let (status, _) = send(&app, make_request("GET", "/api/me", Some(&token), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn submit_returns_scored_report() {
        let app = api_router_with_ctx(test_ctx());
        let token = login(&app, "Patient").await;
        let (status, json) = send(
            &app,
            make_request("POST", "/api/reports", Some(&token), Some(high_risk_form())),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["status"], "private");
        assert_eq!(json["patient_name"], "Jane Doe");
        assert_eq!(json["outcome"]["kind"], "scored_with_predictions");
        assert_eq!(json["outcome"]["score"]["value"], 85);
        assert_eq!(json["outcome"]["score"]["band"], "High");

        let (status, latest) =
            send(&app, make_request("GET", "/api/reports/latest", Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(latest["id"], json["id"]);
    }

    #[tokio::test]
    async fn invalid_form_lists_fields() {
        let app = api_router_with_ctx(test_ctx());
        let token = login(&app, "Patient").await;
        let mut form = high_risk_form();
        form["age"] = json!("");
        form["glucose"] = json!("999");
        let (status, json) =
            send(&app, make_request("POST", "/api/reports", Some(&token), Some(form))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(json["error"]["fields"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_fields_are_validation_errors() {
        let app = api_router_with_ctx(test_ctx());
        let token = login(&app, "Patient").await;
        let mut form = high_risk_form();
        form.as_object_mut().unwrap().remove("family_history");
        form.as_object_mut().unwrap().remove("bmi");
        let (status, json) =
            send(&app, make_request("POST", "/api/reports", Some(&token), Some(form))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        let fields: Vec<&str> = json["error"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, ["bmi", "family_history"]);
    }

    #[tokio::test]
    async fn unknown_option_is_bad_request_envelope() {
        let app = api_router_with_ctx(test_ctx());
        let token = login(&app, "Patient").await;
        let mut form = high_risk_form();
        form["gender"] = json!("male");
        let (status, json) =
            send(&app, make_request("POST", "/api/reports", Some(&token), Some(form))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(json["error"]["message"].as_str().unwrap().contains("gender"));
    }

    #[tokio::test]
    async fn malformed_json_bodies_use_error_envelope() {
        let app = api_router_with_ctx(test_ctx());
        let token = login(&app, "Patient").await;
        let id = submit_report(&app, &token).await;

        let raw = Request::builder()
            .method("POST")
            .uri(format!("/api/reports/{id}/messages"))
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, json) = send(&app, raw).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let (status, json) = send(
            &app,
            make_request("POST", "/api/auth/login", None, Some(json!({ "username": "patient" }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let (status, json) = send(
            &app,
            make_request(
                "POST",
                &format!("/api/reports/{id}/assistant"),
                Some(&token),
                Some(json!({ "text": 42 })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn patient_cannot_read_doctor_queue() {
        let app = api_router_with_ctx(test_ctx());
        let token = login(&app, "Patient").await;
        let (status, json) =
            send(&app, make_request("GET", "/api/consultations", Some(&token), None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["error"]["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request_and_unknown_is_404() {
        let app = api_router_with_ctx(test_ctx());
        let token = login(&app, "Patient").await;
        let (status, _) =
            send(&app, make_request("GET", "/api/reports/not-a-uuid", Some(&token), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/api/reports/{}", uuid::Uuid::new_v4());
        let (status, json) = send(&app, make_request("GET", &uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn full_consultation_flow() {
        let app = api_router_with_ctx(test_ctx());
        let patient = login(&app, "Patient").await;
        let doctor = login(&app, "Doctor").await;
        let id = submit_report(&app, &patient).await;

        // Request a consultation.
        let uri = format!("/api/reports/{id}/consultation");
        let (status, json) = send(&app, make_request("POST", &uri, Some(&patient), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "requested");

        // Doctor sees it in the queue and was notified.
        let (_, queue) =
            send(&app, make_request("GET", "/api/consultations", Some(&doctor), None)).await;
        assert_eq!(queue.as_array().unwrap().len(), 1);
        let (_, notes) =
            send(&app, make_request("GET", "/api/notifications", Some(&doctor), None)).await;
        assert_eq!(notes["unread"], 1);
        assert_eq!(
            notes["notifications"][0]["message"],
            "New consultation request from Jane Doe."
        );

        // Patient cannot chat before review.
        let messages = format!("/api/reports/{id}/messages");
        let (status, _) = send(
            &app,
            make_request("POST", &messages, Some(&patient), Some(json!({ "text": "Hi" }))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Doctor opens the chat.
        let open = format!("/api/consultations/{id}/open");
        let (status, json) = send(&app, make_request("POST", &open, Some(&doctor), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "reviewed");

        // Both sides chat.
        let (status, _) = send(
            &app,
            make_request("POST", &messages, Some(&patient), Some(json!({ "text": "Hi doctor" }))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = send(
            &app,
            make_request("POST", &messages, Some(&doctor), Some(json!({ "text": "Hello Jane" }))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let (_, transcript) =
            send(&app, make_request("GET", &messages, Some(&patient), None)).await;
        assert_eq!(transcript[0]["text"], "Hi doctor");
        assert_eq!(transcript[1]["text"], "Hello Jane");

        // Meeting link reaches the patient.
        let meeting = format!("/api/consultations/{id}/meeting");
        let (status, json) = send(&app, make_request("POST", &meeting, Some(&doctor), None)).await;
        assert_eq!(status, StatusCode::OK);
        let link = json["link"].as_str().unwrap().to_string();
        assert!(link.starts_with("https://meet.google.com/lookup/"));
        let (_, notes) =
            send(&app, make_request("GET", "/api/notifications", Some(&patient), None)).await;
        assert_eq!(notes["notifications"][0]["link"], link.as_str());

        // Mark all read.
        let (_, marked) = send(
            &app,
            make_request("POST", "/api/notifications/read", Some(&patient), None),
        )
        .await;
        assert_eq!(marked["marked"], 3);

        // Re-requesting after review conflicts.
        let (status, json) = send(&app, make_request("POST", &uri, Some(&patient), None)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "INVALID_TRANSITION");
    }

    #[tokio::test]
    async fn assistant_answers_with_disclaimer() {
        let app = api_router_with_ctx(test_ctx());
        let patient = login(&app, "Patient").await;
        let id = submit_report(&app, &patient).await;
        let uri = format!("/api/reports/{id}/assistant");

        let (status, json) = send(
            &app,
            make_request("POST", &uri, Some(&patient), Some(json!({ "question": "Is my BMI bad?" }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"]["speaker"], "ai");
        assert!(json["reply"]["text"]
            .as_str()
            .unwrap()
            .ends_with(ASSISTANT_DISCLAIMER));

        let (_, history) = send(&app, make_request("GET", &uri, Some(&patient), None)).await;
        assert_eq!(history.as_array().unwrap().len(), 3);
        assert_eq!(history[1]["text"], "Is my BMI bad?");
    }

    #[tokio::test]
    async fn assistant_failure_is_fallback_not_error() {
        let app = api_router_with_ctx(test_ctx_with_oracle(MockOracle::failing(
            OracleError::Connection("http://localhost:11434".into()),
        )));
        let patient = login(&app, "Patient").await;
        let id = submit_report(&app, &patient).await;
        let uri = format!("/api/reports/{id}/assistant");
        let (status, json) = send(
            &app,
            make_request("POST", &uri, Some(&patient), Some(json!({ "question": "Hello?" }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"]["text"], FALLBACK_RESPONSE);
    }
}
