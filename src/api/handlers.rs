//! HTTP request handlers for the Pricing Engine API.
//!
//! Boundary validation lives here: the engine core is deliberately
//! permissive, so task day estimates, factor allocations, and the
//! client-name-before-quoting rule are all enforced at this layer.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PricingEngine, RateModelUpdate};
use crate::error::EngineError;
use crate::models::{FactorCategory, FactorInput, TaskInput};

use super::request::{
    AddFactorRequest, AddTaskRequest, CreateSessionRequest, CurrencyUpdateRequest,
    ProjectNamesRequest, SettingsRequest, UpdateFactorRequest,
};
use super::response::{ApiError, ApiErrorResponse, SessionCreated, SessionSummary};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id/summary", get(get_summary))
        .route("/sessions/:id/quote", get(get_quote))
        .route("/sessions/:id/comparison", get(get_comparison))
        .route("/sessions/:id/model", put(update_model))
        .route("/sessions/:id/project", put(update_project))
        .route("/sessions/:id/settings", put(update_settings))
        .route("/sessions/:id/tasks", post(add_task))
        .route("/sessions/:id/tasks/:task_id", delete(remove_task))
        .route("/sessions/:id/factors/:category", post(add_factor))
        .route(
            "/sessions/:id/factors/:category/:factor_id",
            patch(update_factor).delete(remove_factor),
        )
        .route("/sessions/:id/currencies/:code", put(update_currency))
        .route("/sessions/:id/export", get(export_snapshot))
        .route("/sessions/:id/import", post(import_snapshot))
        .with_state(state)
}

/// Converts a JSON extraction result into a request body or an error
/// response.
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            })
        }
    }
}

/// Looks up a session or produces a 404 response.
async fn require_session(
    state: &AppState,
    id: Uuid,
) -> Result<Arc<Mutex<PricingEngine>>, ApiErrorResponse> {
    match state.session(id).await {
        Some(engine) => Ok(engine),
        None => {
            warn!(session_id = %id, "Session not found");
            Err(EngineError::SessionNotFound { id }.into())
        }
    }
}

/// Rejects non-positive numeric input at the boundary.
fn ensure_positive(field: &str, value: Decimal) -> Result<(), ApiErrorResponse> {
    if value <= Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: field.to_string(),
            message: "must be greater than zero".to_string(),
        }
        .into());
    }
    Ok(())
}

fn session_summary(engine: &PricingEngine) -> SessionSummary {
    SessionSummary {
        model: engine.model().summary(),
        project: engine.summary(),
    }
}

/// Handler for POST /sessions.
///
/// Creates a new pricing session, optionally seeding the rate model and
/// project names from the request body.
async fn create_session(
    State(state): State<AppState>,
    payload: Option<Json<CreateSessionRequest>>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = payload.map(|Json(body)| body).unwrap_or_default();

    let id = state.create_session().await;
    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    if let Some(update) = request.model {
        engine.update_model(update);
    }
    if let Some(name) = request.client_name {
        engine.set_client_name(name);
    }
    if let Some(name) = request.preparer_name {
        engine.set_preparer_name(name);
    }

    info!(session_id = %id, "Created pricing session");
    Ok((StatusCode::CREATED, Json(SessionCreated { session_id: id })))
}

/// Handler for GET /sessions/{id}/summary.
async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let engine = require_session(&state, id).await?;
    let engine = engine.lock().await;
    Ok(Json(session_summary(&engine)))
}

/// Handler for GET /sessions/{id}/quote.
///
/// Produces the client-facing quote. Requires a non-empty client name;
/// the engine itself never enforces this.
async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let engine = require_session(&state, id).await?;
    let engine = engine.lock().await;

    if engine.client_name().trim().is_empty() {
        return Err(ApiErrorResponse::validation(
            "client name must be set before preparing a quote",
        ));
    }

    info!(session_id = %id, client = %engine.client_name(), "Prepared client quote");
    Ok(Json(engine.client_quote()))
}

/// Handler for GET /sessions/{id}/comparison.
async fn get_comparison(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let engine = require_session(&state, id).await?;
    let engine = engine.lock().await;
    Ok(Json(engine.rate_comparison()))
}

/// Handler for PUT /sessions/{id}/model.
async fn update_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<RateModelUpdate>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let update = parse_body(payload)?;
    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    engine.update_model(update);
    Ok(Json(session_summary(&engine)))
}

/// Handler for PUT /sessions/{id}/project.
async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ProjectNamesRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = parse_body(payload)?;
    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    if let Some(name) = request.client_name {
        engine.set_client_name(name);
    }
    if let Some(name) = request.preparer_name {
        engine.set_preparer_name(name);
    }
    Ok(Json(session_summary(&engine)))
}

/// Handler for PUT /sessions/{id}/settings.
async fn update_settings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SettingsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = parse_body(payload)?;
    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    if let Some(max_uplift) = request.max_uplift {
        engine.set_max_uplift(max_uplift);
    }
    if let Some(max_discount) = request.max_discount {
        engine.set_max_discount(max_discount);
    }
    if let Some(rounding) = request.rounding {
        engine.set_rounding(rounding);
    }
    Ok(Json(session_summary(&engine)))
}

/// Handler for POST /sessions/{id}/tasks.
async fn add_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<AddTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = parse_body(payload)?;
    ensure_positive("days", request.days)?;

    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    let task_id = engine.add_task(TaskInput {
        id: request.id,
        name: request.name,
        days: request.days,
    });

    info!(session_id = %id, task_id = %task_id, "Added task");
    Ok((StatusCode::CREATED, Json(session_summary(&engine))))
}

/// Handler for DELETE /sessions/{id}/tasks/{task_id}.
///
/// Unknown task ids are a silent no-op by engine contract.
async fn remove_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    engine.remove_task(&task_id);
    Ok(Json(session_summary(&engine)))
}

/// Handler for POST /sessions/{id}/factors/{category}.
async fn add_factor(
    State(state): State<AppState>,
    Path((id, category)): Path<(Uuid, FactorCategory)>,
    payload: Result<Json<AddFactorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = parse_body(payload)?;
    ensure_positive("allocation", request.allocation)?;

    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    let factor_id = engine.add_factor(
        category,
        FactorInput {
            id: request.id,
            name: request.name,
            allocation: request.allocation,
            selected: request.selected,
        },
    );

    info!(session_id = %id, factor_id = %factor_id, category = %category, "Added factor");
    Ok((StatusCode::CREATED, Json(session_summary(&engine))))
}

/// Handler for PATCH /sessions/{id}/factors/{category}/{factor_id}.
///
/// Unknown factor ids are a silent no-op by engine contract.
async fn update_factor(
    State(state): State<AppState>,
    Path((id, category, factor_id)): Path<(Uuid, FactorCategory, String)>,
    payload: Result<Json<UpdateFactorRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = parse_body(payload)?;
    if let Some(allocation) = request.allocation {
        ensure_positive("allocation", allocation)?;
    }

    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    if let Some(allocation) = request.allocation {
        engine.update_factor_allocation(category, &factor_id, allocation);
    }
    if let Some(selected) = request.selected {
        engine.toggle_factor(category, &factor_id, selected);
    }
    Ok(Json(session_summary(&engine)))
}

/// Handler for DELETE /sessions/{id}/factors/{category}/{factor_id}.
async fn remove_factor(
    State(state): State<AppState>,
    Path((id, category, factor_id)): Path<(Uuid, FactorCategory, String)>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    engine.remove_factor(category, &factor_id);
    Ok(Json(session_summary(&engine)))
}

/// Handler for PUT /sessions/{id}/currencies/{code}.
///
/// Unknown currency codes are a silent no-op by engine contract.
async fn update_currency(
    State(state): State<AppState>,
    Path((id, code)): Path<(Uuid, String)>,
    payload: Result<Json<CurrencyUpdateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let request = parse_body(payload)?;
    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    if let Some(rate) = request.rate {
        engine.set_currency_rate(&code, rate);
    }
    if let Some(enabled) = request.enabled {
        engine.toggle_currency(&code, enabled);
    }
    Ok(Json(session_summary(&engine)))
}

/// Handler for GET /sessions/{id}/export.
///
/// Returns the session's snapshot as a JSON document.
async fn export_snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let engine = require_session(&state, id).await?;
    let engine = engine.lock().await;

    let json = engine.export_json()?;
    info!(session_id = %id, "Exported snapshot");
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json,
    ))
}

/// Handler for POST /sessions/{id}/import.
///
/// Replaces the session state from a snapshot payload. Fails atomically:
/// a rejected payload leaves the session untouched.
async fn import_snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: String,
) -> Result<impl IntoResponse, ApiErrorResponse> {
    let engine = require_session(&state, id).await?;
    let mut engine = engine.lock().await;

    match engine.import_json(&body) {
        Ok(()) => {
            info!(session_id = %id, "Imported snapshot");
            Ok(Json(session_summary(&engine)))
        }
        Err(err) => {
            warn!(session_id = %id, error = %err, "Snapshot import rejected");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        create_router(AppState::default())
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        let request = match body {
            Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        // Some rejections (e.g. bad path segments) produce plain-text bodies.
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_session_id(router: &Router) -> String {
        let (status, body) = send(
            router,
            "POST",
            "/sessions",
            Some(json!({
                "model": {"salary_budget": "100000", "growth_budget": "20000"},
                "client_name": "Acme Ltd",
                "preparer_name": "Jo Contractor"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_session_returns_201_with_id() {
        let router = create_test_router();
        let (status, body) = send(&router, "POST", "/sessions", Some(json!({}))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["session_id"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_summary_for_unknown_session_returns_404() {
        let router = create_test_router();
        let uri = format!("/sessions/{}/summary", Uuid::nil());
        let (status, body) = send(&router, "GET", &uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_summary_reflects_seeded_model() {
        let router = create_test_router();
        let id = create_session_id(&router).await;

        let (status, body) = send(&router, "GET", &format!("/sessions/{}/summary", id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"]["total_hours"], "1680");
        assert_eq!(body["model"]["required_day_rate"], "500");
        assert_eq!(body["project"]["client_name"], "Acme Ltd");
    }

    #[tokio::test]
    async fn test_add_task_rejects_non_positive_days() {
        let router = create_test_router();
        let id = create_session_id(&router).await;

        let (status, body) = send(
            &router,
            "POST",
            &format!("/sessions/{}/tasks", id),
            Some(json!({"name": "Build", "days": "0"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_add_task_returns_recomputed_summary() {
        let router = create_test_router();
        let id = create_session_id(&router).await;

        let (status, body) = send(
            &router,
            "POST",
            &format!("/sessions/{}/tasks", id),
            Some(json!({"name": "Build", "days": "10"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        // No uplift factors yet: cost at the bare required day rate.
        assert_eq!(body["project"]["base_project_cost"], "5000");
        assert_eq!(body["project"]["tasks"][0]["cost"], "5000");
    }

    #[tokio::test]
    async fn test_factor_category_path_rejects_unknown_category() {
        let router = create_test_router();
        let id = create_session_id(&router).await;

        let (status, _) = send(
            &router,
            "POST",
            &format!("/sessions/{}/factors/markup", id),
            Some(json!({"name": "Rush", "allocation": "100"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_quote_requires_client_name() {
        let router = create_test_router();
        let (_, created) = send(&router, "POST", "/sessions", Some(json!({}))).await;
        let id = created["session_id"].as_str().unwrap();

        let (status, body) = send(&router, "GET", &format!("/sessions/{}/quote", id), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_body_returns_400() {
        let router = create_test_router();
        let id = create_session_id(&router).await;

        let request = Request::builder()
            .method("POST")
            .uri(format!("/sessions/{}/tasks", id))
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_import_rejects_missing_version_and_keeps_state() {
        let router = create_test_router();
        let id = create_session_id(&router).await;
        send(
            &router,
            "POST",
            &format!("/sessions/{}/tasks", id),
            Some(json!({"name": "Build", "days": "10"})),
        )
        .await;

        let (status, body) = send(
            &router,
            "POST",
            &format!("/sessions/{}/import", id),
            Some(json!({"project": {"clientName": "Intruder"}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "SNAPSHOT_MISSING_VERSION");

        let (_, summary) = send(&router, "GET", &format!("/sessions/{}/summary", id), None).await;
        assert_eq!(summary["project"]["client_name"], "Acme Ltd");
        assert_eq!(summary["project"]["tasks"].as_array().unwrap().len(), 1);
    }
}
