use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    condition_catalog, AssessmentId, AssessmentInput, AssessmentSubmission, ConditionTag,
};
use super::repository::{AssessmentStore, SaveAssessmentResponse};
use super::selection::ConditionSelection;
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing the catalog, toggle, evaluation and persistence endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: AssessmentStore + 'static,
{
    Router::new()
        .route("/api/v1/conditions", get(catalog_handler))
        .route("/api/v1/conditions/toggle", post(toggle_handler))
        .route(
            "/api/v1/assessments/evaluate",
            post(evaluate_handler::<S>),
        )
        .route("/api/v1/assessments", post(submit_handler::<S>))
        .route("/api/v1/assessments/:assessment_id", get(record_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub selected: Vec<ConditionTag>,
    pub tag: ConditionTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub selected: Vec<ConditionTag>,
    pub can_advance: bool,
}

pub(crate) async fn catalog_handler() -> Response {
    (StatusCode::OK, Json(condition_catalog())).into_response()
}

pub(crate) async fn toggle_handler(Json(request): Json<ToggleRequest>) -> Response {
    let mut selection = ConditionSelection::from_tags(request.selected);
    selection.toggle(request.tag);

    let body = ToggleResponse {
        can_advance: selection.can_advance(),
        selected: selection.into_tags(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Json(input): Json<AssessmentInput>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    match service.assess(&input) {
        Ok(recommendation) => (StatusCode::OK, Json(recommendation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Json(submission): Json<AssessmentSubmission>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    match service.submit(submission) {
        Ok(record) => (
            StatusCode::CREATED,
            Json(SaveAssessmentResponse::saved(&record)),
        )
            .into_response(),
        Err(err) => {
            let status = status_for(&err);
            (status, Json(SaveAssessmentResponse::failed(err.to_string()))).into_response()
        }
    }
}

pub(crate) async fn record_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    S: AssessmentStore + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

fn status_for(err: &AssessmentServiceError) -> StatusCode {
    match err {
        AssessmentServiceError::Eligibility(_) | AssessmentServiceError::Incomplete { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AssessmentServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        AssessmentServiceError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

fn error_response(err: AssessmentServiceError) -> Response {
    let status = status_for(&err);
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
