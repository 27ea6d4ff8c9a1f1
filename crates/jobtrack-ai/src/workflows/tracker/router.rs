use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::workflows::intake::{ExtractionError, ExtractionProvider};

use super::domain::{JobDraft, JobId, RoundDraft};
use super::service::{JobTrackerService, TrackerError};
use super::store::{JobStore, StoreError};

/// Router builder exposing HTTP endpoints for intake and tracking.
pub fn tracker_router<S, P>(service: Arc<JobTrackerService<S, P>>) -> Router
where
    S: JobStore + 'static,
    P: ExtractionProvider + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            get(list_handler::<S, P>).post(create_handler::<S, P>),
        )
        .route("/api/v1/jobs/summary", get(summary_handler::<S, P>))
        .route("/api/v1/jobs/extract", post(extract_handler::<S, P>))
        .route("/api/v1/jobs/:job_id", get(get_handler::<S, P>))
        .route("/api/v1/jobs/:job_id/status", put(status_handler::<S, P>))
        .route("/api/v1/jobs/:job_id/rounds", post(rounds_handler::<S, P>))
        .with_state(service)
}

/// Body for the extraction endpoint.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

/// Body for the status endpoint. The label is validated by the service.
#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: String,
}

pub(crate) async fn list_handler<S, P>(
    State(service): State<Arc<JobTrackerService<S, P>>>,
) -> Response
where
    S: JobStore + 'static,
    P: ExtractionProvider + 'static,
{
    match service.list_jobs().await {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<S, P>(
    State(service): State<Arc<JobTrackerService<S, P>>>,
) -> Response
where
    S: JobStore + 'static,
    P: ExtractionProvider + 'static,
{
    match service.dashboard_summary().await {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn extract_handler<S, P>(
    State(service): State<Arc<JobTrackerService<S, P>>>,
    axum::Json(request): axum::Json<ExtractRequest>,
) -> Response
where
    S: JobStore + 'static,
    P: ExtractionProvider + 'static,
{
    match service.extract_draft(&request.text).await {
        Ok(draft) => (StatusCode::OK, axum::Json(draft)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_handler<S, P>(
    State(service): State<Arc<JobTrackerService<S, P>>>,
    axum::Json(draft): axum::Json<JobDraft>,
) -> Response
where
    S: JobStore + 'static,
    P: ExtractionProvider + 'static,
{
    match service.create_from_draft(draft).await {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<S, P>(
    State(service): State<Arc<JobTrackerService<S, P>>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: JobStore + 'static,
    P: ExtractionProvider + 'static,
{
    let id = JobId(job_id);
    match service.get_job(&id).await {
        Ok(Some(record)) => (StatusCode::OK, axum::Json(record)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("job {} not found", id.0),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<S, P>(
    State(service): State<Arc<JobTrackerService<S, P>>>,
    Path(job_id): Path<String>,
    axum::Json(request): axum::Json<StatusChangeRequest>,
) -> Response
where
    S: JobStore + 'static,
    P: ExtractionProvider + 'static,
{
    let id = JobId(job_id);
    match service.change_status(&id, &request.status).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rounds_handler<S, P>(
    State(service): State<Arc<JobTrackerService<S, P>>>,
    Path(job_id): Path<String>,
    axum::Json(draft): axum::Json<RoundDraft>,
) -> Response
where
    S: JobStore + 'static,
    P: ExtractionProvider + 'static,
{
    let id = JobId(job_id);
    match service.log_round(&id, draft).await {
        Ok(round) => (StatusCode::CREATED, axum::Json(round)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Map service errors onto the HTTP surface. Caller mistakes are 4xx, an
/// unconfigured or failing provider is 5xx, storage corruption is 500.
fn error_response(error: TrackerError) -> Response {
    let status = match &error {
        TrackerError::InvalidStatus(_) | TrackerError::MissingField(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        TrackerError::Extraction(ExtractionError::EmptyInput) => StatusCode::UNPROCESSABLE_ENTITY,
        TrackerError::Extraction(ExtractionError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        TrackerError::Extraction(_) => StatusCode::BAD_GATEWAY,
        TrackerError::Store(StoreError::JobNotFound(_)) => StatusCode::NOT_FOUND,
        TrackerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
