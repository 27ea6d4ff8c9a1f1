use std::sync::Arc;

use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::workflows::tracker::domain::JobStatus;
use crate::workflows::tracker::router::{ExtractRequest, StatusChangeRequest};
use crate::workflows::tracker::JobTrackerService;

#[tokio::test]
async fn create_handler_persists_drafts() {
    let (service, store, _) = build_service();
    let service = Arc::new(service);

    let response = crate::workflows::tracker::router::create_handler::<
        MemoryStore,
        CannedExtractor,
    >(State(service), axum::Json(draft()))
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("status").and_then(serde_json::Value::as_str),
        Some(JobStatus::Applied.label())
    );
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn create_handler_rejects_blank_required_fields() {
    let (service, store, _) = build_service();
    let service = Arc::new(service);

    let mut incomplete = draft();
    incomplete.role = String::new();

    let response = crate::workflows::tracker::router::create_handler::<
        MemoryStore,
        CannedExtractor,
    >(State(service), axum::Json(incomplete))
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn status_handler_rejects_unknown_labels() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);

    let stored = service
        .create_from_draft(draft())
        .await
        .expect("creation succeeds");

    let response = crate::workflows::tracker::router::status_handler::<
        MemoryStore,
        CannedExtractor,
    >(
        State(service),
        axum::extract::Path(stored.id.0.clone()),
        axum::Json(StatusChangeRequest {
            status: "Ghosted".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn status_handler_accepts_unknown_ids_silently() {
    let (service, store, _) = build_service();
    let service = Arc::new(service);

    service
        .create_from_draft(draft())
        .await
        .expect("creation succeeds");
    let before = store.snapshot();

    let response = crate::workflows::tracker::router::status_handler::<
        MemoryStore,
        CannedExtractor,
    >(
        State(service),
        axum::extract::Path("missing".to_string()),
        axum::Json(StatusChangeRequest {
            status: "Offer".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn rounds_handler_reports_unknown_jobs() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);

    let response = crate::workflows::tracker::router::rounds_handler::<
        MemoryStore,
        CannedExtractor,
    >(
        State(service),
        axum::extract::Path("missing".to_string()),
        axum::Json(round_draft(Default::default())),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_handler_reports_unknown_ids() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);

    let response = crate::workflows::tracker::router::get_handler::<MemoryStore, CannedExtractor>(
        State(service),
        axum::extract::Path("missing".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .contains("missing"));
}

#[tokio::test]
async fn extract_handler_rejects_empty_text() {
    let (service, _, extractor) = build_service();
    let service = Arc::new(service);

    let response = crate::workflows::tracker::router::extract_handler::<
        MemoryStore,
        CannedExtractor,
    >(
        State(service),
        axum::Json(ExtractRequest {
            text: "  ".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(extractor.calls(), 0);
}

#[tokio::test]
async fn extract_handler_reports_unconfigured_provider() {
    let service = Arc::new(JobTrackerService::new(
        Arc::new(MemoryStore::default()),
        Arc::new(UnconfiguredExtractor),
    ));

    let response = crate::workflows::tracker::router::extract_handler::<
        MemoryStore,
        UnconfiguredExtractor,
    >(
        State(service),
        axum::Json(ExtractRequest {
            text: "We are hiring...".to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn list_handler_reports_storage_failures() {
    let service = Arc::new(JobTrackerService::new(
        Arc::new(OfflineStore),
        Arc::new(CannedExtractor::default()),
    ));

    let response = crate::workflows::tracker::router::list_handler::<
        OfflineStore,
        CannedExtractor,
    >(State(service))
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn create_route_round_trips_through_list_and_summary() {
    let (service, _, _) = build_service();
    let router = tracker_router_with_service(service);

    let response = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/jobs")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&draft()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    let id = created
        .get("id")
        .and_then(serde_json::Value::as_str)
        .expect("id present")
        .to_string();

    let response = router
        .clone()
        .oneshot(
            axum::http::Request::get("/api/v1/jobs")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let listed = read_json_body(response).await;
    assert_eq!(
        listed
            .as_array()
            .map(|records| records.len()),
        Some(1)
    );
    assert_eq!(
        listed[0].get("id").and_then(serde_json::Value::as_str),
        Some(id.as_str())
    );

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/jobs/summary")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let summary = read_json_body(response).await;
    assert_eq!(summary.get("total"), Some(&json!(1)));
    assert_eq!(summary.get("active"), Some(&json!(1)));
}

#[tokio::test]
async fn status_route_moves_records_between_stages() {
    let (service, store, _) = build_service();
    let router = tracker_router_with_service(service);

    let response = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/jobs")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&draft()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");
    let created = read_json_body(response).await;
    let id = created
        .get("id")
        .and_then(serde_json::Value::as_str)
        .expect("id present")
        .to_string();

    let response = router
        .oneshot(
            axum::http::Request::put(format!("/api/v1/jobs/{id}/status"))
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({"status": "Interview"})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.snapshot()[0].status, JobStatus::Interview);
}

#[tokio::test]
async fn rounds_route_records_interview_history() {
    let (service, _, _) = build_service();
    let router = tracker_router_with_service(service);

    let response = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/jobs")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&draft()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");
    let created = read_json_body(response).await;
    let id = created
        .get("id")
        .and_then(serde_json::Value::as_str)
        .expect("id present")
        .to_string();

    let response = router
        .oneshot(
            axum::http::Request::post(format!("/api/v1/jobs/{id}/rounds"))
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({
                        "round_type": "System Design",
                        "questions": "Design a URL shortener.",
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let round = read_json_body(response).await;
    assert_eq!(round.get("round_number"), Some(&json!(1)));
    assert_eq!(round.get("result"), Some(&json!("Pending")));
    assert_eq!(
        round.get("job_id").and_then(serde_json::Value::as_str),
        Some(id.as_str())
    );
}

#[tokio::test]
async fn extract_route_prefills_a_draft() {
    let (service, _, _) = build_service();
    let router = tracker_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/jobs/extract")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({"text": "We are hiring a backend engineer..."}))
                        .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("company"), Some(&json!("X")));
    assert_eq!(payload.get("skills"), Some(&json!("Go, SQL")));
    assert_eq!(
        payload.get("raw_jd"),
        Some(&json!("We are hiring a backend engineer..."))
    );
}
