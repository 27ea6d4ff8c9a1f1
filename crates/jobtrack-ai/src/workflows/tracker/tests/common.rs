use std::io::ErrorKind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::intake::{ExtractionError, ExtractionProvider};
use crate::workflows::tracker::domain::{
    InterviewRound, JobApplication, JobDraft, JobId, JobStatus, RoundDraft, RoundResult,
};
use crate::workflows::tracker::store::{JobStore, NewJobRecord, NewRound, StoreError};
use crate::workflows::tracker::{tracker_router, JobTrackerService};

pub(super) const CANNED_EXTRACTION: &str =
    r#"{"company":"X","role":"Y","skills":["Go","SQL"],"summary":"Z"}"#;

pub(super) fn draft() -> JobDraft {
    JobDraft {
        company: "Initech".to_string(),
        role: "Staff Engineer".to_string(),
        location: "Remote".to_string(),
        salary: "$180k".to_string(),
        skills: "Rust, Tokio , , SQL".to_string(),
        experience: "8+ years".to_string(),
        job_link: "https://example.com/jobs/42".to_string(),
        source: "Referral".to_string(),
        job_type: "Full Time".to_string(),
        summary: "Own the billing platform.".to_string(),
        raw_jd: "Initech is hiring a Staff Engineer...".to_string(),
        resume: None,
    }
}

pub(super) fn round_draft(result: RoundResult) -> RoundDraft {
    RoundDraft {
        round_number: None,
        round_type: "Technical".to_string(),
        questions: "Ownership deep dive".to_string(),
        feedback: String::new(),
        result,
        date: None,
    }
}

pub(super) fn build_service() -> (
    JobTrackerService<MemoryStore, CannedExtractor>,
    Arc<MemoryStore>,
    Arc<CannedExtractor>,
) {
    let store = Arc::new(MemoryStore::default());
    let extractor = Arc::new(CannedExtractor::default());
    let service = JobTrackerService::new(store.clone(), extractor.clone());
    (service, store, extractor)
}

pub(super) fn tracker_router_with_service(
    service: JobTrackerService<MemoryStore, CannedExtractor>,
) -> axum::Router {
    tracker_router(Arc::new(service))
}

/// In-memory store preserving the newest-first collection order.
#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<Vec<JobApplication>>,
}

impl MemoryStore {
    pub(super) fn snapshot(&self) -> Vec<JobApplication> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<JobApplication>, StoreError> {
        Ok(self.snapshot())
    }

    async fn get_by_id(&self, id: &JobId) -> Result<Option<JobApplication>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    async fn insert(&self, record: NewJobRecord) -> Result<JobApplication, StoreError> {
        let stored = record.into_stored();
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(0, stored.clone());
        Ok(stored)
    }

    async fn update_status(&self, id: &JobId, status: JobStatus) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if let Some(record) = guard.iter_mut().find(|record| &record.id == id) {
            record.status = status;
        }
        Ok(())
    }

    async fn append_round(
        &self,
        job_id: &JobId,
        round: NewRound,
    ) -> Result<InterviewRound, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| &record.id == job_id)
            .ok_or_else(|| StoreError::JobNotFound(job_id.clone()))?;
        let stored = round.into_stored(job_id);
        record.rounds.push(stored.clone());
        Ok(stored)
    }
}

/// Store whose every operation fails, for exercising 500 responses.
pub(super) struct OfflineStore;

fn offline() -> StoreError {
    StoreError::Io(std::io::Error::new(ErrorKind::Other, "storage offline"))
}

#[async_trait]
impl JobStore for OfflineStore {
    async fn list_all(&self) -> Result<Vec<JobApplication>, StoreError> {
        Err(offline())
    }

    async fn get_by_id(&self, _id: &JobId) -> Result<Option<JobApplication>, StoreError> {
        Err(offline())
    }

    async fn insert(&self, _record: NewJobRecord) -> Result<JobApplication, StoreError> {
        Err(offline())
    }

    async fn update_status(&self, _id: &JobId, _status: JobStatus) -> Result<(), StoreError> {
        Err(offline())
    }

    async fn append_round(
        &self,
        _job_id: &JobId,
        _round: NewRound,
    ) -> Result<InterviewRound, StoreError> {
        Err(offline())
    }
}

/// Provider returning a fixed payload and counting invocations.
#[derive(Default)]
pub(super) struct CannedExtractor {
    calls: AtomicUsize,
}

impl CannedExtractor {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtractionProvider for CannedExtractor {
    async fn extract(&self, _jd_text: &str) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CANNED_EXTRACTION.to_string())
    }
}

/// Provider standing in for a deployment without an API key.
pub(super) struct UnconfiguredExtractor;

#[async_trait]
impl ExtractionProvider for UnconfiguredExtractor {
    async fn extract(&self, _jd_text: &str) -> Result<String, ExtractionError> {
        Err(ExtractionError::Unavailable("GEMINI_API_KEY is not set"))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
