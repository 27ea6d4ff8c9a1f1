use async_trait::async_trait;
use jobtrack_ai::workflows::tracker::{
    InterviewRound, JobApplication, JobId, JobStatus, JobStore, NewJobRecord, NewRound,
    StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Store backing the demo command. Keeps the newest-first collection order
/// without touching the filesystem.
#[derive(Default, Clone)]
pub(crate) struct InMemoryJobStore {
    records: Arc<Mutex<Vec<JobApplication>>>,
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn list_all(&self) -> Result<Vec<JobApplication>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.clone())
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
