use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::workflows::intake::{self, ExtractionError, ExtractionProvider};

use super::domain::{InterviewRound, JobApplication, JobDraft, JobId, JobStatus, RoundDraft};
use super::store::{JobStore, NewJobRecord, NewRound, StoreError};

/// Service composing the extraction provider and the application store. All
/// status strings enter the system through [`JobTrackerService::change_status`],
/// which is the single validation point for the lifecycle vocabulary.
pub struct JobTrackerService<S, P> {
    store: Arc<S>,
    extractor: Arc<P>,
}

impl<S, P> JobTrackerService<S, P>
where
    S: JobStore + 'static,
    P: ExtractionProvider + 'static,
{
    pub fn new(store: Arc<S>, extractor: Arc<P>) -> Self {
        Self { store, extractor }
    }

    /// Run the intake pipeline over a raw description and prefill a draft.
    /// The original text is carried along so it is never lost to a sloppy
    /// extraction.
    pub async fn extract_draft(&self, jd_text: &str) -> Result<JobDraft, TrackerError> {
        let parsed = intake::parse_job_description(self.extractor.as_ref(), jd_text).await?;

        Ok(JobDraft {
            company: parsed.company,
            role: parsed.role,
            location: parsed.location,
            salary: parsed.salary,
            skills: parsed.skills.join(", "),
            experience: parsed.experience,
            job_link: parsed.job_link,
            source: parsed.source,
            job_type: parsed.job_type,
            summary: parsed.summary,
            raw_jd: jd_text.to_string(),
            resume: None,
        })
    }

    /// Persist a draft as a new application. Every record starts in
    /// [`JobStatus::Applied`] regardless of what the caller filled in.
    pub async fn create_from_draft(
        &self,
        draft: JobDraft,
    ) -> Result<JobApplication, TrackerError> {
        if let Some(field) = draft.missing_required_field() {
            return Err(TrackerError::MissingField(field));
        }

        let record = NewJobRecord {
            company: draft.company,
            role: draft.role,
            location: draft.location,
            salary: draft.salary,
            skills: split_skills(&draft.skills),
            experience: draft.experience,
            job_link: draft.job_link,
            source: draft.source,
            job_type: draft.job_type,
            summary: draft.summary,
            raw_jd: draft.raw_jd,
            resume: draft.resume,
            status: JobStatus::Applied,
        };

        let stored = self.store.insert(record).await?;
        Ok(stored)
    }

    /// Move an application to a new lifecycle stage. The raw label is parsed
    /// here; an unknown id downstream stays a silent no-op.
    pub async fn change_status(&self, id: &JobId, raw_status: &str) -> Result<(), TrackerError> {
        let status = JobStatus::parse(raw_status)
            .ok_or_else(|| TrackerError::InvalidStatus(raw_status.to_string()))?;
        self.store.update_status(id, status).await?;
        Ok(())
    }

    /// Record an interview round. A missing round number defaults to the next
    /// ordinal, a missing date to now.
    pub async fn log_round(
        &self,
        job_id: &JobId,
        draft: RoundDraft,
    ) -> Result<InterviewRound, TrackerError> {
        let round_number = match draft.round_number {
            Some(number) => number,
            None => {
                let record = self
                    .store
                    .get_by_id(job_id)
                    .await?
                    .ok_or_else(|| StoreError::JobNotFound(job_id.clone()))?;
                record.rounds.len() as u32 + 1
            }
        };

        let round = NewRound {
            round_number,
            round_type: draft.round_type,
            questions: draft.questions,
            feedback: draft.feedback,
            result: draft.result,
            date: draft.date.unwrap_or_else(Utc::now),
        };

        let stored = self.store.append_round(job_id, round).await?;
        Ok(stored)
    }

    /// Every tracked application, most recently created first.
    pub async fn list_jobs(&self) -> Result<Vec<JobApplication>, TrackerError> {
        let records = self.store.list_all().await?;
        Ok(records)
    }

    /// Single application lookup for detail views.
    pub async fn get_job(&self, id: &JobId) -> Result<Option<JobApplication>, TrackerError> {
        let record = self.store.get_by_id(id).await?;
        Ok(record)
    }

    /// Aggregate counts for the dashboard header.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, TrackerError> {
        let records = self.store.list_all().await?;
        Ok(DashboardSummary::from_records(&records))
    }
}

/// Split a comma-separated skill list into trimmed, non-empty entries.
fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

/// Counts shown on the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub active: usize,
    pub interviews: usize,
    pub offers: usize,
}

impl DashboardSummary {
    pub fn from_records(records: &[JobApplication]) -> Self {
        Self {
            total: records.len(),
            active: records
                .iter()
                .filter(|record| record.status.is_active())
                .count(),
            interviews: records
                .iter()
                .filter(|record| record.status == JobStatus::Interview)
                .count(),
            offers: records
                .iter()
                .filter(|record| record.status == JobStatus::Offer)
                .count(),
        }
    }
}

/// Error raised by the tracker service.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error("unknown status '{0}'")]
    InvalidStatus(String),
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}
