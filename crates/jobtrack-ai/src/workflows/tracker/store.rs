use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::info;

use super::domain::{
    InterviewRound, JobApplication, JobId, JobStatus, RoundId, RoundResult,
};

/// Fields persisted for a new application. The store mints the id, stamps the
/// applied date, and starts the round list empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJobRecord {
    pub company: String,
    pub role: String,
    pub location: String,
    pub salary: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub job_link: String,
    pub source: String,
    pub job_type: String,
    pub summary: String,
    pub raw_jd: String,
    pub resume: Option<String>,
    pub status: JobStatus,
}

impl NewJobRecord {
    /// Promote to a stored record, minting the id and applied date.
    pub fn into_stored(self) -> JobApplication {
        JobApplication {
            id: JobId::fresh(),
            company: self.company,
            role: self.role,
            location: self.location,
            salary: self.salary,
            skills: self.skills,
            experience: self.experience,
            job_link: self.job_link,
            source: self.source,
            job_type: self.job_type,
            summary: self.summary,
            raw_jd: self.raw_jd,
            resume: self.resume,
            status: self.status,
            applied_date: Utc::now(),
            rounds: Vec::new(),
        }
    }
}

/// Fields persisted for a new interview round. The store mints the id and
/// stamps the back-reference to the owning record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRound {
    pub round_number: u32,
    pub round_type: String,
    pub questions: String,
    pub feedback: String,
    pub result: RoundResult,
    pub date: DateTime<Utc>,
}

impl NewRound {
    /// Promote to a stored round attached to `job_id`.
    pub fn into_stored(self, job_id: &JobId) -> InterviewRound {
        InterviewRound {
            id: RoundId::fresh(),
            job_id: job_id.clone(),
            round_number: self.round_number,
            round_type: self.round_type,
            questions: self.questions,
            feedback: self.feedback,
            result: self.result,
            date: self.date,
        }
    }
}

/// Storage abstraction so the lifecycle service can be exercised in
/// isolation.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Every stored application, most recently created first.
    async fn list_all(&self) -> Result<Vec<JobApplication>, StoreError>;
    /// Single record lookup; absence is `Ok(None)`, never an error.
    async fn get_by_id(&self, id: &JobId) -> Result<Option<JobApplication>, StoreError>;
    /// Persist a new record at the top of the collection.
    async fn insert(&self, record: NewJobRecord) -> Result<JobApplication, StoreError>;
    /// Set the status of an existing record. Unknown ids are a silent no-op
    /// and write nothing.
    async fn update_status(&self, id: &JobId, status: JobStatus) -> Result<(), StoreError>;
    /// Attach a round to an existing record. Unknown ids are an error so an
    /// entered report is never silently dropped.
    async fn append_round(
        &self,
        job_id: &JobId,
        round: NewRound,
    ) -> Result<InterviewRound, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored collection is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Store keeping the whole collection in one JSON file.
///
/// Every operation reloads the blob, mutates it in memory, and rewrites it
/// under the internal lock; the file is the unit of consistency. Safe for a
/// single process only.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Point the store at a data file. No I/O happens here; a missing file is
    /// seeded on first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<JobApplication>, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                let seeded = seed_collection();
                self.persist(&seeded).await?;
                info!(path = %self.path.display(), "seeded new job collection");
                Ok(seeded)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(&self, records: &[JobApplication]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let payload = serde_json::to_vec_pretty(records)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

#[async_trait]
impl JobStore for JsonFileStore {
    async fn list_all(&self) -> Result<Vec<JobApplication>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn get_by_id(&self, id: &JobId) -> Result<Option<JobApplication>, StoreError> {
        let _guard = self.lock.lock().await;
        let records = self.load().await?;
        Ok(records.into_iter().find(|record| &record.id == id))
    }

    async fn insert(&self, record: NewJobRecord) -> Result<JobApplication, StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let stored = record.into_stored();
        records.insert(0, stored.clone());
        self.persist(&records).await?;
        Ok(stored)
    }

    async fn update_status(&self, id: &JobId, status: JobStatus) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        match records.iter_mut().find(|record| &record.id == id) {
            Some(record) => {
                record.status = status;
                self.persist(&records).await
            }
            None => Ok(()),
        }
    }

    async fn append_round(
        &self,
        job_id: &JobId,
        round: NewRound,
    ) -> Result<InterviewRound, StoreError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let record = records
            .iter_mut()
            .find(|record| &record.id == job_id)
            .ok_or_else(|| StoreError::JobNotFound(job_id.clone()))?;

        let stored = round.into_stored(job_id);
        record.rounds.push(stored.clone());
        self.persist(&records).await?;
        Ok(stored)
    }
}

/// Starter record written when the data file does not exist yet. Fixed ids
/// and dates keep the seed byte-for-byte reproducible.
pub(crate) fn seed_collection() -> Vec<JobApplication> {
    let applied = Utc
        .with_ymd_and_hms(2025, 1, 6, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);
    let screened = Utc
        .with_ymd_and_hms(2025, 1, 7, 15, 30, 0)
        .single()
        .unwrap_or_else(Utc::now);

    vec![JobApplication {
        id: JobId("1".to_string()),
        company: "TechCorp Inc.".to_string(),
        role: "Senior React Engineer".to_string(),
        location: "Remote".to_string(),
        salary: "$140k - $160k".to_string(),
        skills: vec![
            "React".to_string(),
            "TypeScript".to_string(),
            "Node.js".to_string(),
            "AWS".to_string(),
        ],
        experience: "5+ years".to_string(),
        job_link: "https://linkedin.com/jobs/example".to_string(),
        source: "LinkedIn".to_string(),
        job_type: "Full Time".to_string(),
        summary: "Leading the frontend team to rebuild the core dashboard using modern React patterns."
            .to_string(),
        raw_jd: "Full text would go here...".to_string(),
        resume: Some("My_Resume_Senior_Frontend_v2.pdf".to_string()),
        status: JobStatus::Interview,
        applied_date: applied,
        rounds: vec![InterviewRound {
            id: RoundId("r1".to_string()),
            job_id: JobId("1".to_string()),
            round_number: 1,
            round_type: "HR Screen".to_string(),
            questions: "Tell me about yourself. Why TechCorp?".to_string(),
            feedback: "Good culture fit.".to_string(),
            result: RoundResult::Pass,
            date: screened,
        }],
    }]
}
