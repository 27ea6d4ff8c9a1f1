//! Application lifecycle tracking: the domain model, the JSON-file store, the
//! service orchestrating intake and status changes, and the HTTP surface.

pub mod domain;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    InterviewRound, JobApplication, JobDraft, JobId, JobStatus, RoundDraft, RoundId, RoundResult,
    RoundType, JOB_TYPE_LABELS,
};
pub use router::{tracker_router, ExtractRequest, StatusChangeRequest};
pub use service::{DashboardSummary, JobTrackerService, TrackerError};
pub use store::{JobStore, JsonFileStore, NewJobRecord, NewRound, StoreError};
