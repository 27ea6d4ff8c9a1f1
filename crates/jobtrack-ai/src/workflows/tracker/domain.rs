use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for tracked applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for interview rounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundId(pub String);

impl RoundId {
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Lifecycle stage of a tracked application. Serialized as the human labels
/// the board displays, which is also the wire and blob format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Applied,
    #[serde(rename = "Online Test")]
    OnlineTest,
    Interview,
    Offer,
    Rejected,
    #[serde(rename = "No Response")]
    NoResponse,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::OnlineTest => "Online Test",
            JobStatus::Interview => "Interview",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
            JobStatus::NoResponse => "No Response",
        }
    }

    /// Parse a raw status label. The lifecycle service is the gatekeeper;
    /// stores receive already-validated values.
    pub fn parse(value: &str) -> Option<Self> {
        JobStatus::ordered()
            .into_iter()
            .find(|status| status.label() == value)
    }

    pub const fn ordered() -> [JobStatus; 6] {
        [
            JobStatus::Applied,
            JobStatus::OnlineTest,
            JobStatus::Interview,
            JobStatus::Offer,
            JobStatus::Rejected,
            JobStatus::NoResponse,
        ]
    }

    /// True while the application still needs attention on the board.
    pub const fn is_active(self) -> bool {
        !matches!(self, JobStatus::Rejected | JobStatus::NoResponse)
    }
}

/// Outcome of a single interview round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Pass,
    Fail,
    #[default]
    Pending,
}

impl RoundResult {
    pub const fn label(self) -> &'static str {
        match self {
            RoundResult::Pass => "Pass",
            RoundResult::Fail => "Fail",
            RoundResult::Pending => "Pending",
        }
    }
}

/// Suggested vocabulary for [`InterviewRound::round_type`]. The stored field
/// stays free-form text; these labels only seed pickers and defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundType {
    Technical,
    Hr,
    Managerial,
    SystemDesign,
    Behavioral,
}

impl RoundType {
    pub const fn label(self) -> &'static str {
        match self {
            RoundType::Technical => "Technical",
            RoundType::Hr => "HR",
            RoundType::Managerial => "Managerial",
            RoundType::SystemDesign => "System Design",
            RoundType::Behavioral => "Behavioral",
        }
    }

    pub const fn ordered() -> [RoundType; 5] {
        [
            RoundType::Technical,
            RoundType::Hr,
            RoundType::Managerial,
            RoundType::SystemDesign,
            RoundType::Behavioral,
        ]
    }
}

/// Suggested vocabulary for [`JobApplication::job_type`]; free-form like
/// `round_type`.
pub const JOB_TYPE_LABELS: [&str; 3] = ["Full Time", "Intern", "Intern + Full Time"];

/// One tracked opportunity and its interview history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: JobId,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub job_link: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub raw_jd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    pub status: JobStatus,
    pub applied_date: DateTime<Utc>,
    #[serde(default)]
    pub rounds: Vec<InterviewRound>,
}

/// One interview round attached to an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRound {
    pub id: RoundId,
    pub job_id: JobId,
    /// Display ordinal. Caller-suppliable and deliberately not checked for
    /// uniqueness.
    pub round_number: u32,
    pub round_type: String,
    #[serde(default)]
    pub questions: String,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub result: RoundResult,
    pub date: DateTime<Utc>,
}

/// Form-shaped input for creating an application. `skills` arrives as the
/// comma-separated string the form collects; the service splits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDraft {
    pub company: String,
    pub role: String,
    pub location: String,
    pub salary: String,
    pub skills: String,
    pub experience: String,
    pub job_link: String,
    pub source: String,
    pub job_type: String,
    pub summary: String,
    pub raw_jd: String,
    pub resume: Option<String>,
}

impl JobDraft {
    /// First required field missing from the draft, if any.
    pub fn missing_required_field(&self) -> Option<&'static str> {
        if self.company.trim().is_empty() {
            return Some("company");
        }
        if self.role.trim().is_empty() {
            return Some("role");
        }
        None
    }
}

/// Form-shaped input for logging an interview round. Omitted `round_number`
/// and `date` are filled by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundDraft {
    pub round_number: Option<u32>,
    pub round_type: String,
    pub questions: String,
    pub feedback: String,
    pub result: RoundResult,
    pub date: Option<DateTime<Utc>>,
}
