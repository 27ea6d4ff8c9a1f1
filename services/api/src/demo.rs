use crate::infra::InMemoryJobStore;
use async_trait::async_trait;
use chrono::Utc;
use clap::Args;
use jobtrack_ai::error::AppError;
use jobtrack_ai::workflows::intake::{ExtractionError, ExtractionProvider};
use jobtrack_ai::workflows::tracker::{
    JobDraft, JobTrackerService, RoundDraft, RoundResult, RoundType, JOB_TYPE_LABELS,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the scripted extraction and start from a hand-filled draft.
    #[arg(long)]
    pub(crate) skip_extraction: bool,
}

const SAMPLE_JD: &str = "\
Acme Robotics is looking for a Senior Backend Engineer (Remote, $150k - $175k).
You will own our order ingestion pipeline end to end. We expect 5+ years of
experience with Rust, PostgreSQL, and AWS. Apply via https://acme.example/jobs/17.";

const SCRIPTED_EXTRACTION: &str = r#"{
    "company": "Acme Robotics",
    "role": "Senior Backend Engineer",
    "location": "Remote",
    "salary": "$150k - $175k",
    "skills": ["Rust", "PostgreSQL", "AWS"],
    "experience": "5+ years",
    "job_link": "https://acme.example/jobs/17",
    "source": "",
    "job_type": "Full Time",
    "summary": "Own the order ingestion pipeline end to end."
}"#;

/// Canned provider so the demo runs without credentials or network access.
struct ScriptedExtractor;

#[async_trait]
impl ExtractionProvider for ScriptedExtractor {
    async fn extract(&self, _jd_text: &str) -> Result<String, ExtractionError> {
        Ok(SCRIPTED_EXTRACTION.to_string())
    }
}

fn manual_draft() -> JobDraft {
    JobDraft {
        company: "Acme Robotics".to_string(),
        role: "Senior Backend Engineer".to_string(),
        location: "Remote".to_string(),
        salary: "$150k - $175k".to_string(),
        skills: "Rust, PostgreSQL, AWS".to_string(),
        experience: "5+ years".to_string(),
        job_link: "https://acme.example/jobs/17".to_string(),
        source: "Job board".to_string(),
        job_type: JOB_TYPE_LABELS[0].to_string(),
        summary: "Own the order ingestion pipeline end to end.".to_string(),
        raw_jd: SAMPLE_JD.to_string(),
        resume: None,
    }
}

fn round(round_type: RoundType, questions: &str, result: RoundResult) -> RoundDraft {
    RoundDraft {
        round_number: None,
        round_type: round_type.label().to_string(),
        questions: questions.to_string(),
        feedback: String::new(),
        result,
        date: Some(Utc::now()),
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { skip_extraction } = args;

    println!("Job tracker demo");

    let store = Arc::new(InMemoryJobStore::default());
    let service = Arc::new(JobTrackerService::new(store, Arc::new(ScriptedExtractor)));

    let draft = if skip_extraction {
        println!("\nStarting from a hand-filled draft");
        manual_draft()
    } else {
        println!("\nIntake pipeline (scripted extraction)");
        match service.extract_draft(SAMPLE_JD).await {
            Ok(draft) => {
                println!("- Company: {}", draft.company);
                println!("- Role: {}", draft.role);
                println!("- Location: {} | Salary: {}", draft.location, draft.salary);
                println!("- Skills: {}", draft.skills);
                println!("- Summary: {}", draft.summary);
                draft
            }
            Err(err) => {
                println!("  Extraction unavailable ({err}); falling back to a hand-filled draft");
                manual_draft()
            }
        }
    };

    let record = service.create_from_draft(draft).await?;
    println!(
        "\nTracking {} at {} ({})",
        record.role, record.company, record.id
    );
    println!("- Status: {}", record.status.label());

    service.change_status(&record.id, "Online Test").await?;
    println!("- Status: Online Test");
    let technical = service
        .log_round(
            &record.id,
            round(
                RoundType::Technical,
                "Implement an LRU cache.",
                RoundResult::Pass,
            ),
        )
        .await?;
    println!(
        "  Round {} ({}): {}",
        technical.round_number,
        technical.round_type,
        technical.result.label()
    );

    service.change_status(&record.id, "Interview").await?;
    println!("- Status: Interview");
    let design = service
        .log_round(
            &record.id,
            round(
                RoundType::SystemDesign,
                "Design the ingestion pipeline.",
                RoundResult::Pending,
            ),
        )
        .await?;
    println!(
        "  Round {} ({}): {}",
        design.round_number,
        design.round_type,
        design.result.label()
    );

    service.change_status(&record.id, "Offer").await?;
    println!("- Status: Offer");

    let summary = service.dashboard_summary().await?;
    println!(
        "\nDashboard: {} tracked | {} active | {} interviewing | {} offers",
        summary.total, summary.active, summary.interviews, summary.offers
    );

    if let Some(record) = service.get_job(&record.id).await? {
        println!("\nTimeline for {} at {}", record.role, record.company);
        println!("- Applied {}", record.applied_date.format("%Y-%m-%d"));
        for entry in &record.rounds {
            println!(
                "- Round {} ({}) on {}: {}",
                entry.round_number,
                entry.round_type,
                entry.date.format("%Y-%m-%d"),
                entry.result.label()
            );
        }
        println!("- Current status: {}", record.status.label());
    }

    Ok(())
}
