//! Intake pipeline turning raw job description text into a structured record.
//!
//! The pipeline is a single pass: validate the input locally, ask the
//! configured provider for schema-constrained JSON, parse strictly. There is
//! no retry loop; a failed call surfaces immediately so the caller can fall
//! back to manual entry.

mod gemini;
mod schema;

pub use gemini::GeminiProvider;
pub use schema::ParsedJobDescription;

use async_trait::async_trait;

/// Failure modes of the extraction pipeline.
///
/// `Unavailable` means no call was attempted (missing credential), while
/// `Http`/`Api` mean a call was made and failed. Callers rely on the split to
/// word their fallback messaging.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("job description text is empty")]
    EmptyInput,
    #[error("extraction capability is not configured: {0}")]
    Unavailable(&'static str),
    #[error("extraction request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("extraction provider returned status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("extraction provider returned no content")]
    EmptyContent,
    #[error("extraction response failed schema validation: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Capability boundary for schema-constrained extraction.
///
/// Implementations take the raw job description and return the provider's
/// JSON payload as text. Keeping the seam at the text level lets tests inject
/// canned payloads without any HTTP machinery.
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    async fn extract(&self, jd_text: &str) -> Result<String, ExtractionError>;
}

/// Run the pipeline: local input check, one provider call, strict parse.
pub async fn parse_job_description<P>(
    provider: &P,
    jd_text: &str,
) -> Result<ParsedJobDescription, ExtractionError>
where
    P: ExtractionProvider + ?Sized,
{
    if jd_text.trim().is_empty() {
        return Err(ExtractionError::EmptyInput);
    }

    let payload = provider.extract(jd_text).await?;
    schema::parse_payload(&payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        payload: &'static str,
        calls: AtomicUsize,
    }

    impl CountingProvider {
        fn returning(payload: &'static str) -> Self {
            Self {
                payload,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ExtractionProvider for CountingProvider {
        async fn extract(&self, _jd_text: &str) -> Result<String, ExtractionError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.payload.to_string())
        }
    }

    struct UnconfiguredProvider;

    #[async_trait]
    impl ExtractionProvider for UnconfiguredProvider {
        async fn extract(&self, _jd_text: &str) -> Result<String, ExtractionError> {
            Err(ExtractionError::Unavailable("GEMINI_API_KEY is not set"))
        }
    }

    #[tokio::test]
    async fn empty_input_short_circuits_before_the_provider() {
        let provider = CountingProvider::returning("{}");

        let error = parse_job_description(&provider, "   \n\t")
            .await
            .expect_err("empty input rejected");

        assert!(matches!(error, ExtractionError::EmptyInput));
        assert_eq!(provider.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn required_only_payload_parses_with_empty_optionals() {
        let provider = CountingProvider::returning(
            r#"{"company":"X","role":"Y","skills":["Go","SQL"],"summary":"Z"}"#,
        );

        let parsed = parse_job_description(&provider, "We are hiring")
            .await
            .expect("payload parses");

        assert_eq!(provider.calls.load(Ordering::Relaxed), 1);
        assert_eq!(parsed.company, "X");
        assert_eq!(parsed.role, "Y");
        assert_eq!(parsed.skills, vec!["Go", "SQL"]);
        assert_eq!(parsed.summary, "Z");
        assert_eq!(parsed.location, "");
        assert_eq!(parsed.salary, "");
        assert_eq!(parsed.job_link, "");
    }

    #[tokio::test]
    async fn non_array_skills_fail_the_parse() {
        let provider = CountingProvider::returning(
            r#"{"company":"X","role":"Y","skills":"Go, SQL","summary":"Z"}"#,
        );

        let error = parse_job_description(&provider, "We are hiring")
            .await
            .expect_err("string skills rejected");

        assert!(matches!(error, ExtractionError::Parse(_)));
    }

    #[tokio::test]
    async fn missing_capability_is_distinct_from_a_failed_call() {
        let error = parse_job_description(&UnconfiguredProvider, "We are hiring")
            .await
            .expect_err("capability missing");

        assert!(matches!(error, ExtractionError::Unavailable(_)));
        assert!(!matches!(error, ExtractionError::Api { .. }));
    }
}
