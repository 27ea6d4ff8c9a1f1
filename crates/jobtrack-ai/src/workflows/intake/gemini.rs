use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::schema;
use super::{ExtractionError, ExtractionProvider};
use crate::config::ExtractionConfig;

const GENERATE_CONTENT_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const EXTRACTION_PROMPT: &str = "Extract clean JSON from the following job description. \
If a field is not found, use an empty string or empty array.";

// Low temperature keeps the extraction factual rather than creative.
const EXTRACTION_TEMPERATURE: f64 = 0.1;

/// Gemini-backed extraction provider.
///
/// Constructed even without a credential; the missing key surfaces as
/// [`ExtractionError::Unavailable`] when an extraction is actually requested,
/// so the rest of the service keeps working.
pub struct GeminiProvider {
    http: Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiProvider {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("failed to build HTTP client"),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl ExtractionProvider for GeminiProvider {
    async fn extract(&self, jd_text: &str) -> Result<String, ExtractionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ExtractionError::Unavailable("GEMINI_API_KEY is not set"))?;

        let url = format!("{GENERATE_CONTENT_URL}/{}:generateContent", self.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body(jd_text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload = response.text().await?;
        let envelope: GenerateContentResponse = serde_json::from_str(&payload)?;
        envelope.first_text().ok_or(ExtractionError::EmptyContent)
    }
}

fn request_body(jd_text: &str) -> Value {
    json!({
        "contents": [{
            "parts": [{
                "text": format!("{EXTRACTION_PROMPT}\n\nJOB DESCRIPTION:\n{jd_text}")
            }]
        }],
        "generationConfig": {
            "temperature": EXTRACTION_TEMPERATURE,
            "responseMimeType": "application/json",
            "responseSchema": schema::response_schema()
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .find(|text| !text.trim().is_empty())
    }
}
