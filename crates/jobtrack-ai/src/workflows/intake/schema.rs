use serde::Deserialize;
use serde_json::{json, Value};

use super::ExtractionError;

/// Structured record the provider must return for a job description.
///
/// `company`, `role`, `skills`, and `summary` are required and never
/// fabricated here: a payload missing any of them fails the parse. The
/// remaining fields default to empty strings when the provider omits them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParsedJobDescription {
    pub company: String,
    pub role: String,
    pub skills: Vec<String>,
    pub summary: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub job_link: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub job_type: String,
}

/// Response schema submitted with every extraction request, mirroring
/// [`ParsedJobDescription`] field for field.
pub(super) fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "company": { "type": "STRING", "description": "Name of the hiring company" },
            "role": { "type": "STRING", "description": "Job title or role" },
            "location": { "type": "STRING", "description": "Job location (Remote, City, etc.)" },
            "salary": { "type": "STRING", "description": "Salary range or compensation details if available" },
            "skills": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of required technical skills and technologies"
            },
            "experience": { "type": "STRING", "description": "Required years of experience or level (Junior, Senior)" },
            "job_link": { "type": "STRING", "description": "URL to the job posting if present in text" },
            "source": { "type": "STRING", "description": "The platform where the job was found (e.g., LinkedIn, Indeed, Company Website)" },
            "job_type": { "type": "STRING", "description": "Type of employment. Must be one of: 'Full Time', 'Intern', 'Intern + Full Time'" },
            "summary": { "type": "STRING", "description": "A concise 2-sentence summary of the job description" }
        },
        "required": ["company", "role", "skills", "summary"]
    })
}

/// Parse the provider's payload into the structured record.
pub(super) fn parse_payload(payload: &str) -> Result<ParsedJobDescription, ExtractionError> {
    let trimmed = strip_json_fences(payload);
    if trimmed.is_empty() {
        return Err(ExtractionError::EmptyContent);
    }

    Ok(serde_json::from_str(trimmed)?)
}

/// Strip ```json ... ``` or ``` ... ``` fences some models wrap around JSON.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}
